use derive_more::{Display, Into};
use thiserror::Error;

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// A single recorded set: weight lifted and number of repetitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetEntry {
    pub weight: Weight,
    pub reps: Reps,
}

impl SetEntry {
    #[must_use]
    pub fn volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        {
            f32::from(self.weight) * u32::from(self.reps) as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, Ok(Weight(0.0)))]
    #[case(82.5, Ok(Weight(82.5)))]
    #[case(999.9, Ok(Weight(999.9)))]
    #[case(-0.5, Err(WeightError::OutOfRange))]
    #[case(1000.0, Err(WeightError::OutOfRange))]
    fn test_weight_new(#[case] value: f32, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::new(value), expected);
    }

    #[rstest]
    #[case("100", Ok(Weight(100.0)))]
    #[case("82.5", Ok(Weight(82.5)))]
    #[case("", Err(WeightError::ParseError))]
    #[case("abc", Err(WeightError::ParseError))]
    #[case("-1", Err(WeightError::OutOfRange))]
    fn test_weight_try_from(#[case] value: &str, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::try_from(value), expected);
    }

    #[rstest]
    #[case(0, Ok(Reps(0)))]
    #[case(999, Ok(Reps(999)))]
    #[case(1000, Err(RepsError::OutOfRange))]
    fn test_reps_new(#[case] value: u32, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::new(value), expected);
    }

    #[rstest]
    #[case("5", Ok(Reps(5)))]
    #[case("", Err(RepsError::ParseError))]
    #[case("5.5", Err(RepsError::ParseError))]
    #[case("-1", Err(RepsError::ParseError))]
    fn test_reps_try_from(#[case] value: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(value), expected);
    }

    #[rstest]
    #[case(100.0, 5, 500.0)]
    #[case(82.5, 10, 825.0)]
    #[case(0.0, 12, 0.0)]
    fn test_set_entry_volume(#[case] weight: f32, #[case] reps: u32, #[case] expected: f32) {
        let entry = SetEntry {
            weight: Weight::new(weight).unwrap(),
            reps: Reps::new(reps).unwrap(),
        };
        assert_eq!(entry.volume(), expected);
    }
}
