//! Persisted shape of the workout collection.
//!
//! Weights and reps are stored as strings, mirroring the raw form input
//! values; dates are RFC 3339 timestamps and durations integer
//! milliseconds. Conversion back into domain records is fallible, a record
//! that no longer parses is dropped by the caller instead of failing the
//! whole collection.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use styrka_domain as domain;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDocument {
    pub id: Uuid,
    pub program: String,
    pub program_name: String,
    pub date: DateTime<Utc>,
    pub duration: i64,
    pub exercises: Vec<ExerciseDocument>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseDocument {
    pub name: String,
    pub sets: Vec<SetDocument>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SetDocument {
    pub weight: String,
    pub reps: String,
}

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
    #[error(transparent)]
    Reps(#[from] domain::RepsError),
}

impl From<&domain::WorkoutRecord> for WorkoutDocument {
    fn from(value: &domain::WorkoutRecord) -> Self {
        Self {
            id: *value.id,
            program: value.program_id.to_string(),
            program_name: value.program_name.clone(),
            date: value.date,
            duration: value.duration.num_milliseconds(),
            exercises: value.exercises.iter().map(Into::into).collect(),
        }
    }
}

impl From<&domain::ExerciseRecord> for ExerciseDocument {
    fn from(value: &domain::ExerciseRecord) -> Self {
        Self {
            name: value.name.clone(),
            sets: value.sets.iter().map(Into::into).collect(),
        }
    }
}

impl From<&domain::SetEntry> for SetDocument {
    fn from(value: &domain::SetEntry) -> Self {
        Self {
            weight: value.weight.to_string(),
            reps: value.reps.to_string(),
        }
    }
}

impl TryFrom<WorkoutDocument> for domain::WorkoutRecord {
    type Error = DocumentError;

    fn try_from(value: WorkoutDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: domain::WorkoutID::from(value.id),
            program_id: domain::ProgramID::from(value.program.as_str()),
            program_name: value.program_name,
            date: value.date,
            duration: Duration::milliseconds(value.duration),
            exercises: value
                .exercises
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl TryFrom<ExerciseDocument> for domain::ExerciseRecord {
    type Error = DocumentError;

    fn try_from(value: ExerciseDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            sets: value
                .sets
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl TryFrom<SetDocument> for domain::SetEntry {
    type Error = DocumentError;

    fn try_from(value: SetDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            weight: domain::Weight::try_from(value.weight.as_str())?,
            reps: domain::Reps::try_from(value.reps.as_str())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    static WORKOUT: LazyLock<domain::WorkoutRecord> = LazyLock::new(|| domain::WorkoutRecord {
        id: 1.into(),
        program_id: domain::ProgramID::from("legs"),
        program_name: String::from("Legs"),
        date: Utc.with_ymd_and_hms(2020, 2, 3, 18, 30, 0).unwrap(),
        duration: Duration::milliseconds(2_400_000),
        exercises: vec![domain::ExerciseRecord {
            name: String::from("Squats"),
            sets: vec![
                domain::SetEntry {
                    weight: domain::Weight::new(100.0).unwrap(),
                    reps: domain::Reps::new(5).unwrap(),
                },
                domain::SetEntry {
                    weight: domain::Weight::new(82.5).unwrap(),
                    reps: domain::Reps::new(8).unwrap(),
                },
            ],
        }],
    });

    static WORKOUT_2: LazyLock<domain::WorkoutRecord> = LazyLock::new(|| domain::WorkoutRecord {
        id: 2.into(),
        program_id: domain::ProgramID::from("abs"),
        program_name: String::from("Abs"),
        date: Utc.with_ymd_and_hms(2020, 2, 4, 7, 15, 0).unwrap(),
        duration: Duration::milliseconds(900_000),
        exercises: vec![domain::ExerciseRecord {
            name: String::from("Rope Curls"),
            sets: vec![domain::SetEntry {
                weight: domain::Weight::default(),
                reps: domain::Reps::new(20).unwrap(),
            }],
        }],
    });

    fn round_trip(workouts: &[domain::WorkoutRecord]) -> Vec<domain::WorkoutRecord> {
        let documents = workouts.iter().map(WorkoutDocument::from).collect::<Vec<_>>();
        let serialized = serde_json::to_string(&documents).unwrap();
        serde_json::from_str::<Vec<WorkoutDocument>>(&serialized)
            .unwrap()
            .into_iter()
            .map(|document| domain::WorkoutRecord::try_from(document).unwrap())
            .collect()
    }

    #[test]
    fn test_round_trip_empty() {
        assert_eq!(round_trip(&[]), vec![]);
    }

    #[test]
    fn test_round_trip_single() {
        assert_eq!(round_trip(&[WORKOUT.clone()]), vec![WORKOUT.clone()]);
    }

    #[test]
    fn test_round_trip_many() {
        let workouts = vec![WORKOUT.clone(), WORKOUT_2.clone(), WORKOUT.clone()];
        assert_eq!(round_trip(&workouts), workouts);
    }

    #[test]
    fn test_serialized_field_names_match_persisted_shape() {
        let serialized =
            serde_json::to_value(WorkoutDocument::from(&*WORKOUT)).unwrap();
        assert_eq!(serialized["program"], "legs");
        assert_eq!(serialized["programName"], "Legs");
        assert_eq!(serialized["duration"], 2_400_000);
        assert_eq!(serialized["exercises"][0]["name"], "Squats");
        assert_eq!(serialized["exercises"][0]["sets"][0]["weight"], "100");
        assert_eq!(serialized["exercises"][0]["sets"][0]["reps"], "5");
        assert_eq!(serialized["exercises"][0]["sets"][1]["weight"], "82.5");
    }

    #[test]
    fn test_corrupt_collection_fails_to_parse() {
        assert!(serde_json::from_str::<Vec<WorkoutDocument>>("{").is_err());
        assert!(serde_json::from_str::<Vec<WorkoutDocument>>("[{\"foo\": 1}]").is_err());
    }

    #[rstest]
    #[case("abc", "5")]
    #[case("100", "")]
    #[case("-1", "5")]
    fn test_unparsable_set_document(#[case] weight: &str, #[case] reps: &str) {
        let document = SetDocument {
            weight: weight.to_string(),
            reps: reps.to_string(),
        };
        assert!(domain::SetEntry::try_from(document).is_err());
    }
}
