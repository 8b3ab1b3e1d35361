use std::{cmp::Ordering, rc::Rc};

use chrono::{DateTime, Duration, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, ProgramID, ReadError, SetEntry, Weight};

pub trait WorkoutRepository {
    fn read_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError>;
    fn create_workout(&self, workout: WorkoutRecord) -> Result<WorkoutRecord, CreateError>;
    fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

impl<T: WorkoutRepository + ?Sized> WorkoutRepository for Rc<T> {
    fn read_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError> {
        (**self).read_workouts()
    }

    fn create_workout(&self, workout: WorkoutRecord) -> Result<WorkoutRecord, CreateError> {
        (**self).create_workout(workout)
    }

    fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        (**self).delete_workout(id)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// All retained sets of one exercise within a saved workout.
///
/// An exercise without any retained set is not part of the workout record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRecord {
    pub name: String,
    pub sets: Vec<SetEntry>,
}

impl ExerciseRecord {
    #[must_use]
    pub fn max_weight(&self) -> Option<Weight> {
        self.sets
            .iter()
            .map(|set| set.weight)
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(SetEntry::volume).sum()
    }
}

/// A completed workout. Created at save time, immutable afterwards,
/// removed only by an explicit delete.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub id: WorkoutID,
    pub program_id: ProgramID,
    pub program_name: String,
    pub date: DateTime<Utc>,
    pub duration: Duration,
    pub exercises: Vec<ExerciseRecord>,
}

impl WorkoutRecord {
    #[must_use]
    pub fn exercise(&self, name: &str) -> Option<&ExerciseRecord> {
        self.exercises.iter().find(|exercise| exercise.name == name)
    }

    #[must_use]
    pub fn max_weight_for(&self, name: &str) -> Option<Weight> {
        self.exercise(name).and_then(ExerciseRecord::max_weight)
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.exercises.iter().map(ExerciseRecord::volume).sum()
    }
}

/// The history view: workouts by descending date, optionally restricted to
/// one program. The sort is stable, records sharing a date keep their
/// insertion order.
#[must_use]
pub fn history<'a>(
    workouts: &'a [WorkoutRecord],
    program: Option<&ProgramID>,
) -> Vec<&'a WorkoutRecord> {
    let mut result = workouts
        .iter()
        .filter(|workout| program.is_none_or(|p| workout.program_id == *p))
        .collect::<Vec<_>>();
    result.sort_by(|a, b| b.date.cmp(&a.date));
    result
}
