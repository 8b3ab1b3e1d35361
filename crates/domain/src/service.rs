use std::collections::BTreeSet;

use log::error;

use crate::{
    CreateError, DeleteError, ExerciseProgress, ProgramID, ReadError, WorkoutID, WorkoutRecord,
    WorkoutRepository, progress,
};

/// Read side and write side of the workout store, as consumed by the
/// session core and the history and progress views.
pub trait WorkoutService {
    fn get_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError>;
    fn add_workout(&self, workout: WorkoutRecord) -> Result<WorkoutRecord, CreateError>;
    fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
    /// The workout with the maximum date among those of the given program.
    /// The first stored record wins when dates are equal.
    fn most_recent_workout(&self, program: &ProgramID) -> Result<Option<WorkoutRecord>, ReadError>;
    /// Sorted unique names of all exercises occurring in the store.
    fn exercise_names(&self) -> Result<Vec<String>, ReadError>;
    fn exercise_progress(&self, name: &str) -> Result<Option<ExerciseProgress>, ReadError>;
}

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    fn get_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError> {
        log_on_error!(self.repository.read_workouts(), "read", "workouts")
    }

    fn add_workout(&self, workout: WorkoutRecord) -> Result<WorkoutRecord, CreateError> {
        log_on_error!(self.repository.create_workout(workout), "create", "workout")
    }

    fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(self.repository.delete_workout(id), "delete", "workout")
    }

    fn most_recent_workout(&self, program: &ProgramID) -> Result<Option<WorkoutRecord>, ReadError> {
        Ok(self
            .get_workouts()?
            .into_iter()
            .filter(|workout| workout.program_id == *program)
            .fold(None, |best: Option<WorkoutRecord>, workout| match best {
                Some(best) if workout.date > best.date => Some(workout),
                None => Some(workout),
                best => best,
            }))
    }

    fn exercise_names(&self) -> Result<Vec<String>, ReadError> {
        Ok(self
            .get_workouts()?
            .into_iter()
            .flat_map(|workout| workout.exercises)
            .map(|exercise| exercise.name)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect())
    }

    fn exercise_progress(&self, name: &str) -> Result<Option<ExerciseProgress>, ReadError> {
        Ok(progress::exercise_progress(&self.get_workouts()?, name))
    }
}
