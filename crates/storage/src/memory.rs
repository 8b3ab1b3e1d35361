//! In-memory storage backend for tests and native development.
//!
//! Behaves like the local storage backend without serialization. Writes can
//! be switched to fail for exercising the best-effort persistence paths.

use std::cell::{Cell, RefCell};

use styrka_domain as domain;
use styrka_web_app as web_app;

#[derive(Default)]
pub struct Memory {
    workouts: RefCell<Vec<domain::WorkoutRecord>>,
    settings: RefCell<Option<web_app::Settings>>,
    checkpoint: RefCell<Option<web_app::SessionCheckpoint>>,
    draft_sets: RefCell<Option<web_app::DraftSets>>,
    fail_writes: Cell<bool>,
}

impl Memory {
    #[must_use]
    pub fn with_workouts(workouts: Vec<domain::WorkoutRecord>) -> Self {
        Self {
            workouts: RefCell::new(workouts),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    #[must_use]
    pub fn session_checkpoint(&self) -> Option<web_app::SessionCheckpoint> {
        self.checkpoint.borrow().clone()
    }
}

impl domain::WorkoutRepository for Memory {
    fn read_workouts(&self) -> Result<Vec<domain::WorkoutRecord>, domain::ReadError> {
        Ok(self.workouts.borrow().clone())
    }

    fn create_workout(
        &self,
        workout: domain::WorkoutRecord,
    ) -> Result<domain::WorkoutRecord, domain::CreateError> {
        if self.fail_writes.get() {
            return Err(domain::CreateError::Storage(
                domain::StorageError::QuotaExceeded,
            ));
        }
        self.workouts.borrow_mut().push(workout.clone());
        Ok(workout)
    }

    fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        if self.fail_writes.get() {
            return Err(domain::DeleteError::Storage(
                domain::StorageError::QuotaExceeded,
            ));
        }
        let mut workouts = self.workouts.borrow_mut();
        let Some(position) = workouts.iter().position(|workout| workout.id == id) else {
            return Err(domain::DeleteError::NotFound);
        };
        workouts.remove(position);
        Ok(id)
    }
}

impl web_app::Repository for Memory {
    fn read_settings(&self) -> Result<web_app::Settings, String> {
        Ok(self.settings.borrow().clone().unwrap_or_default())
    }

    fn write_settings(&self, settings: &web_app::Settings) -> Result<(), String> {
        if self.fail_writes.get() {
            return Err(String::from("storage quota exceeded"));
        }
        *self.settings.borrow_mut() = Some(settings.clone());
        Ok(())
    }

    fn read_session_checkpoint(&self) -> Result<Option<web_app::SessionCheckpoint>, String> {
        Ok(self.checkpoint.borrow().clone())
    }

    fn write_session_checkpoint(
        &self,
        checkpoint: Option<&web_app::SessionCheckpoint>,
    ) -> Result<(), String> {
        if self.fail_writes.get() {
            return Err(String::from("storage quota exceeded"));
        }
        *self.checkpoint.borrow_mut() = checkpoint.cloned();
        Ok(())
    }

    fn read_draft_sets(&self) -> Result<web_app::DraftSets, String> {
        Ok(self.draft_sets.borrow().clone().unwrap_or_default())
    }

    fn write_draft_sets(&self, draft_sets: Option<&web_app::DraftSets>) -> Result<(), String> {
        if self.fail_writes.get() {
            return Err(String::from("storage quota exceeded"));
        }
        *self.draft_sets.borrow_mut() = draft_sets.cloned();
        Ok(())
    }
}
