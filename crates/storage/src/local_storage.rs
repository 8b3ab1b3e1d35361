//! Browser local storage backend.
//!
//! Every persisted structure is one whole-document JSON blob; each mutation
//! re-serializes the full structure so a failed write never leaves partial
//! state. A missing key yields the empty value, an unreadable one is
//! discarded with a warning instead of failing startup.

use std::collections::VecDeque;

use gloo_storage::Storage as GlooStorage;
use log::warn;

use styrka_domain as domain;
use styrka_web_app as web_app;

use crate::document::WorkoutDocument;

pub struct LocalStorage;

const KEY_WORKOUTS: &str = "workouts";
const KEY_SESSION_CHECKPOINT: &str = "workout-session-checkpoint";
const KEY_DRAFT_FORM: &str = "workout-draft-form";
const KEY_SETTINGS: &str = "settings";
const KEY_LOG: &str = "log";

impl domain::WorkoutRepository for LocalStorage {
    fn read_workouts(&self) -> Result<Vec<domain::WorkoutRecord>, domain::ReadError> {
        let documents: Vec<WorkoutDocument> = match gloo_storage::LocalStorage::get(KEY_WORKOUTS) {
            Ok(documents) => documents,
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Vec::new(),
            Err(gloo_storage::errors::StorageError::SerdeError(err)) => {
                warn!("discarding unreadable workout collection: {err}");
                Vec::new()
            }
            Err(err) => return Err(domain::ReadError::Storage(into_storage_error(err))),
        };
        Ok(documents
            .into_iter()
            .filter_map(|document| match domain::WorkoutRecord::try_from(document) {
                Ok(workout) => Some(workout),
                Err(err) => {
                    warn!("discarding unreadable workout record: {err}");
                    None
                }
            })
            .collect())
    }

    fn create_workout(
        &self,
        workout: domain::WorkoutRecord,
    ) -> Result<domain::WorkoutRecord, domain::CreateError> {
        let mut workouts = self.read_workouts()?;
        workouts.push(workout.clone());
        write_workouts(&workouts).map_err(domain::CreateError::Storage)?;
        Ok(workout)
    }

    fn delete_workout(&self, id: domain::WorkoutID) -> Result<domain::WorkoutID, domain::DeleteError> {
        let mut workouts = self.read_workouts()?;
        let Some(position) = workouts.iter().position(|workout| workout.id == id) else {
            return Err(domain::DeleteError::NotFound);
        };
        workouts.remove(position);
        write_workouts(&workouts).map_err(domain::DeleteError::Storage)?;
        Ok(id)
    }
}

fn write_workouts(workouts: &[domain::WorkoutRecord]) -> Result<(), domain::StorageError> {
    let documents = workouts.iter().map(WorkoutDocument::from).collect::<Vec<_>>();
    gloo_storage::LocalStorage::set(KEY_WORKOUTS, documents).map_err(into_storage_error)
}

fn into_storage_error(err: gloo_storage::errors::StorageError) -> domain::StorageError {
    // browsers report an exhausted quota as a QuotaExceededError DOM exception
    if err.to_string().contains("QuotaExceeded") {
        domain::StorageError::QuotaExceeded
    } else {
        domain::StorageError::Other(err.to_string().into())
    }
}

impl web_app::Repository for LocalStorage {
    fn read_settings(&self) -> Result<web_app::Settings, String> {
        match gloo_storage::LocalStorage::get(KEY_SETTINGS) {
            Ok(settings) => Ok(settings),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => {
                Ok(web_app::Settings::default())
            }
            Err(gloo_storage::errors::StorageError::SerdeError(err)) => {
                warn!("discarding unreadable settings: {err}");
                Ok(web_app::Settings::default())
            }
            Err(err) => Err(err.to_string()),
        }
    }

    fn write_settings(&self, settings: &web_app::Settings) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_SETTINGS, settings).map_err(|err| err.to_string())
    }

    fn read_session_checkpoint(&self) -> Result<Option<web_app::SessionCheckpoint>, String> {
        match gloo_storage::LocalStorage::get(KEY_SESSION_CHECKPOINT) {
            Ok(checkpoint) => Ok(checkpoint),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(None),
            Err(gloo_storage::errors::StorageError::SerdeError(err)) => {
                warn!("discarding unreadable session checkpoint: {err}");
                Ok(None)
            }
            Err(err) => Err(err.to_string()),
        }
    }

    fn write_session_checkpoint(
        &self,
        checkpoint: Option<&web_app::SessionCheckpoint>,
    ) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_SESSION_CHECKPOINT, checkpoint)
            .map_err(|err| err.to_string())
    }

    fn read_draft_sets(&self) -> Result<web_app::DraftSets, String> {
        match gloo_storage::LocalStorage::get::<Option<web_app::DraftSets>>(KEY_DRAFT_FORM) {
            Ok(draft_sets) => Ok(draft_sets.unwrap_or_default()),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => {
                Ok(web_app::DraftSets::default())
            }
            Err(gloo_storage::errors::StorageError::SerdeError(err)) => {
                warn!("discarding unreadable draft sets: {err}");
                Ok(web_app::DraftSets::default())
            }
            Err(err) => Err(err.to_string()),
        }
    }

    fn write_draft_sets(&self, draft_sets: Option<&web_app::DraftSets>) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_DRAFT_FORM, draft_sets).map_err(|err| err.to_string())
    }
}

pub struct Log;

impl web_app::log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<web_app::log::Entry>, web_app::log::Error> {
        match gloo_storage::LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(VecDeque::new()),
            Err(gloo_storage::errors::StorageError::SerdeError(_)) => Ok(VecDeque::new()),
            Err(err) => Err(web_app::log::Error::Unknown(err.to_string())),
        }
    }

    fn write_entry(&self, entry: web_app::log::Entry) -> Result<(), web_app::log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(web_app::log::MAX_ENTRIES);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| web_app::log::Error::Unknown(err.to_string()))
    }
}
