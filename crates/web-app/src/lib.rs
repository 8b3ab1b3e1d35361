#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::{collections::BTreeMap, rc::Rc};

use chrono::{DateTime, Utc};

use styrka_domain as domain;

pub mod log;
pub mod quote;
pub mod session;
pub mod timer;
pub mod unload;

/// Persisted application state, stored as whole-document JSON blobs.
pub trait Repository {
    fn read_settings(&self) -> Result<Settings, String>;
    fn write_settings(&self, settings: &Settings) -> Result<(), String>;

    fn read_session_checkpoint(&self) -> Result<Option<SessionCheckpoint>, String>;
    fn write_session_checkpoint(
        &self,
        checkpoint: Option<&SessionCheckpoint>,
    ) -> Result<(), String>;

    fn read_draft_sets(&self) -> Result<DraftSets, String>;
    fn write_draft_sets(&self, draft_sets: Option<&DraftSets>) -> Result<(), String>;
}

impl<T: Repository + ?Sized> Repository for Rc<T> {
    fn read_settings(&self) -> Result<Settings, String> {
        (**self).read_settings()
    }

    fn write_settings(&self, settings: &Settings) -> Result<(), String> {
        (**self).write_settings(settings)
    }

    fn read_session_checkpoint(&self) -> Result<Option<SessionCheckpoint>, String> {
        (**self).read_session_checkpoint()
    }

    fn write_session_checkpoint(
        &self,
        checkpoint: Option<&SessionCheckpoint>,
    ) -> Result<(), String> {
        (**self).write_session_checkpoint(checkpoint)
    }

    fn read_draft_sets(&self) -> Result<DraftSets, String> {
        (**self).read_draft_sets()
    }

    fn write_draft_sets(&self, draft_sets: Option<&DraftSets>) -> Result<(), String> {
        (**self).write_draft_sets(draft_sets)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    System,
    Light,
    Dark,
}

/// Snapshot of the active session, written on every tick and set mutation
/// so that an uncontrolled termination loses at most one second.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct SessionCheckpoint {
    pub program: String,
    pub start_time: DateTime<Utc>,
    /// Accumulated duration in milliseconds at `timestamp`.
    pub duration: i64,
    pub is_active: bool,
    pub timestamp: DateTime<Utc>,
}

/// The live form values, keyed by exercise name. Persisted separately from
/// the checkpoint because they change at a higher frequency.
pub type DraftSets = BTreeMap<String, Vec<SetDraft>>;

/// Raw form input for one set. Values stay unparsed until save time.
#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct SetDraft {
    pub weight: String,
    pub reps: String,
}

impl SetDraft {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.weight.trim().is_empty() && self.reps.trim().is_empty()
    }

    /// The set as it would be recorded: `None` if both fields are blank or
    /// a field does not parse, a blank field defaulting to zero otherwise.
    #[must_use]
    pub fn entry(&self) -> Option<domain::SetEntry> {
        if self.is_blank() {
            return None;
        }

        let weight = match self.weight.trim() {
            "" => domain::Weight::default(),
            value => domain::Weight::try_from(value).ok()?,
        };
        let reps = match self.reps.trim() {
            "" => domain::Reps::default(),
            value => domain::Reps::try_from(value).ok()?,
        };

        Some(domain::SetEntry { weight, reps })
    }
}
