//! The single active workout session and its persistence protocol.
//!
//! There is at most one active session. It lives in memory, is checkpointed
//! to the repository on every tick and set mutation, and is offered for
//! restoration after an uncontrolled termination. A checkpoint older than
//! the staleness window is discarded instead of offered.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use log::{debug, error};
use thiserror::Error;

use styrka_domain::{self as domain, WorkoutService, catalog};

use crate::{DraftSets, Repository, SessionCheckpoint, SetDraft, timer};

/// Checkpoints older than this are never offered for restoration.
pub const STALE_SESSION_AGE: Duration = Duration::hours(24);

const EXIT_CONFIRMATION: &str =
    "You have an active workout that is not saved. Are you sure you want to quit?";
const SAVE_CONFIRMATION: &str =
    "Are you sure you want to save and finish this workout? This cannot be undone.";
const RESTORE_CONFIRMATION: &str =
    "An unfinished workout was found. Do you want to continue it?";
const SAVED_NOTIFICATION: &str = "Workout saved";
const STORAGE_FAILURE_NOTIFICATION: &str =
    "Saving to device storage failed. Your workout is kept in memory.";

/// Everything the session core needs from the presentation layer.
///
/// `confirm` blocks until the user decides; no other session mutation is
/// delivered while a confirmation is outstanding.
pub trait UI {
    fn confirm(&self, message: &str) -> bool;
    fn notify(&self, message: &str);
    fn show_duration(&self, duration: &str);
    fn render_workout_form(&self, program: &catalog::Program, draft_sets: &DraftSets);
    fn render_last_workout(&self, workout: Option<&domain::WorkoutRecord>);
}

impl<T: UI + ?Sized> UI for std::rc::Rc<T> {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn notify(&self, message: &str) {
        (**self).notify(message);
    }

    fn show_duration(&self, duration: &str) {
        (**self).show_duration(duration);
    }

    fn render_workout_form(&self, program: &catalog::Program, draft_sets: &DraftSets) {
        (**self).render_workout_form(program, draft_sets);
    }

    fn render_last_workout(&self, workout: Option<&domain::WorkoutRecord>) {
        (**self).render_last_workout(workout);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Weight,
    Reps,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("unknown program: {0}")]
    UnknownProgram(domain::ProgramID),
    #[error("a workout is already active")]
    AlreadyActive,
    #[error("no active workout")]
    NotActive,
    #[error(transparent)]
    Create(#[from] domain::CreateError),
}

/// The in-memory state of the active session.
#[derive(Debug, Clone, PartialEq)]
pub struct OngoingWorkout {
    pub program_id: domain::ProgramID,
    pub start_time: DateTime<Utc>,
    pub duration: Duration,
    pub sets: DraftSets,
}

impl OngoingWorkout {
    fn new(program: &catalog::Program, start_time: DateTime<Utc>) -> Self {
        Self {
            program_id: program.program_id(),
            start_time,
            duration: Duration::zero(),
            sets: program
                .exercises
                .iter()
                .map(|exercise| ((*exercise).to_string(), vec![SetDraft::default()]))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn checkpoint(&self, now: DateTime<Utc>) -> SessionCheckpoint {
        SessionCheckpoint {
            program: self.program_id.to_string(),
            start_time: self.start_time,
            duration: self.duration.num_milliseconds(),
            is_active: true,
            timestamp: now,
        }
    }
}

pub struct SessionService<R, W, U> {
    repository: R,
    workouts: W,
    ui: U,
    ongoing: Option<OngoingWorkout>,
}

impl<R, W, U> SessionService<R, W, U>
where
    R: Repository,
    W: WorkoutService,
    U: UI,
{
    pub fn new(repository: R, workouts: W, ui: U) -> Self {
        Self {
            repository,
            workouts,
            ui,
            ongoing: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.ongoing.is_some()
    }

    #[must_use]
    pub fn ongoing(&self) -> Option<&OngoingWorkout> {
        self.ongoing.as_ref()
    }

    /// Starts a session for the given program with one empty set per
    /// exercise, renders the form and the previous workout of the program,
    /// and writes the initial checkpoint.
    pub fn open_workout(
        &mut self,
        program_id: &domain::ProgramID,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if self.ongoing.is_some() {
            return Err(SessionError::AlreadyActive);
        }
        let program = catalog::get_program(program_id)
            .ok_or_else(|| SessionError::UnknownProgram(program_id.clone()))?;

        let ongoing = OngoingWorkout::new(program, now);
        self.ui.render_workout_form(program, &ongoing.sets);
        self.ui.render_last_workout(
            self.workouts
                .most_recent_workout(program_id)
                .unwrap_or_default()
                .as_ref(),
        );
        self.ui
            .show_duration(&timer::format_duration(ongoing.duration));
        self.ongoing = Some(ongoing);
        self.persist_draft();
        self.persist_checkpoint(now);
        Ok(())
    }

    /// Appends an empty set to the exercise. No-op outside an active
    /// session or for an exercise not part of the program.
    pub fn add_set(&mut self, exercise: &str, now: DateTime<Utc>) {
        let Some(ongoing) = &mut self.ongoing else {
            return;
        };
        let Some(sets) = ongoing.sets.get_mut(exercise) else {
            return;
        };
        sets.push(SetDraft::default());
        self.persist_draft();
        self.persist_checkpoint(now);
    }

    /// Removes the set at `index`. No-op outside an active session, for an
    /// unknown exercise or for an index out of bounds.
    pub fn remove_set(&mut self, exercise: &str, index: usize, now: DateTime<Utc>) {
        let Some(ongoing) = &mut self.ongoing else {
            return;
        };
        let Some(sets) = ongoing.sets.get_mut(exercise) else {
            return;
        };
        if index >= sets.len() {
            return;
        }
        sets.remove(index);
        self.persist_draft();
        self.persist_checkpoint(now);
    }

    /// Replaces one field of one set with the raw input value. No-op
    /// outside an active session or for an unknown exercise or index.
    pub fn edit_set(
        &mut self,
        exercise: &str,
        index: usize,
        field: SetField,
        value: &str,
        now: DateTime<Utc>,
    ) {
        let Some(ongoing) = &mut self.ongoing else {
            return;
        };
        let Some(set) = ongoing
            .sets
            .get_mut(exercise)
            .and_then(|sets| sets.get_mut(index))
        else {
            return;
        };
        match field {
            SetField::Weight => set.weight = value.to_string(),
            SetField::Reps => set.reps = value.to_string(),
        }
        self.persist_draft();
        self.persist_checkpoint(now);
    }

    /// Called once per second while active. Recomputes the duration from
    /// the wall clock, updates the display and writes a checkpoint.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        let Some(ongoing) = &mut self.ongoing else {
            return;
        };
        // wall-clock delta, clamped so the duration never decreases
        ongoing.duration = ongoing.duration.max(now - ongoing.start_time);
        let duration = ongoing.duration;
        self.ui.show_duration(&timer::format_duration(duration));
        self.persist_checkpoint(now);
    }

    /// Leaving the workout screen. Returns whether the exit may proceed.
    /// With an active session this requires an explicit confirmation;
    /// declining keeps the session untouched.
    pub fn request_exit(&mut self) -> bool {
        if self.ongoing.is_none() {
            return true;
        }
        if !self.ui.confirm(EXIT_CONFIRMATION) {
            return false;
        }
        self.ongoing = None;
        self.clear_persisted_session();
        true
    }

    /// Saves the active session as a workout record after an explicit
    /// confirmation. Returns `Ok(false)` when the user declines.
    ///
    /// Exercises without retained sets are dropped, as are sets with both
    /// fields blank; a present-but-partial set gets its missing field
    /// defaulted to zero. A store failure keeps the session active, the
    /// in-memory state remains authoritative.
    pub fn save_workout(&mut self, now: DateTime<Utc>) -> Result<bool, SessionError> {
        let Some(ongoing) = &self.ongoing else {
            return Err(SessionError::NotActive);
        };
        let program = catalog::get_program(&ongoing.program_id)
            .ok_or_else(|| SessionError::UnknownProgram(ongoing.program_id.clone()))?;

        if !self.ui.confirm(SAVE_CONFIRMATION) {
            return Ok(false);
        }

        // freeze the duration at confirmation time
        let duration = ongoing.duration.max(now - ongoing.start_time);
        let workout = domain::WorkoutRecord {
            id: domain::WorkoutID::random(),
            program_id: ongoing.program_id.clone(),
            program_name: program.name.to_string(),
            date: now,
            duration,
            exercises: recorded_exercises(program, &ongoing.sets),
        };

        match self.workouts.add_workout(workout) {
            Ok(_) => {
                self.ongoing = None;
                self.clear_persisted_session();
                self.ui.notify(SAVED_NOTIFICATION);
                Ok(true)
            }
            Err(err) => {
                self.ui.notify(STORAGE_FAILURE_NOTIFICATION);
                Err(err.into())
            }
        }
    }

    /// Offers restoration of a checkpointed session at startup.
    ///
    /// An absent checkpoint is a no-op, a stale one is discarded silently,
    /// one with an unknown program is discarded with an error. Otherwise the
    /// user decides: restoring reconciles the downtime since the checkpoint
    /// into the duration and reloads the drafts, declining discards both.
    pub fn recover(&mut self, now: DateTime<Utc>) -> Result<bool, SessionError> {
        if self.ongoing.is_some() {
            return Err(SessionError::AlreadyActive);
        }
        let checkpoint = match self.repository.read_session_checkpoint() {
            Ok(checkpoint) => checkpoint,
            Err(err) => {
                error!("failed to read session checkpoint: {err}");
                None
            }
        };
        let Some(checkpoint) = checkpoint else {
            return Ok(false);
        };

        if !checkpoint.is_active {
            self.clear_persisted_session();
            return Ok(false);
        }

        if now - checkpoint.timestamp > STALE_SESSION_AGE {
            debug!(
                "discarding stale session checkpoint from {}",
                checkpoint.timestamp
            );
            self.clear_persisted_session();
            return Ok(false);
        }

        let program_id = domain::ProgramID::from(checkpoint.program.as_str());
        let Some(program) = catalog::get_program(&program_id) else {
            self.clear_persisted_session();
            return Err(SessionError::UnknownProgram(program_id));
        };

        if !self.ui.confirm(RESTORE_CONFIRMATION) {
            self.clear_persisted_session();
            return Ok(false);
        }

        let mut ongoing = OngoingWorkout::new(program, checkpoint.start_time);
        // account for the downtime between the checkpoint and now
        ongoing.duration =
            Duration::milliseconds(checkpoint.duration) + (now - checkpoint.timestamp);
        match self.repository.read_draft_sets() {
            Ok(draft_sets) => {
                for (exercise, sets) in draft_sets {
                    if sets.is_empty() {
                        continue;
                    }
                    if let Some(entry) = ongoing.sets.get_mut(&exercise) {
                        *entry = sets;
                    }
                }
            }
            Err(err) => error!("failed to read draft sets: {err}"),
        }

        self.ui.render_workout_form(program, &ongoing.sets);
        self.ui.render_last_workout(
            self.workouts
                .most_recent_workout(&program_id)
                .unwrap_or_default()
                .as_ref(),
        );
        self.ui
            .show_duration(&timer::format_duration(ongoing.duration));
        self.ongoing = Some(ongoing);
        self.persist_checkpoint(now);
        self.persist_draft();
        Ok(true)
    }

    fn persist_checkpoint(&self, now: DateTime<Utc>) {
        let Some(ongoing) = &self.ongoing else {
            return;
        };
        if let Err(err) = self
            .repository
            .write_session_checkpoint(Some(&ongoing.checkpoint(now)))
        {
            error!("failed to write session checkpoint: {err}");
            self.ui.notify(STORAGE_FAILURE_NOTIFICATION);
        }
    }

    fn persist_draft(&self) {
        let Some(ongoing) = &self.ongoing else {
            return;
        };
        if let Err(err) = self.repository.write_draft_sets(Some(&ongoing.sets)) {
            error!("failed to write draft sets: {err}");
            self.ui.notify(STORAGE_FAILURE_NOTIFICATION);
        }
    }

    fn clear_persisted_session(&self) {
        if let Err(err) = self.repository.write_session_checkpoint(None) {
            error!("failed to clear session checkpoint: {err}");
            self.ui.notify(STORAGE_FAILURE_NOTIFICATION);
        }
        if let Err(err) = self.repository.write_draft_sets(None) {
            error!("failed to clear draft sets: {err}");
            self.ui.notify(STORAGE_FAILURE_NOTIFICATION);
        }
    }
}

/// The exercises of a finished session in catalog order, dropping sets with
/// both fields blank and exercises without any retained set.
fn recorded_exercises(
    program: &catalog::Program,
    draft_sets: &DraftSets,
) -> Vec<domain::ExerciseRecord> {
    program
        .exercises
        .iter()
        .filter_map(|name| {
            let sets = draft_sets
                .get(*name)
                .map(|sets| sets.iter().filter_map(SetDraft::entry).collect::<Vec<_>>())
                .unwrap_or_default();
            if sets.is_empty() {
                None
            } else {
                Some(domain::ExerciseRecord {
                    name: (*name).to_string(),
                    sets,
                })
            }
        })
        .collect()
}
