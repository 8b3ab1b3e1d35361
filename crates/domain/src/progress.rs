use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::{Weight, WorkoutRecord};

/// Summary statistics for one exercise across all workouts containing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseProgress {
    /// Number of workouts containing the exercise.
    pub workouts: usize,
    /// Heaviest single set across all matching workouts.
    pub best_weight: Weight,
    /// Total volume (weight times reps summed over all matching sets).
    pub total_volume: f32,
    /// Best weight minus the best weight of the earliest matching workout.
    pub improvement: f32,
    /// One bar per matching workout, by ascending date: the workout's top
    /// weight as a percentage of the overall best weight. All zero when the
    /// best weight is zero.
    pub bars: Vec<(DateTime<Utc>, f32)>,
}

/// Derive per-exercise progress from the workout collection.
///
/// Returns `None` when no workout contains the exercise.
#[must_use]
pub fn exercise_progress(workouts: &[WorkoutRecord], name: &str) -> Option<ExerciseProgress> {
    let mut matching = workouts
        .iter()
        .filter(|workout| workout.exercise(name).is_some())
        .collect::<Vec<_>>();

    if matching.is_empty() {
        return None;
    }

    matching.sort_by_key(|workout| workout.date);

    let best_weight = matching
        .iter()
        .filter_map(|workout| workout.max_weight_for(name))
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .unwrap_or_default();
    let total_volume = matching
        .iter()
        .filter_map(|workout| workout.exercise(name))
        .map(crate::ExerciseRecord::volume)
        .sum();
    let first_best = matching[0].max_weight_for(name).unwrap_or_default();
    let bars = matching
        .iter()
        .map(|workout| {
            let top = f32::from(workout.max_weight_for(name).unwrap_or_default());
            let height = if f32::from(best_weight) > 0.0 {
                top / f32::from(best_weight) * 100.0
            } else {
                0.0
            };
            (workout.date, height)
        })
        .collect();

    Some(ExerciseProgress {
        workouts: matching.len(),
        best_weight,
        total_volume,
        improvement: f32::from(best_weight) - f32::from(first_best),
        bars,
    })
}
