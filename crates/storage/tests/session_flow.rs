//! Full session lifecycle against the in-memory backend: start a workout,
//! record sets, lose the process, restore from the checkpoint, save, and
//! manage the resulting history.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use chrono::{Duration, Utc};

use styrka_domain::{self as domain, WorkoutService, catalog};
use styrka_storage::memory::Memory;
use styrka_web_app::session::{SessionService, SetField, UI};
use styrka_web_app::{DraftSets, SetDraft};

#[derive(Default)]
struct ScriptedUI {
    accept: Cell<bool>,
    notifications: RefCell<Vec<String>>,
}

impl UI for ScriptedUI {
    fn confirm(&self, _message: &str) -> bool {
        self.accept.get()
    }

    fn notify(&self, message: &str) {
        self.notifications.borrow_mut().push(message.to_string());
    }

    fn show_duration(&self, _duration: &str) {}

    fn render_workout_form(&self, _program: &catalog::Program, _draft_sets: &DraftSets) {}

    fn render_last_workout(&self, _workout: Option<&domain::WorkoutRecord>) {}
}

type Session = SessionService<Rc<Memory>, domain::Service<Rc<Memory>>, Rc<ScriptedUI>>;

fn new_session(memory: &Rc<Memory>, ui: &Rc<ScriptedUI>) -> Session {
    SessionService::new(
        Rc::clone(memory),
        domain::Service::new(Rc::clone(memory)),
        Rc::clone(ui),
    )
}

#[test]
fn test_crash_recovery_and_save() {
    let memory = Rc::new(Memory::default());
    let ui = Rc::new(ScriptedUI::default());
    ui.accept.set(true);
    let now = Utc::now();

    let mut first = new_session(&memory, &ui);
    first
        .open_workout(&domain::ProgramID::from("legs"), now)
        .unwrap();
    first.add_set("Squats", now);
    first.edit_set("Squats", 1, SetField::Weight, "100", now);
    first.edit_set("Squats", 1, SetField::Reps, "5", now);
    first.tick(now + Duration::seconds(60));
    assert!(memory.session_checkpoint().is_some());

    // the page dies without request_exit or save_workout; the next start
    // finds the checkpoint and offers restoration
    drop(first);
    let mut second = new_session(&memory, &ui);
    let restore_time = now + Duration::minutes(10);
    assert!(second.recover(restore_time).unwrap());

    let ongoing = second.ongoing().unwrap();
    assert_eq!(
        ongoing.sets["Squats"],
        vec![
            SetDraft::default(),
            SetDraft {
                weight: String::from("100"),
                reps: String::from("5"),
            },
        ]
    );
    // one minute on the clock at checkpoint time plus nine minutes downtime
    assert_eq!(ongoing.duration, Duration::minutes(10));

    let save_time = now + Duration::minutes(20);
    assert!(second.save_workout(save_time).unwrap());
    assert!(memory.session_checkpoint().is_none());
    assert!(
        ui.notifications
            .borrow()
            .iter()
            .any(|notification| notification.contains("saved"))
    );

    let workouts = domain::Service::new(Rc::clone(&memory))
        .get_workouts()
        .unwrap();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0].program_name, "Legs");
    assert_eq!(workouts[0].duration, Duration::minutes(20));
    assert_eq!(
        workouts[0].exercises,
        vec![domain::ExerciseRecord {
            name: String::from("Squats"),
            sets: vec![domain::SetEntry {
                weight: domain::Weight::new(100.0).unwrap(),
                reps: domain::Reps::new(5).unwrap(),
            }],
        }]
    );

    // nothing left to restore
    let mut third = new_session(&memory, &ui);
    assert!(!third.recover(save_time + Duration::minutes(1)).unwrap());
}

#[test]
fn test_abandoned_session_leaves_no_trace() {
    let memory = Rc::new(Memory::default());
    let ui = Rc::new(ScriptedUI::default());
    ui.accept.set(true);
    let now = Utc::now();

    let mut session = new_session(&memory, &ui);
    session
        .open_workout(&domain::ProgramID::from("abs"), now)
        .unwrap();
    session.edit_set("Rope Curls", 0, SetField::Reps, "20", now);
    assert!(session.request_exit());

    assert!(memory.session_checkpoint().is_none());
    let mut next = new_session(&memory, &ui);
    assert!(!next.recover(now + Duration::minutes(1)).unwrap());
    assert!(
        domain::Service::new(Rc::clone(&memory))
            .get_workouts()
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_history_after_multiple_saves() {
    let memory = Rc::new(Memory::default());
    let ui = Rc::new(ScriptedUI::default());
    ui.accept.set(true);
    let now = Utc::now();

    for (offset, weight) in [(0, "80"), (1, "90"), (2, "85")] {
        let mut session = new_session(&memory, &ui);
        let opened = now + Duration::days(offset);
        session
            .open_workout(&domain::ProgramID::from("legs"), opened)
            .unwrap();
        session.edit_set("Squats", 0, SetField::Weight, weight, opened);
        session.edit_set("Squats", 0, SetField::Reps, "5", opened);
        assert!(
            session
                .save_workout(opened + Duration::minutes(45))
                .unwrap()
        );
    }

    let service = domain::Service::new(Rc::clone(&memory));
    let workouts = service.get_workouts().unwrap();
    assert_eq!(workouts.len(), 3);

    let progress = service.exercise_progress("Squats").unwrap().unwrap();
    assert_eq!(progress.workouts, 3);
    assert_eq!(progress.best_weight, domain::Weight::new(90.0).unwrap());
    assert!((progress.improvement - 10.0).abs() < f32::EPSILON);

    // delete the most recent entry of the history view by its id
    let sorted = domain::history(&workouts, None);
    let most_recent = sorted[0].id;
    service.delete_workout(most_recent).unwrap();
    let remaining = service.get_workouts().unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|workout| workout.id != most_recent));
}
