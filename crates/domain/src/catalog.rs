//! The built-in training programs.
//!
//! Programs are defined at startup and immutable. Saved workouts refer to
//! them by id and additionally record the program name, so renaming a
//! program does not rewrite history.

use derive_more::Display;

#[derive(Display, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProgramID(String);

impl ProgramID {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProgramID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Program {
    pub id: &'static str,
    pub name: &'static str,
    pub exercises: &'static [&'static str],
}

impl Program {
    #[must_use]
    pub fn program_id(&self) -> ProgramID {
        ProgramID::from(self.id)
    }
}

static PROGRAMS: [Program; 5] = [
    Program {
        id: "chest-triceps",
        name: "Chest & Triceps",
        exercises: &[
            "Bench Press",
            "Incline Dumbbell Press",
            "Chest Flyes",
            "Triceps Pushdown",
            "Overhead Triceps Ext",
        ],
    },
    Program {
        id: "shoulder-biceps",
        name: "Shoulder & Biceps",
        exercises: &[
            "Shoulder Press",
            "Lateral Raise",
            "Reverse Flies",
            "Curl Cable Front",
            "Curl Cable Back",
            "Hammer Curl",
        ],
    },
    Program {
        id: "back",
        name: "PullPass",
        exercises: &[
            "Chins",
            "Bred Maskin Rodd",
            "Lat Pull Down",
            "En Arm Lats Drag",
        ],
    },
    Program {
        id: "legs",
        name: "Legs",
        exercises: &["Squats", "Deadlifts", "Hipthrusters"],
    },
    Program {
        id: "abs",
        name: "Abs",
        exercises: &["Rope Curls"],
    },
];

/// All programs in declared order.
#[must_use]
pub fn programs() -> &'static [Program] {
    &PROGRAMS
}

#[must_use]
pub fn get_program(id: &ProgramID) -> Option<&'static Program> {
    PROGRAMS.iter().find(|program| program.id == id.as_str())
}
