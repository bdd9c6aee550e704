//! Display effects returned by [`crate::StudyDesk::dispatch`].

use serde::Serialize;

use crate::cgpa::Subject;
use crate::projection::Projection;
use crate::streak::StreakView;
use crate::task::Task;

/// Which panel a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageScope {
    Cgpa,
    Projection,
}

/// Every handled action produces display events.
/// The UI layer renders them; it never reads state behind the desk's back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Rebuild the task list.
    TasksRendered {
        tasks: Vec<Task>,
        done: usize,
        total: usize,
    },
    /// One row's checkbox changed.
    TaskToggled { index: usize, done: bool },
    /// Start the removal transition for a row; report back when it finishes.
    TaskRemovalStarted { index: usize },
    TaskInputCleared,
    TaskInputFocused,
    StreakRendered { view: StreakView },
    /// Rebuild the subject rows of the selected semester.
    SubjectsRendered {
        semester: String,
        subjects: Vec<Subject>,
    },
    RowPoints { id: String, points: u32 },
    /// Rows to highlight as invalid. Empty clears highlighting.
    RowErrors { ids: Vec<String> },
    /// Semester average, rounded to two decimals.
    SgpaShown { semester: String, sgpa: f64 },
    SgpaCleared,
    /// Cumulative average, rounded to two decimals.
    CgpaShown { cgpa: f64, total_credits: u32 },
    CgpaCleared,
    ProjectionShown { projection: Projection, message: String },
    Message { scope: MessageScope, text: String },
    DisplayModeChanged { screenshot_mode: bool },
}
