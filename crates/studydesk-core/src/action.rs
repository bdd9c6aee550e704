//! Actions accepted by [`crate::StudyDesk::dispatch`].

use crate::cgpa::SubjectUpdate;

/// A user intent, already translated from a raw UI event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Redraw everything from state, as on startup.
    Refresh,

    AddTask { text: String },
    ToggleTask { index: usize, done: bool },
    /// First removal phase: play the transition.
    RemoveTask { index: usize },
    /// Second removal phase: the transition finished.
    FinishTaskRemoval { index: usize },
    FocusTaskInput,

    /// Add a blank subject. `None` targets the selected semester.
    AddSubject { semester: Option<String> },
    UpdateSubject { id: String, update: SubjectUpdate },
    RemoveSubject { id: String },
    SwitchSemester { key: String },
    CalculateCgpa { show_errors: bool },

    ProjectTarget {
        current_cgpa: String,
        completed_credits: String,
        target_cgpa: String,
        remaining_credits: String,
    },

    ToggleDisplayMode,

    /// Forget persisted records for the chosen features.
    Reset { tasks: bool, streak: bool, cgpa: bool },
}
