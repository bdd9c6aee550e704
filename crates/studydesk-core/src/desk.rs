//! The study desk controller.
//!
//! Owns the state of every feature. Lifecycle per feature is
//! load-or-default on construction, then mutate and persist on each
//! dispatched action. Persistence is write-through: a record is saved before
//! the events describing the change are returned.
//!
//! ## Usage
//!
//! ```ignore
//! let mut desk = StudyDesk::open()?;
//! for event in desk.dispatch(Action::AddTask { text: "Revise limits".into() })? {
//!     render(event);
//! }
//! ```

use std::path::PathBuf;

use chrono::Duration;

use crate::action::Action;
use crate::cgpa::{round2, CgpaState, SemesterOutcome, SubjectUpdate};
use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, Result};
use crate::events::{Event, MessageScope};
use crate::projection::project_inputs;
use crate::storage::{
    load_state, save_state, Config, Database, KvStore, CGPA_KEY, STREAK_KEY, TASKS_KEY,
};
use crate::streak::{StreakChange, StreakState};
use crate::task::TaskList;

pub struct StudyDesk {
    store: Box<dyn KvStore>,
    clock: Box<dyn Clock>,
    config: Config,
    config_path: Option<PathBuf>,
    tasks: TaskList,
    streak: StreakState,
    cgpa: CgpaState,
}

impl StudyDesk {
    /// Open the desk on the default database and configuration.
    pub fn open() -> Result<Self> {
        let config_path = Config::path()?;
        let config = Config::load_from(&config_path)?;
        let db = Database::open()?;
        let mut desk = Self::with_store(Box::new(db), Box::new(SystemClock), config)?;
        desk.config_path = Some(config_path);
        Ok(desk)
    }

    /// Build a desk over any store and clock. Configuration changes stay in memory
    /// unless [`StudyDesk::persist_config_to`] is set.
    pub fn with_store(store: Box<dyn KvStore>, clock: Box<dyn Clock>, config: Config) -> Result<Self> {
        let tasks: TaskList = load_state(store.as_ref(), TASKS_KEY)?;
        let streak: StreakState = load_state(store.as_ref(), STREAK_KEY)?;
        let mut cgpa: CgpaState = load_state(store.as_ref(), CGPA_KEY)?;
        cgpa.normalize(&config.cgpa.default_semester);
        tracing::debug!(
            tasks = tasks.len(),
            streak = streak.count,
            semester = %cgpa.current_semester,
            "study desk loaded"
        );
        Ok(Self {
            store,
            clock,
            config,
            config_path: None,
            tasks,
            streak,
            cgpa,
        })
    }

    /// Save configuration changes (display mode) to `path`.
    pub fn persist_config_to(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn streak(&self) -> &StreakState {
        &self.streak
    }

    pub fn cgpa(&self) -> &CgpaState {
        &self.cgpa
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle one action to completion.
    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Event>> {
        tracing::trace!(?action, "dispatch");
        match action {
            Action::Refresh => {
                let mut events = vec![self.tasks_rendered(), self.streak_rendered()];
                events.push(self.subjects_rendered());
                events.extend(self.calculate(false));
                Ok(events)
            }
            Action::AddTask { text } => self.add_task(&text),
            Action::ToggleTask { index, done } => {
                let previous = self.tasks.clone();
                self.tasks.toggle_done(index, done)?;
                self.commit_tasks(previous)?;
                Ok(vec![Event::TaskToggled { index, done }])
            }
            Action::RemoveTask { index } => {
                self.tasks.begin_remove(index)?;
                Ok(vec![Event::TaskRemovalStarted { index }])
            }
            Action::FinishTaskRemoval { index } => {
                let previous = self.tasks.clone();
                self.tasks.finish_remove(index)?;
                self.commit_tasks(previous)?;
                Ok(vec![self.tasks_rendered()])
            }
            Action::FocusTaskInput => Ok(vec![Event::TaskInputFocused]),
            Action::AddSubject { semester } => self.add_subject(semester),
            Action::UpdateSubject { id, update } => self.update_subject(&id, update),
            Action::RemoveSubject { id } => {
                let previous = self.cgpa.clone();
                self.cgpa.remove_subject(&id)?;
                self.commit_cgpa(previous)?;
                let mut events = vec![self.subjects_rendered()];
                events.extend(self.calculate(false));
                Ok(events)
            }
            Action::SwitchSemester { key } => {
                let previous = self.cgpa.clone();
                self.cgpa.switch_semester(&key)?;
                self.commit_cgpa(previous)?;
                tracing::info!(semester = %self.cgpa.current_semester, "semester selected");
                let mut events = vec![self.subjects_rendered()];
                events.extend(self.calculate(false));
                Ok(events)
            }
            Action::CalculateCgpa { show_errors } => Ok(self.calculate(show_errors)),
            Action::ProjectTarget {
                current_cgpa,
                completed_credits,
                target_cgpa,
                remaining_credits,
            } => {
                let event = match project_inputs(
                    &current_cgpa,
                    &completed_credits,
                    &target_cgpa,
                    &remaining_credits,
                ) {
                    Ok(projection) => Event::ProjectionShown {
                        message: projection.message(),
                        projection,
                    },
                    Err(e) => Event::Message {
                        scope: MessageScope::Projection,
                        text: e.to_string(),
                    },
                };
                Ok(vec![event])
            }
            Action::ToggleDisplayMode => {
                self.config.ui.screenshot_mode = !self.config.ui.screenshot_mode;
                if let Some(path) = &self.config_path {
                    if let Err(e) = self.config.save_to(path) {
                        self.config.ui.screenshot_mode = !self.config.ui.screenshot_mode;
                        return Err(e.into());
                    }
                }
                Ok(vec![Event::DisplayModeChanged {
                    screenshot_mode: self.config.ui.screenshot_mode,
                }])
            }
            Action::Reset { tasks, streak, cgpa } => self.reset(tasks, streak, cgpa),
        }
    }

    fn add_task(&mut self, text: &str) -> Result<Vec<Event>> {
        let previous = self.tasks.clone();
        if self.tasks.add(text).is_none() {
            return Ok(Vec::new());
        }
        self.commit_tasks(previous)?;

        let mut events = Vec::with_capacity(3);
        let tolerance = Duration::hours(i64::from(self.config.streak.yesterday_tolerance_hours));
        let previous = self.streak.clone();
        let change = self.streak.advance(self.clock.today(), tolerance);
        if change != StreakChange::AlreadyCounted {
            self.commit_streak(previous)?;
            events.push(self.streak_rendered());
        }
        events.push(self.tasks_rendered());
        events.push(Event::TaskInputCleared);
        Ok(events)
    }

    fn add_subject(&mut self, semester: Option<String>) -> Result<Vec<Event>> {
        let semester = semester.unwrap_or_else(|| self.cgpa.current_semester.clone());
        let defaults = &self.config.cgpa;
        let previous = self.cgpa.clone();
        let id = self
            .cgpa
            .add_subject(&semester, defaults.default_credits, defaults.default_grade)?
            .id
            .clone();
        self.commit_cgpa(previous)?;

        let mut events = Vec::new();
        if self.cgpa.current_subjects().iter().any(|s| s.id == id) {
            events.push(self.subjects_rendered());
        }
        events.extend(self.calculate(false));
        Ok(events)
    }

    fn update_subject(&mut self, id: &str, update: SubjectUpdate) -> Result<Vec<Event>> {
        let previous = self.cgpa.clone();
        let points = self.cgpa.update_subject(id, update)?.points();
        self.commit_cgpa(previous)?;
        let mut events = vec![Event::RowPoints {
            id: id.to_string(),
            points,
        }];
        events.extend(self.calculate(false));
        Ok(events)
    }

    fn calculate(&self, show_errors: bool) -> Vec<Event> {
        let report = self.cgpa.calculate(show_errors);
        let mut events = Vec::new();

        let message = report.outcome.message();
        match report.outcome {
            SemesterOutcome::Sgpa { value, .. } => {
                if show_errors {
                    events.push(Event::RowErrors { ids: Vec::new() });
                }
                events.push(Event::SgpaShown {
                    semester: report.semester,
                    sgpa: round2(value),
                });
            }
            SemesterOutcome::MissingNames { ids } => {
                events.push(Event::RowErrors { ids });
                events.push(Event::SgpaCleared);
            }
            SemesterOutcome::NoSubjects | SemesterOutcome::ZeroCredits => {
                events.push(Event::SgpaCleared);
            }
        }
        if show_errors {
            if let Some(text) = message {
                events.push(Event::Message {
                    scope: MessageScope::Cgpa,
                    text: text.to_string(),
                });
            }
        }

        events.push(match report.cgpa {
            Some(cgpa) => Event::CgpaShown {
                cgpa: round2(cgpa),
                total_credits: report.total_credits,
            },
            None => Event::CgpaCleared,
        });
        events
    }

    fn reset(&mut self, tasks: bool, streak: bool, cgpa: bool) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        if tasks {
            self.store.remove(TASKS_KEY)?;
            self.tasks = TaskList::default();
            events.push(self.tasks_rendered());
        }
        if streak {
            self.store.remove(STREAK_KEY)?;
            self.streak = StreakState::default();
            events.push(self.streak_rendered());
        }
        if cgpa {
            self.store.remove(CGPA_KEY)?;
            self.cgpa = CgpaState::new(&self.config.cgpa.default_semester);
            events.push(self.subjects_rendered());
            events.extend(self.calculate(false));
        }
        tracing::info!(tasks, streak, cgpa, "stored records reset");
        Ok(events)
    }

    // The commit_* helpers persist the in-memory record, restoring `previous`
    // when the write fails so memory never runs ahead of storage.

    fn commit_tasks(&mut self, previous: TaskList) -> Result<(), CoreError> {
        if let Err(e) = save_state(self.store.as_mut(), TASKS_KEY, &self.tasks) {
            self.tasks = previous;
            return Err(e);
        }
        Ok(())
    }

    fn commit_streak(&mut self, previous: StreakState) -> Result<(), CoreError> {
        if let Err(e) = save_state(self.store.as_mut(), STREAK_KEY, &self.streak) {
            self.streak = previous;
            return Err(e);
        }
        Ok(())
    }

    fn commit_cgpa(&mut self, previous: CgpaState) -> Result<(), CoreError> {
        if let Err(e) = save_state(self.store.as_mut(), CGPA_KEY, &self.cgpa) {
            self.cgpa = previous;
            return Err(e);
        }
        Ok(())
    }

    fn tasks_rendered(&self) -> Event {
        Event::TasksRendered {
            tasks: self.tasks.as_slice().to_vec(),
            done: self.tasks.done_count(),
            total: self.tasks.len(),
        }
    }

    fn streak_rendered(&self) -> Event {
        Event::StreakRendered {
            view: self.streak.view(self.config.streak.hot_threshold),
        }
    }

    fn subjects_rendered(&self) -> Event {
        Event::SubjectsRendered {
            semester: self.cgpa.current_semester.clone(),
            subjects: self.cgpa.current_subjects().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cgpa::{Credits, Grade};
    use crate::clock::FixedClock;
    use crate::error::DatabaseError;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Memory store that refuses writes to keys starting with the locked prefix.
    struct LockableStore {
        inner: MemoryStore,
        locked: Rc<Cell<Option<&'static str>>>,
    }

    impl LockableStore {
        fn check(&self, key: &str) -> Result<(), DatabaseError> {
            match self.locked.get() {
                Some(prefix) if key.starts_with(prefix) => Err(DatabaseError::Locked),
                _ => Ok(()),
            }
        }
    }

    impl KvStore for LockableStore {
        fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), DatabaseError> {
            self.check(key)?;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), DatabaseError> {
            self.check(key)?;
            self.inner.remove(key)
        }
    }

    fn lockable_desk() -> (StudyDesk, Rc<Cell<Option<&'static str>>>) {
        let locked = Rc::new(Cell::new(None));
        let store = LockableStore {
            inner: MemoryStore::new(),
            locked: Rc::clone(&locked),
        };
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        let desk =
            StudyDesk::with_store(Box::new(store), Box::new(clock), Config::default()).unwrap();
        (desk, locked)
    }

    fn desk() -> StudyDesk {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        StudyDesk::with_store(Box::new(MemoryStore::new()), Box::new(clock), Config::default())
            .unwrap()
    }

    #[test]
    fn blank_task_is_silently_ignored() {
        let mut desk = desk();
        assert!(desk.dispatch(Action::AddTask { text: "  ".into() }).unwrap().is_empty());
        assert!(desk.tasks().is_empty());
        assert_eq!(desk.streak().count, 0);
    }

    #[test]
    fn adding_task_renders_streak_once_per_day() {
        let mut desk = desk();
        let first = desk.dispatch(Action::AddTask { text: "a".into() }).unwrap();
        assert!(first.iter().any(|e| matches!(e, Event::StreakRendered { .. })));
        assert_eq!(first.last(), Some(&Event::TaskInputCleared));

        let second = desk.dispatch(Action::AddTask { text: "b".into() }).unwrap();
        assert!(!second.iter().any(|e| matches!(e, Event::StreakRendered { .. })));
        assert_eq!(desk.streak().count, 1);
    }

    #[test]
    fn removal_waits_for_transition() {
        let mut desk = desk();
        desk.dispatch(Action::AddTask { text: "a".into() }).unwrap();
        let events = desk.dispatch(Action::RemoveTask { index: 0 }).unwrap();
        assert_eq!(events, vec![Event::TaskRemovalStarted { index: 0 }]);
        assert_eq!(desk.tasks().len(), 1);

        desk.dispatch(Action::FinishTaskRemoval { index: 0 }).unwrap();
        assert!(desk.tasks().is_empty());
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut desk = desk();
        let err = desk
            .dispatch(Action::ToggleTask { index: 3, done: true })
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn validated_calculation_on_empty_semester() {
        let mut desk = desk();
        let events = desk.dispatch(Action::CalculateCgpa { show_errors: true }).unwrap();
        assert!(events.contains(&Event::Message {
            scope: MessageScope::Cgpa,
            text: "Add at least one subject first.".into(),
        }));
        assert!(!events.iter().any(|e| matches!(e, Event::SgpaShown { .. })));
    }

    #[test]
    fn subject_defaults_come_from_config() {
        let mut config = Config::default();
        config.cgpa.default_credits = Credits::Four;
        config.cgpa.default_grade = Grade::B;
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        let mut desk =
            StudyDesk::with_store(Box::new(MemoryStore::new()), Box::new(clock), config).unwrap();
        desk.dispatch(Action::AddSubject { semester: None }).unwrap();
        let subject = &desk.cgpa().current_subjects()[0];
        assert_eq!(subject.credits, Credits::Four);
        assert_eq!(subject.grade, Grade::B);
        assert!(subject.name.is_empty());
    }

    #[test]
    fn update_emits_row_points_and_live_totals() {
        let mut desk = desk();
        desk.dispatch(Action::AddSubject { semester: None }).unwrap();
        let id = desk.cgpa().current_subjects()[0].id.clone();
        let events = desk
            .dispatch(Action::UpdateSubject {
                id: id.clone(),
                update: SubjectUpdate::Grade(Grade::A),
            })
            .unwrap();
        assert_eq!(events[0], Event::RowPoints { id, points: 27 });
        // blank name does not block the live path
        assert!(events.contains(&Event::SgpaShown {
            semester: "1".into(),
            sgpa: 9.0
        }));
        assert!(!events.iter().any(|e| matches!(e, Event::Message { .. })));
    }

    #[test]
    fn failed_write_leaves_state_untouched() {
        let (mut desk, locked) = lockable_desk();
        desk.dispatch(Action::AddTask { text: "a".into() }).unwrap();
        desk.dispatch(Action::AddSubject { semester: None }).unwrap();
        let tasks = desk.tasks().clone();
        let cgpa = desk.cgpa().clone();
        locked.set(Some(""));

        let err = desk.dispatch(Action::AddTask { text: "b".into() }).unwrap_err();
        assert!(matches!(err, CoreError::Database(DatabaseError::Locked)));
        assert!(desk
            .dispatch(Action::ToggleTask { index: 0, done: true })
            .is_err());
        desk.dispatch(Action::RemoveTask { index: 0 }).unwrap();
        assert!(desk.dispatch(Action::FinishTaskRemoval { index: 0 }).is_err());
        assert_eq!(desk.tasks().len(), tasks.len());
        assert!(!desk.tasks().as_slice()[0].done);

        assert!(desk.dispatch(Action::AddSubject { semester: None }).is_err());
        assert!(desk
            .dispatch(Action::SwitchSemester { key: "2".into() })
            .is_err());
        assert_eq!(desk.cgpa(), &cgpa);
    }

    #[test]
    fn failed_streak_write_keeps_old_count() {
        let (mut desk, locked) = lockable_desk();
        locked.set(Some(STREAK_KEY));
        assert!(desk.dispatch(Action::AddTask { text: "a".into() }).is_err());
        // the task record itself was written
        assert_eq!(desk.tasks().len(), 1);
        assert_eq!(desk.streak(), &StreakState::default());

        locked.set(None);
        desk.dispatch(Action::AddTask { text: "b".into() }).unwrap();
        assert_eq!(desk.streak().count, 1);
    }

    #[test]
    fn blank_semester_key_is_rejected() {
        let mut desk = desk();
        let err = desk
            .dispatch(Action::AddSubject {
                semester: Some("  ".into()),
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(desk.cgpa().semester_keys(), vec!["1"]);
    }

    #[test]
    fn padded_semester_key_reaches_the_trimmed_bucket() {
        let mut desk = desk();
        let events = desk
            .dispatch(Action::AddSubject {
                semester: Some(" 1 ".into()),
            })
            .unwrap();
        assert!(matches!(events[0], Event::SubjectsRendered { .. }));
        assert_eq!(desk.cgpa().current_subjects().len(), 1);
        assert_eq!(desk.cgpa().semester_keys(), vec!["1"]);
    }

    #[test]
    fn first_semester_comes_from_config() {
        let mut config = Config::default();
        config.set("cgpa.default_semester", "Fall").unwrap();
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        let mut desk =
            StudyDesk::with_store(Box::new(MemoryStore::new()), Box::new(clock), config).unwrap();
        assert_eq!(desk.cgpa().current_semester, "Fall");

        desk.dispatch(Action::SwitchSemester { key: "2".into() }).unwrap();
        desk.dispatch(Action::Reset {
            tasks: false,
            streak: false,
            cgpa: true,
        })
        .unwrap();
        assert_eq!(desk.cgpa().current_semester, "Fall");
        assert_eq!(desk.cgpa().semester_keys(), vec!["Fall"]);
    }

    #[test]
    fn toggle_display_mode_without_path_stays_in_memory() {
        let mut desk = desk();
        let events = desk.dispatch(Action::ToggleDisplayMode).unwrap();
        assert_eq!(
            events,
            vec![Event::DisplayModeChanged {
                screenshot_mode: true
            }]
        );
        assert!(desk.config().ui.screenshot_mode);
    }

    #[test]
    fn projection_errors_become_messages() {
        let mut desk = desk();
        let events = desk
            .dispatch(Action::ProjectTarget {
                current_cgpa: "8".into(),
                completed_credits: "60".into(),
                target_cgpa: "8.5".into(),
                remaining_credits: "0".into(),
            })
            .unwrap();
        assert_eq!(
            events,
            vec![Event::Message {
                scope: MessageScope::Projection,
                text: "Remaining credits must be greater than zero.".into(),
            }]
        );
    }
}
