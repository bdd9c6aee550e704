//! Ordered study to-do list.
//!
//! Removal happens in two phases so the UI can play a removal transition:
//! [`TaskList::begin_remove`] marks the row, [`TaskList::finish_remove`]
//! drops it once the transition has finished. Until then the row keeps its
//! index.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A study item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub done: bool,
    /// Removal transition in progress. Never persisted.
    #[serde(skip)]
    pub removing: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
            removing: false,
        }
    }
}

/// Insertion-ordered task sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    fn check(&self, index: usize) -> Result<(), ValidationError> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(ValidationError::OutOfBounds {
                collection: "tasks".to_string(),
                index,
                len: self.tasks.len(),
            })
        }
    }

    /// Append a task. Blank text is ignored and yields `None`.
    pub fn add(&mut self, text: &str) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.tasks.push(Task::new(text));
        self.tasks.last()
    }

    /// Set the done flag of the task at `index`.
    pub fn toggle_done(&mut self, index: usize, done: bool) -> Result<(), ValidationError> {
        self.check(index)?;
        self.tasks[index].done = done;
        Ok(())
    }

    /// Mark the task at `index` as leaving. The list itself is unchanged.
    pub fn begin_remove(&mut self, index: usize) -> Result<(), ValidationError> {
        self.check(index)?;
        self.tasks[index].removing = true;
        Ok(())
    }

    /// Drop a task whose removal transition has finished.
    pub fn finish_remove(&mut self, index: usize) -> Result<Task, ValidationError> {
        self.check(index)?;
        if !self.tasks[index].removing {
            return Err(ValidationError::InvalidValue {
                field: "index".to_string(),
                message: format!("no removal pending for task {index}"),
            });
        }
        Ok(self.tasks.remove(index))
    }
}
