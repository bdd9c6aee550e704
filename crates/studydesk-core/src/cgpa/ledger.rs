//! Semester-scoped subject ledger and grade-point aggregation.
//!
//! Each semester bucket owns an ordered list of subjects. The semester
//! average (SGPA) only looks at the selected bucket while the cumulative
//! average (CGPA) always spans every bucket.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::grade::{Credits, Grade};
use crate::error::ValidationError;

const DEFAULT_SEMESTER: &str = "1";

/// One graded subject in a semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub credits: Credits,
    pub grade: Grade,
}

impl Subject {
    /// New unnamed subject with a fresh id.
    pub fn new(credits: Credits, grade: Grade) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            credits,
            grade,
        }
    }

    /// Credit-weighted grade points contributed by this row.
    pub fn points(&self) -> u32 {
        self.credits.value() * self.grade.points()
    }

    fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// A change to one field of a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectUpdate {
    Name(String),
    Credits(Credits),
    Grade(Grade),
}

/// What the semester half of a calculation produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SemesterOutcome {
    /// Credit-weighted average, unrounded.
    Sgpa { value: f64, credits: u32 },
    /// The selected semester has no subjects.
    NoSubjects,
    /// Subjects with blank names, by id. Only produced when validating.
    MissingNames { ids: Vec<String> },
    /// Credits in the semester sum to zero.
    ZeroCredits,
}

impl SemesterOutcome {
    /// Guidance text for outcomes that carry no average.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SemesterOutcome::Sgpa { .. } => None,
            SemesterOutcome::NoSubjects => Some("Add at least one subject first."),
            SemesterOutcome::MissingNames { .. } => {
                Some("Please enter a name for every subject before calculating.")
            }
            SemesterOutcome::ZeroCredits => Some("Total credits cannot be zero."),
        }
    }
}

/// Result of [`CgpaState::calculate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CgpaReport {
    pub semester: String,
    pub outcome: SemesterOutcome,
    /// Cumulative average across every semester, when any credits exist.
    pub cgpa: Option<f64>,
    pub total_credits: u32,
}

/// Per-semester line in a [`LedgerSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterSummary {
    pub semester: String,
    pub subjects: usize,
    pub credits: u32,
    pub sgpa: Option<f64>,
}

/// Every semester at a glance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub current_semester: String,
    pub semesters: Vec<SemesterSummary>,
    pub total_credits: u32,
    pub cgpa: Option<f64>,
}

/// Persisted CGPA ledger.
///
/// The default value is an empty ledger with no selected semester; call
/// [`CgpaState::normalize`] (or build with [`CgpaState::new`]) before use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CgpaState {
    #[serde(default)]
    pub current_semester: String,
    #[serde(default)]
    pub semesters: BTreeMap<String, Vec<Subject>>,
}

/// Trim a semester key, rejecting a blank one.
fn semester_key(key: &str) -> Result<&str, ValidationError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "semester".to_string(),
            message: "semester key cannot be blank".to_string(),
        });
    }
    Ok(key)
}

/// Sum of (credits, credits × points) over a set of subjects.
fn totals<'a>(subjects: impl IntoIterator<Item = &'a Subject>) -> (u32, u32) {
    subjects
        .into_iter()
        .fold((0, 0), |(credits, points), s| {
            (credits + s.credits.value(), points + s.points())
        })
}

fn average(credits: u32, points: u32) -> Option<f64> {
    (credits > 0).then(|| points as f64 / credits as f64)
}

/// Round to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl CgpaState {
    /// Empty ledger with `first_semester` selected.
    pub fn new(first_semester: &str) -> Self {
        let mut state = Self::default();
        state.normalize(first_semester);
        state
    }

    /// Restore the selected-semester invariant after loading.
    ///
    /// A blank selection falls back to `first_semester`, or to `"1"` when that
    /// is blank too.
    pub fn normalize(&mut self, first_semester: &str) {
        if self.current_semester.trim().is_empty() {
            self.current_semester = semester_key(first_semester)
                .unwrap_or(DEFAULT_SEMESTER)
                .to_string();
        }
        self.semesters
            .entry(self.current_semester.clone())
            .or_default();
    }

    /// Subjects of the selected semester.
    pub fn current_subjects(&self) -> &[Subject] {
        self.semesters
            .get(&self.current_semester)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Semester keys, numeric keys in numeric order followed by the rest.
    pub fn semester_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.semesters.keys().cloned().collect();
        keys.sort_by(|a, b| match (a.parse::<u32>(), b.parse::<u32>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        });
        keys
    }

    /// Append a blank subject to `semester`, creating the bucket if needed.
    pub fn add_subject(
        &mut self,
        semester: &str,
        credits: Credits,
        grade: Grade,
    ) -> Result<&Subject, ValidationError> {
        let key = semester_key(semester)?;
        let bucket = self.semesters.entry(key.to_string()).or_default();
        bucket.push(Subject::new(credits, grade));
        Ok(&bucket[bucket.len() - 1])
    }

    fn unknown(&self, id: &str) -> ValidationError {
        ValidationError::UnknownSubject {
            id: id.to_string(),
            semester: self.current_semester.clone(),
        }
    }

    /// Change one field of a subject in the selected semester.
    pub fn update_subject(
        &mut self,
        id: &str,
        update: SubjectUpdate,
    ) -> Result<&Subject, ValidationError> {
        let err = self.unknown(id);
        let subject = self
            .semesters
            .get_mut(&self.current_semester)
            .and_then(|subjects| subjects.iter_mut().find(|s| s.id == id))
            .ok_or(err)?;
        match update {
            SubjectUpdate::Name(name) => subject.name = name,
            SubjectUpdate::Credits(credits) => subject.credits = credits,
            SubjectUpdate::Grade(grade) => subject.grade = grade,
        }
        Ok(subject)
    }

    /// Remove a subject from the selected semester.
    pub fn remove_subject(&mut self, id: &str) -> Result<Subject, ValidationError> {
        let err = self.unknown(id);
        let subjects = self
            .semesters
            .get_mut(&self.current_semester)
            .ok_or_else(|| err.clone())?;
        let pos = subjects.iter().position(|s| s.id == id).ok_or(err)?;
        Ok(subjects.remove(pos))
    }

    /// Select a semester, creating an empty bucket when it is new.
    pub fn switch_semester(&mut self, key: &str) -> Result<(), ValidationError> {
        let key = semester_key(key)?;
        self.current_semester = key.to_string();
        self.semesters.entry(key.to_string()).or_default();
        Ok(())
    }

    /// Credits and cumulative average over every semester.
    pub fn overall(&self) -> (u32, Option<f64>) {
        let (credits, points) = totals(self.semesters.values().flatten());
        (credits, average(credits, points))
    }

    /// Compute the selected semester's SGPA and the overall CGPA.
    ///
    /// With `show_errors` every blank-named row is reported and the semester
    /// average is withheld. Without it names are ignored. The cumulative
    /// average is reported whenever any credits exist, whatever the semester
    /// outcome.
    pub fn calculate(&self, show_errors: bool) -> CgpaReport {
        let subjects = self.current_subjects();
        let outcome = if subjects.is_empty() {
            SemesterOutcome::NoSubjects
        } else {
            let unnamed: Vec<String> = subjects
                .iter()
                .filter(|s| !s.has_name())
                .map(|s| s.id.clone())
                .collect();
            if show_errors && !unnamed.is_empty() {
                SemesterOutcome::MissingNames { ids: unnamed }
            } else {
                let (credits, points) = totals(subjects);
                match average(credits, points) {
                    Some(value) => SemesterOutcome::Sgpa { value, credits },
                    None => SemesterOutcome::ZeroCredits,
                }
            }
        };

        let (total_credits, cgpa) = self.overall();
        CgpaReport {
            semester: self.current_semester.clone(),
            outcome,
            cgpa,
            total_credits,
        }
    }

    /// Per-semester SGPA plus the cumulative average.
    pub fn summary(&self) -> LedgerSummary {
        let semesters = self
            .semester_keys()
            .into_iter()
            .map(|key| {
                let subjects = self.semesters.get(&key).map(Vec::as_slice).unwrap_or(&[]);
                let (credits, points) = totals(subjects);
                SemesterSummary {
                    semester: key,
                    subjects: subjects.len(),
                    credits,
                    sgpa: average(credits, points),
                }
            })
            .collect();
        let (total_credits, cgpa) = self.overall();
        LedgerSummary {
            current_semester: self.current_semester.clone(),
            semesters,
            total_credits,
            cgpa,
        }
    }
}
