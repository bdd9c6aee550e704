//! Semester-based CGPA ledger.

mod grade;
mod ledger;

pub use grade::{Credits, Grade};
pub use ledger::{
    round2, CgpaReport, CgpaState, LedgerSummary, SemesterOutcome, SemesterSummary, Subject,
    SubjectUpdate,
};
