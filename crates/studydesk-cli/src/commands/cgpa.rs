//! CGPA ledger commands for CLI.

use clap::Subcommand;
use studydesk_core::{Action, Credits, Grade, StudyDesk, SubjectUpdate};

use crate::common::{open_desk, render, short_id, subject_line, CliResult};

#[derive(Subcommand)]
pub enum CgpaAction {
    /// Add a blank subject (3 credits, grade S unless configured otherwise)
    Add {
        /// Semester to add to (default: the selected semester)
        #[arg(long)]
        semester: Option<String>,
    },
    /// Update a subject in the selected semester
    Set {
        /// Subject id or a unique prefix of it
        id: String,
        /// Subject name
        #[arg(long)]
        name: Option<String>,
        /// Credit weight: 2, 3 or 4
        #[arg(long)]
        credits: Option<Credits>,
        /// Letter grade: S, A, B, C, D, E or F
        #[arg(long)]
        grade: Option<Grade>,
    },
    /// Delete a subject from the selected semester
    Remove {
        /// Subject id or a unique prefix of it
        id: String,
    },
    /// Select a semester (created if new)
    Switch {
        /// Semester key, e.g. "1" or "2"
        semester: String,
    },
    /// Calculate SGPA for the selected semester and the overall CGPA
    Calc {
        /// Skip subject-name validation
        #[arg(long)]
        live: bool,
    },
    /// List subjects of the selected semester
    List {
        /// Print the subjects as JSON
        #[arg(long)]
        json: bool,
    },
    /// Per-semester summary with the overall CGPA
    Semesters {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Expand an id prefix to the full id of a subject in the selected semester.
fn resolve_id(desk: &StudyDesk, prefix: &str) -> Result<String, String> {
    let matches: Vec<&str> = desk
        .cgpa()
        .current_subjects()
        .iter()
        .map(|s| s.id.as_str())
        .filter(|id| id.starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => Err(format!(
            "no subject '{prefix}' in semester {}",
            desk.cgpa().current_semester
        )),
        _ => Err(format!("subject id '{prefix}' is ambiguous")),
    }
}

pub fn run(action: CgpaAction) -> CliResult {
    let mut desk = open_desk()?;

    match action {
        CgpaAction::Add { semester } => {
            let key = semester
                .as_deref()
                .map(|key| key.trim().to_string())
                .unwrap_or_else(|| desk.cgpa().current_semester.clone());
            let events = desk.dispatch(Action::AddSubject { semester })?;
            if let Some(subject) = desk.cgpa().semesters.get(&key).and_then(|s| s.last()) {
                println!("Subject added to semester {key}: {}", short_id(&subject.id));
            }
            render(&events);
        }
        CgpaAction::Set {
            id,
            name,
            credits,
            grade,
        } => {
            let id = resolve_id(&desk, &id)?;
            let updates: Vec<SubjectUpdate> = [
                name.map(SubjectUpdate::Name),
                credits.map(SubjectUpdate::Credits),
                grade.map(SubjectUpdate::Grade),
            ]
            .into_iter()
            .flatten()
            .collect();
            if updates.is_empty() {
                return Err("nothing to update: pass --name, --credits or --grade".into());
            }
            let mut last = Vec::new();
            for update in updates {
                last = desk.dispatch(Action::UpdateSubject {
                    id: id.clone(),
                    update,
                })?;
            }
            render(&last);
        }
        CgpaAction::Remove { id } => {
            let id = resolve_id(&desk, &id)?;
            let events = desk.dispatch(Action::RemoveSubject { id: id.clone() })?;
            println!("Subject removed: {}", short_id(&id));
            render(&events);
        }
        CgpaAction::Switch { semester } => {
            render(&desk.dispatch(Action::SwitchSemester { key: semester })?);
        }
        CgpaAction::Calc { live } => {
            render(&desk.dispatch(Action::CalculateCgpa { show_errors: !live })?);
        }
        CgpaAction::List { json } => {
            let subjects = desk.cgpa().current_subjects();
            if json {
                println!("{}", serde_json::to_string_pretty(subjects)?);
            } else {
                println!("Semester {}:", desk.cgpa().current_semester);
                if subjects.is_empty() {
                    println!("  (no subjects)");
                }
                for subject in subjects {
                    println!("{}", subject_line(subject));
                }
            }
        }
        CgpaAction::Semesters { json } => {
            let summary = desk.cgpa().summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                for line in &summary.semesters {
                    let marker = if line.semester == summary.current_semester {
                        "*"
                    } else {
                        " "
                    };
                    let sgpa = line
                        .sgpa
                        .map(|v| format!("{v:.2}"))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{marker} Semester {:<6} {:>2} subjects  {:>3} credits  SGPA {sgpa}",
                        line.semester, line.subjects, line.credits
                    );
                }
                match summary.cgpa {
                    Some(cgpa) => println!(
                        "Overall CGPA: {cgpa:.2} over {} credits",
                        summary.total_credits
                    ),
                    None => println!("Overall CGPA: -"),
                }
            }
        }
    }
    Ok(())
}
