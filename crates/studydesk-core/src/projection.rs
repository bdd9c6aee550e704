//! Target CGPA projection.
//!
//! Works out the average grade points needed over the remaining credits to
//! land on a target cumulative average. Nothing here is persisted.

use serde::Serialize;
use thiserror::Error;

use crate::cgpa::{round2, Grade};

/// Inputs the projection cannot work with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Please fill all fields with valid numbers.")]
    MissingInput,

    #[error("Remaining credits must be greater than zero.")]
    NoRemainingCredits,

    #[error("Total credits must be greater than zero.")]
    NoTotalCredits,
}

/// Outcome of a projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Projection {
    /// Needs more than the best grade on every remaining credit.
    Unreachable { required: f64 },
    /// Even the lowest passing grade keeps the target.
    Secured { required: f64 },
    /// Average needed, with its nearest letter band.
    Needed { required: f64, grade: Grade },
}

impl Projection {
    pub fn required(&self) -> f64 {
        match self {
            Projection::Unreachable { required }
            | Projection::Secured { required }
            | Projection::Needed { required, .. } => *required,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Projection::Unreachable { required } => format!(
                "Target not reachable: you would need {:.2} grade points, above the maximum of 10 even with straight S grades.",
                required
            ),
            Projection::Secured { .. } => {
                "You're safe: even minimum passing grades keep you at or above the target.".to_string()
            }
            Projection::Needed { required, grade } => format!(
                "You need an average of {:.2} grade points (around grade {grade}) in your remaining credits.",
                round2(*required)
            ),
        }
    }
}

fn parse_number(raw: &str) -> Result<f64, ProjectionError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(ProjectionError::MissingInput)
}

/// Project from raw text inputs, as typed by the user.
pub fn project_inputs(
    current_cgpa: &str,
    completed_credits: &str,
    target_cgpa: &str,
    remaining_credits: &str,
) -> Result<Projection, ProjectionError> {
    project(
        parse_number(current_cgpa)?,
        parse_number(completed_credits)?,
        parse_number(target_cgpa)?,
        parse_number(remaining_credits)?,
    )
}

/// Required average = (target × total − current × completed) / remaining.
pub fn project(
    current_cgpa: f64,
    completed_credits: f64,
    target_cgpa: f64,
    remaining_credits: f64,
) -> Result<Projection, ProjectionError> {
    if [current_cgpa, completed_credits, target_cgpa, remaining_credits]
        .iter()
        .any(|n| !n.is_finite())
    {
        return Err(ProjectionError::MissingInput);
    }
    if remaining_credits <= 0.0 {
        return Err(ProjectionError::NoRemainingCredits);
    }
    let total_credits = completed_credits + remaining_credits;
    if total_credits <= 0.0 {
        return Err(ProjectionError::NoTotalCredits);
    }

    let required =
        (target_cgpa * total_credits - current_cgpa * completed_credits) / remaining_credits;

    Ok(if required > Grade::MAX_POINTS {
        Projection::Unreachable { required }
    } else if required <= Grade::MIN_POINTS {
        Projection::Secured { required }
    } else {
        Projection::Needed {
            required,
            // band from the displayed value so number and letter agree
            grade: Grade::for_points(round2(required)),
        }
    })
}
