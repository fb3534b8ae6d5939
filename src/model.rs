//! The `Problem` entity and its status lifecycle.

use crate::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// Message returned when a caller supplies anything outside [`Status::ALL`].
    pub fn invalid_message() -> String {
        let allowed: Vec<&str> = Self::ALL.iter().map(Status::as_str).collect();
        format!("Invalid status. Allowed values: {:?}", allowed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::Validation(Self::invalid_message()))
    }
}

/// A persisted problem as returned by every endpoint. Absent optional fields
/// serialize as `null`; `deadline_date` as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    pub id: i64,
    pub title: String,
    pub topic: Option<String>,
    pub difficulty: Option<i64>,
    pub status: Status,
    pub deadline_date: Option<NaiveDate>,
}

/// Validated fields for an insert; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProblem {
    pub title: String,
    pub topic: Option<String>,
    pub difficulty: Option<i64>,
    pub status: Status,
    pub deadline_date: Option<NaiveDate>,
}

/// Raw table row; status is kept as text until decoded.
#[derive(Debug, sqlx::FromRow)]
pub struct ProblemRow {
    pub id: i64,
    pub title: String,
    pub topic: Option<String>,
    pub difficulty: Option<i64>,
    pub status: String,
    pub deadline_date: Option<NaiveDate>,
}

impl TryFrom<ProblemRow> for Problem {
    type Error = AppError;

    fn try_from(row: ProblemRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<Status>().map_err(|_| {
            AppError::Internal(format!("problem {} has unknown status '{}'", row.id, row.status))
        })?;
        Ok(Problem {
            id: row.id,
            title: row.title,
            topic: row.topic,
            difficulty: row.difficulty,
            status,
            deadline_date: row.deadline_date,
        })
    }
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";
