//! Request body parsing and field validation.

use crate::error::AppError;
use crate::model::{NewProblem, Status, DATE_FORMAT};
use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const STATUS_REQUIRED: &str = "Status is required";
pub const INVALID_DEADLINE: &str = "Invalid deadline_date format. Use YYYY-MM-DD";
pub const INVALID_BODY: &str = "Request body must be a JSON object";

pub struct RequestValidator;

impl RequestValidator {
    /// Parse a raw body. An empty body yields `None`; anything that is not a
    /// JSON object is a validation error.
    pub fn parse_body(bytes: &[u8]) -> Result<Option<Map<String, Value>>, AppError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(m)) => Ok(Some(m)),
            Ok(Value::Null) => Ok(None),
            _ => Err(AppError::Validation(INVALID_BODY.into())),
        }
    }

    /// Validate a create payload. Title first, then the optional fields.
    pub fn new_problem(body: Option<&Map<String, Value>>) -> Result<NewProblem, AppError> {
        let body = body.ok_or_else(|| AppError::Validation(TITLE_REQUIRED.into()))?;

        let title = match body.get("title") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => return Err(AppError::Validation(TITLE_REQUIRED.into())),
        };

        let topic = match body.get("topic") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(AppError::Validation("topic must be a string".into())),
        };

        let difficulty = match body.get("difficulty") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                v.as_i64()
                    .ok_or_else(|| AppError::Validation("difficulty must be an integer".into()))?,
            ),
        };

        let status = match body.get("status") {
            None | Some(Value::Null) => Status::default(),
            Some(v) => parse_status(v)?,
        };

        let deadline_date = match body.get("deadline_date") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(parse_deadline(s)?),
            Some(_) => return Err(AppError::Validation(INVALID_DEADLINE.into())),
        };

        Ok(NewProblem {
            title,
            topic,
            difficulty,
            status,
            deadline_date,
        })
    }

    /// Validate a status-update payload.
    pub fn status_update(body: Option<&Map<String, Value>>) -> Result<Status, AppError> {
        let value = body
            .and_then(|b| b.get("status"))
            .ok_or_else(|| AppError::Validation(STATUS_REQUIRED.into()))?;
        parse_status(value)
    }
}

fn parse_status(value: &Value) -> Result<Status, AppError> {
    value
        .as_str()
        .ok_or_else(|| AppError::Validation(Status::invalid_message()))?
        .parse()
}

fn date_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"))
}

/// Strict `YYYY-MM-DD` that is also a real calendar date.
pub fn parse_deadline(s: &str) -> Result<NaiveDate, AppError> {
    if !date_shape().is_match(s) {
        return Err(AppError::Validation(INVALID_DEADLINE.into()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| AppError::Validation(INVALID_DEADLINE.into()))
}
