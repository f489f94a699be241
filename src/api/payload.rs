//! Raw request bodies and their validation into typed inputs.
//!
//! Every field is optional at the JSON level so that a missing field is
//! reported alongside any other problem instead of failing deserialization.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::MAX_PASSWORD_BYTES;
use crate::database::models::{GoalInput, TaskInput};
use crate::error::{ApiError, FieldErrors};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, Deserialize)]
pub struct RegisterPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GoalPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub progress: Option<i64>,
    pub due_date: Option<String>,
}

impl RegisterPayload {
    pub fn validate(self) -> Result<RegisterInput, ApiError> {
        let mut v = Validator::default();
        let username = v.required("username", self.username);
        let email = v.email("email", self.email);
        let password = v.password("password", self.password, MIN_PASSWORD_LENGTH);
        if password.len() > MAX_PASSWORD_BYTES {
            v.fail(
                "password",
                format!("Must be at most {} bytes", MAX_PASSWORD_BYTES),
            );
        }
        v.finish(RegisterInput {
            username,
            email,
            password,
        })
    }
}

impl LoginPayload {
    pub fn validate(self) -> Result<LoginInput, ApiError> {
        let mut v = Validator::default();
        let email = v.email("email", self.email);
        let password = v.password("password", self.password, 1);
        v.finish(LoginInput { email, password })
    }
}

impl TaskPayload {
    pub fn validate(self) -> Result<TaskInput, ApiError> {
        let mut v = Validator::default();
        let title = v.required("title", self.title);
        let due_date = v.date("due_date", self.due_date);
        let status = v.required("status", self.status);
        let priority = v.required("priority", self.priority);
        v.finish(TaskInput {
            title,
            description: optional_text(self.description),
            due_date,
            status,
            priority,
        })
    }
}

impl GoalPayload {
    pub fn validate(self) -> Result<GoalInput, ApiError> {
        let mut v = Validator::default();
        let title = v.required("title", self.title);
        let category = v.required("category", self.category);
        let progress = v.progress("progress", self.progress);
        let due_date = v.date("due_date", self.due_date);
        v.finish(GoalInput {
            title,
            description: optional_text(self.description),
            category,
            progress,
            due_date,
        })
    }
}

/// Parse a `YYYY-MM-DD` date. Absent or blank means no date.
pub fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", s)),
    }
}

/// Basic email format check
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format".to_string());
    }

    let domain = parts[1];
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Invalid email format".to_string());
    }

    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Default)]
struct Validator {
    errors: FieldErrors,
}

impl Validator {
    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    fn required(&mut self, field: &str, value: Option<String>) -> String {
        match value.map(|s| s.trim().to_string()) {
            Some(s) if !s.is_empty() => s,
            _ => {
                self.fail(field, "This field is required");
                String::new()
            }
        }
    }

    // Emails are compared case-insensitively, so they are stored lowercased.
    fn email(&mut self, field: &str, value: Option<String>) -> String {
        let email = self.required(field, value).to_lowercase();
        if !email.is_empty() {
            if let Err(msg) = validate_email_format(&email) {
                self.fail(field, msg);
            }
        }
        email
    }

    // Passwords are taken verbatim; whitespace is significant.
    fn password(&mut self, field: &str, value: Option<String>, min_len: usize) -> String {
        match value {
            Some(p) if p.chars().count() >= min_len => p,
            Some(p) if !p.is_empty() => {
                self.fail(field, format!("Must be at least {} characters", min_len));
                p
            }
            _ => {
                self.fail(field, "This field is required");
                String::new()
            }
        }
    }

    fn date(&mut self, field: &str, value: Option<String>) -> Option<NaiveDate> {
        parse_date(value.as_deref()).unwrap_or_else(|msg| {
            self.fail(field, msg);
            None
        })
    }

    fn progress(&mut self, field: &str, value: Option<i64>) -> i32 {
        match value {
            None => 0,
            Some(p) if (0..=100).contains(&p) => p as i32,
            Some(_) => {
                self.fail(field, "Must be between 0 and 100");
                0
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ApiError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ApiError::validation_error("Invalid input", Some(self.errors)))
        }
    }
}
