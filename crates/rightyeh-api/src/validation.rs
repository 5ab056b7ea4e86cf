// Input checks applied at the HTTP boundary before anything reaches the stores
// or the assistant client.

use rightyeh_assistant::MessageRole;
use serde::Serialize;

use crate::error::ApiError;

pub const MAX_MESSAGE_CHARS: usize = 4000;
const NAME_CHARS: std::ops::RangeInclusive<usize> = 2..=50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Collects field errors so a request reports all of them at once
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Required text of 1 to 4000 characters
    pub fn message_text(&mut self, field: &str, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.error(field, format!("{} is required", label));
        } else if value.chars().count() > MAX_MESSAGE_CHARS {
            self.error(
                field,
                format!("{} must be between 1 and {} characters", label, MAX_MESSAGE_CHARS),
            );
        }
    }

    pub fn name(&mut self, value: &str) {
        if !NAME_CHARS.contains(&value.trim().chars().count()) {
            self.error("name", "Name must be between 2 and 50 characters");
        }
    }

    /// Returns the normalized address when valid
    pub fn email(&mut self, value: &str) -> Option<String> {
        let normalized = normalize_email(value);
        if is_valid_email(&normalized) {
            Some(normalized)
        } else {
            self.error("email", "Valid email is required");
            None
        }
    }

    pub fn role(&mut self, value: Option<&str>) -> MessageRole {
        match value {
            None | Some("user") => MessageRole::User,
            Some("assistant") => MessageRole::Assistant,
            Some(_) => {
                self.error("role", "Role must be either user or assistant");
                MessageRole::User
            }
        }
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}

pub fn parse_user_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| field_error("id", "Valid user ID is required"))
}

pub fn require_thread_id(thread_id: &str) -> Result<(), ApiError> {
    if thread_id.trim().is_empty() {
        return Err(field_error("threadId", "ThreadId is required"));
    }
    Ok(())
}

fn field_error(field: &str, message: &str) -> ApiError {
    ApiError::Validation(vec![FieldError {
        field: field.to_string(),
        message: message.to_string(),
    }])
}

pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .collect::<Vec<_>>()
            .as_slice()
            .split_last()
            .is_some_and(|(tld, rest)| {
                tld.len() >= 2 && !rest.is_empty() && rest.iter().all(|label| !label.is_empty())
            })
}
