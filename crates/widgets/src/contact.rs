//! Client-side checks for the contact form.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// One message per failing field; `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }

    pub fn len(&self) -> usize {
        [&self.name, &self.email, &self.message]
            .iter()
            .filter(|e| e.is_some())
            .count()
    }
}

impl ContactForm {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    /// Checks every field, collecting all failures rather than stopping at
    /// the first. Whitespace-only input counts as missing; length and format
    /// checks see the value as typed, surrounding whitespace included.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let errors = FieldErrors {
            name: check_name(&self.name),
            email: check_email(&self.email),
            message: check_message(&self.message),
        };
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        Some("Name is required".into())
    } else if name.chars().count() < MIN_NAME_CHARS {
        Some("Name must be at least 2 characters".into())
    } else {
        None
    }
}

fn check_email(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        Some("Email is required".into())
    } else if !EMAIL.is_match(email) {
        Some("Please enter a valid email address".into())
    } else {
        None
    }
}

fn check_message(message: &str) -> Option<String> {
    if message.trim().is_empty() {
        Some("Message is required".into())
    } else if message.chars().count() < MIN_MESSAGE_CHARS {
        Some("Message must be at least 10 characters long".into())
    } else {
        None
    }
}
