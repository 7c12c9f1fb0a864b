//! Contact form validation
//!
//! Nothing is sent anywhere; a valid message yields the confirmation text.

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Confirmation text echoing the message, or the missing-field error
    pub fn validate(&self) -> Result<String, ValidationError> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(ValidationError::IncompleteMessage);
        }
        Ok(format!(
            "Message sent successfully!\n\nName: {}\nEmail: {}\nMessage: {}",
            self.name, self.email, self.message
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_echoes_fields() {
        let confirmation = ContactMessage::new("Ada", "ada@example.com", "Hello")
            .validate()
            .unwrap();
        assert_eq!(
            confirmation,
            "Message sent successfully!\n\nName: Ada\nEmail: ada@example.com\nMessage: Hello"
        );
    }

    #[test]
    fn test_all_fields_required() {
        let err = ContactMessage::new("Ada", "", "Hello").validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all text fields.");
    }
}
