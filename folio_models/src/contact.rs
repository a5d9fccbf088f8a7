use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{email_address::EmailAddress, macros::nutype_string};

/// Raw contact form input as submitted by a visitor.
///
/// Nothing about this value has been checked yet, see [`ContactSubmission::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A contact message whose fields passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: ContactName,
    pub email: ContactEmail,
    pub message: ContactMessageContent,
}

nutype_string!(ContactName(validate(len_char_min = 2, len_char_max = 50)));

nutype_string!(ContactEmail(validate(
    len_char_min = 2,
    len_char_max = 50,
    predicate = |s: &str| s.parse::<crate::email_address::EmailAddress>().is_ok()
)));

nutype_string!(ContactMessageContent(validate(
    len_char_min = 10,
    len_char_max = 500
)));

impl ContactEmail {
    pub fn to_email_address(&self) -> Option<EmailAddress> {
        self.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactFieldError {
    pub field: ContactField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid contact submission ({} invalid fields)", .0.len())]
pub struct ContactValidationError(pub Vec<ContactFieldError>);

impl ContactSubmission {
    /// Checks every field and returns all violations at once, so the form can
    /// highlight each offending field.
    pub fn validate(self) -> Result<ContactMessage, ContactValidationError> {
        let mut errors = Vec::new();

        let name = ContactName::try_new(self.name)
            .map_err(|err| {
                let message = match err {
                    ContactNameError::LenCharMinViolated => "Name must be at least 2 characters",
                    ContactNameError::LenCharMaxViolated => "Name must be at most 50 characters",
                };
                errors.push(ContactFieldError {
                    field: ContactField::Name,
                    message,
                });
            })
            .ok();

        let email = ContactEmail::try_new(self.email)
            .map_err(|err| {
                let message = match err {
                    ContactEmailError::LenCharMinViolated => "Email must be at least 2 characters",
                    ContactEmailError::LenCharMaxViolated => "Email must be at most 50 characters",
                    ContactEmailError::PredicateViolated => "Invalid email address",
                };
                errors.push(ContactFieldError {
                    field: ContactField::Email,
                    message,
                });
            })
            .ok();

        let message = ContactMessageContent::try_new(self.message)
            .map_err(|err| {
                let message = match err {
                    ContactMessageContentError::LenCharMinViolated => {
                        "Message must be at least 10 characters"
                    }
                    ContactMessageContentError::LenCharMaxViolated => {
                        "Message must be at most 500 characters"
                    }
                };
                errors.push(ContactFieldError {
                    field: ContactField::Message,
                    message,
                });
            })
            .ok();

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => Ok(ContactMessage {
                name,
                email,
                message,
            }),
            _ => Err(ContactValidationError(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn minimum_lengths_are_accepted() {
        let result = submission("Al", "a@b.com", "1234567890").validate();

        let message = result.unwrap();
        assert_eq!(&**message.name, "Al");
        assert_eq!(&**message.email, "a@b.com");
        assert_eq!(&**message.message, "1234567890");
    }

    #[test]
    fn maximum_lengths_are_accepted() {
        let name = "n".repeat(50);
        let email = format!("{}@example.com", "e".repeat(38));
        let message = "m".repeat(500);

        let result = submission(&name, &email, &message).validate();

        assert_matches!(result, Ok(_));
    }

    #[test]
    fn name_too_short() {
        let result = submission("A", "a@b.com", "1234567890").validate();

        assert_eq!(
            result,
            Err(ContactValidationError(vec![ContactFieldError {
                field: ContactField::Name,
                message: "Name must be at least 2 characters",
            }]))
        );
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let result = submission("Jü", "a@b.com", "ääääääääää").validate();

        assert_matches!(result, Ok(_));
    }

    #[test]
    fn invalid_email() {
        let result = submission("Alice", "not an email", "1234567890").validate();

        assert_eq!(
            result,
            Err(ContactValidationError(vec![ContactFieldError {
                field: ContactField::Email,
                message: "Invalid email address",
            }]))
        );
    }

    #[test]
    fn all_fields_are_reported() {
        let long_message = "x".repeat(501);

        let result = submission("", "a", &long_message).validate();

        let fields = result
            .unwrap_err()
            .0
            .into_iter()
            .map(|err| err.field)
            .collect::<Vec<_>>();
        assert_eq!(
            fields,
            [ContactField::Name, ContactField::Email, ContactField::Message]
        );
    }

    #[test]
    fn reply_address_from_email() {
        let message = submission("Al", "a@b.com", "1234567890")
            .validate()
            .unwrap();

        assert_eq!(
            message.email.to_email_address(),
            Some("a@b.com".parse().unwrap())
        );
    }
}
