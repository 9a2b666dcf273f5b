use std::fmt;

/// Headroom under the messaging API's 4096-char text limit.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// One contact-form submission. Ephemeral: read at submit time, forwarded
/// once, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub project: String,
    pub message: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingName,
    MissingEmail,
    InvalidEmail,
    MissingMessage,
    MessageTooLong,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ValidationError::MissingName => "name is required",
            ValidationError::MissingEmail => "email is required",
            ValidationError::InvalidEmail => "email address looks invalid",
            ValidationError::MissingMessage => "message is required",
            ValidationError::MessageTooLong => "message is too long",
        };
        f.write_str(text)
    }
}

impl std::error::Error for ValidationError {}

fn email_looks_valid(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

impl Submission {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if !email_looks_valid(email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::MissingMessage);
        }
        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(ValidationError::MessageTooLong);
        }
        Ok(())
    }

    /// Plain-text message body for the chat relay, with the emoji field
    /// markers the recipient chat expects.
    pub fn format_message(&self) -> String {
        let project = if self.project.trim().is_empty() {
            "Not specified"
        } else {
            self.project.trim()
        };

        format!(
            "\u{1f4ec} New Contact Form Submission\n\n\
             \u{1f464} Name: {}\n\
             \u{1f4e7} Email: {}\n\
             \u{1f4bc} Project Type: {}\n\n\
             \u{1f4ac} Message:\n{}",
            self.name.trim(),
            self.email.trim(),
            project,
            self.message.trim(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_MESSAGE_CHARS, Submission, ValidationError};

    fn submission() -> Submission {
        Submission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            project: "3D work".to_string(),
            message: "Hello there".to_string(),
        }
    }

    #[test]
    fn well_formed_submission_passes() {
        assert_eq!(submission().validate(), Ok(()));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut s = submission();
        s.name = "   ".to_string();
        assert_eq!(s.validate(), Err(ValidationError::MissingName));

        let mut s = submission();
        s.email = String::new();
        assert_eq!(s.validate(), Err(ValidationError::MissingEmail));

        let mut s = submission();
        s.message = "\n".to_string();
        assert_eq!(s.validate(), Err(ValidationError::MissingMessage));
    }

    #[test]
    fn email_needs_local_and_domain() {
        for bad in ["plainaddress", "@nodomain", "nolocal@", "two@@ats"] {
            let mut s = submission();
            s.email = bad.to_string();
            assert_eq!(s.validate(), Err(ValidationError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn oversized_message_is_rejected() {
        let mut s = submission();
        s.message = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert_eq!(s.validate(), Err(ValidationError::MessageTooLong));
    }

    #[test]
    fn empty_project_renders_as_not_specified() {
        let mut s = submission();
        s.project = String::new();
        let text = s.format_message();
        assert!(text.contains("Project Type: Not specified"));
        assert!(text.contains("Name: Ada"));
        assert!(text.ends_with("Message:\nHello there"));
    }

    #[test]
    fn message_carries_the_field_markers() {
        let text = submission().format_message();
        assert!(text.starts_with("\u{1f4ec} New Contact Form Submission\n\n"));
        for marker in [
            "\u{1f464} Name: Ada",
            "\u{1f4e7} Email: ada@example.com",
            "\u{1f4bc} Project Type: 3D work",
            "\u{1f4ac} Message:\nHello there",
        ] {
            assert!(text.contains(marker), "missing {marker:?}");
        }
    }
}
