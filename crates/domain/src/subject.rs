//! Subject identity and validation rules.
//!
//! The subject of every console operation is an email address. Validation is
//! purely syntactic (`local@domain.tld` shape) and happens before any request
//! is issued; invalid input short-circuits the whole chain.

use roledeck_core::{ConsoleError, ConsoleResult};
use serde::{Deserialize, Serialize};

/// Validated email address identifying the subject user.
///
/// Input is trimmed and lowercased, then checked against the
/// `local@domain.tld` shape: no whitespace anywhere, exactly one `@`, a
/// non-empty local part, and a domain with an interior dot. The role service
/// resolves subjects case-insensitively, so the lowered form is canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectEmail(String);

impl SubjectEmail {
    /// Creates a validated subject email.
    pub fn new(value: impl Into<String>) -> ConsoleResult<Self> {
        let value = value.into();
        let canonical = value.trim().to_lowercase();

        if canonical.is_empty() {
            return Err(ConsoleError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        if canonical.chars().any(char::is_whitespace) {
            return Err(ConsoleError::Validation(
                "email address must not contain whitespace".to_owned(),
            ));
        }

        if canonical.matches('@').count() != 1 {
            return Err(ConsoleError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        let Some((local, domain)) = canonical.split_once('@') else {
            return Err(ConsoleError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if local.is_empty() {
            return Err(ConsoleError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if !has_interior_dot(domain) {
            return Err(ConsoleError::Validation(
                "email domain must contain a '.' between non-empty parts".to_owned(),
            ));
        }

        if canonical.len() > 254 {
            return Err(ConsoleError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(canonical))
    }

    /// Returns the canonical (trimmed, lowercased) email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// True when the domain contains a dot that is neither its first nor its
/// last character, i.e. the `domain.tld` shape with non-empty sides.
fn has_interior_dot(domain: &str) -> bool {
    let characters: Vec<char> = domain.chars().collect();
    characters.len() >= 3 && characters[1..characters.len() - 1].contains(&'.')
}

impl From<SubjectEmail> for String {
    fn from(value: SubjectEmail) -> Self {
        value.0
    }
}

impl std::fmt::Display for SubjectEmail {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::SubjectEmail;

    #[test]
    fn valid_email_is_accepted_and_lowered() {
        let email = SubjectEmail::new("  Operator@Example.COM ");
        assert!(email.is_ok_and(|email| email.as_str() == "operator@example.com"));
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(SubjectEmail::new("not-an-email").is_err());
    }

    #[test]
    fn email_with_two_ats_is_rejected() {
        assert!(SubjectEmail::new("user@host@example.com").is_err());
    }

    #[test]
    fn email_with_interior_whitespace_is_rejected() {
        assert!(SubjectEmail::new("user name@example.com").is_err());
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(SubjectEmail::new("user@nodot").is_err());
    }

    #[test]
    fn email_with_leading_domain_dot_only_is_rejected() {
        assert!(SubjectEmail::new("user@.example").is_err());
    }

    #[test]
    fn email_with_trailing_domain_dot_only_is_rejected() {
        assert!(SubjectEmail::new("user@example.").is_err());
    }

    #[test]
    fn empty_email_is_rejected() {
        assert!(SubjectEmail::new("   ").is_err());
    }

    #[test]
    fn subdomain_email_is_accepted() {
        assert!(SubjectEmail::new("user@mail.example.com").is_ok());
    }
}
