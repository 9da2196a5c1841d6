//! Submission identity keys
//!
//! A group submission has no id field; it is identified by who submitted it
//! and when. The wire form is `username|email|submittedAt`.

use crate::error::ModelError;
use crate::timestamp::Timestamp;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Composite identity of a submission
///
/// Equality is structural, so two keys compare equal only when all three
/// parts match. Parsing splits from the right: timestamps and emails never
/// contain `|`, usernames may.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionKey {
    username: String,
    email: String,
    submitted_at: Timestamp,
}

impl SubmissionKey {
    /// Build a key from its parts
    #[inline]
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        submitted_at: Timestamp,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            submitted_at,
        }
    }

    /// Username part
    #[inline]
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Email part
    #[inline]
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Timestamp part
    #[inline]
    #[must_use]
    pub fn submitted_at(&self) -> &Timestamp {
        &self.submitted_at
    }
}

impl Display for SubmissionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.username, self.email, self.submitted_at)
    }
}

impl FromStr for SubmissionKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, '|');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(submitted_at), Some(email), Some(username)) => Ok(Self::new(
                username,
                email,
                Timestamp::from_raw(submitted_at),
            )),
            _ => Err(ModelError::InvalidKey(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_with_pipes() {
        let key = SubmissionKey::new(
            "alice",
            "a@x.com",
            Timestamp::from_raw("2024-01-01T00:00:00Z"),
        );
        assert_eq!(key.to_string(), "alice|a@x.com|2024-01-01T00:00:00Z");
    }

    #[test]
    fn parse_round_trips() {
        let raw = "alice|a@x.com|2024-01-01T00:00:00Z";
        let key: SubmissionKey = raw.parse().unwrap();
        assert_eq!(key.username(), "alice");
        assert_eq!(key.email(), "a@x.com");
        assert_eq!(key.submitted_at().as_str(), "2024-01-01T00:00:00Z");
        assert_eq!(key.to_string(), raw);
    }

    #[test]
    fn pipe_in_username_stays_in_username() {
        let key: SubmissionKey = "a|b|b@x.com|2024-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(key.username(), "a|b");
        assert_eq!(key.email(), "b@x.com");

        let other = SubmissionKey::new("a", "b|b@x.com", Timestamp::from_raw("2024-01-01T00:00:00Z"));
        assert_ne!(key, other);
    }

    #[test]
    fn too_few_parts_is_rejected() {
        assert!(matches!(
            "alice|2024".parse::<SubmissionKey>(),
            Err(ModelError::InvalidKey(_))
        ));
        assert!("".parse::<SubmissionKey>().is_err());
    }
}
