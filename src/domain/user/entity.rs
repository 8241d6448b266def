//! User record entity and related types

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque record identifier, assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing identifier (e.g. loaded from storage)
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the inner UUID value
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered birthday record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier for the record
    id: UserId,
    /// Display name used in the congratulatory message
    username: String,
    /// Normalized (lowercase) email address, unique across the store
    email: String,
    /// Date of birth; only month and day drive matching
    date_of_birth: NaiveDate,
    /// Creation timestamp, set once
    created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a new record with a generated identifier.
    ///
    /// The caller is expected to have validated and normalized the fields
    /// already (see [`super::validation`]).
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            id: UserId::generate(),
            username: username.into(),
            email: email.into(),
            date_of_birth,
            created_at: Utc::now(),
        }
    }

    /// Reassemble a record from stored fields
    pub fn from_parts(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        date_of_birth: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            date_of_birth,
            created_at,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True iff the birth month and day equal `today`'s month and day.
    ///
    /// The birth year is ignored entirely. A Feb 29 birthday only matches in
    /// leap years; there is no Feb 28 or Mar 1 fallback.
    pub fn is_birthday_on(&self, today: NaiveDate) -> bool {
        self.date_of_birth.month() == today.month() && self.date_of_birth.day() == today.day()
    }

    /// Month-name and day string, e.g. "June 15"
    pub fn formatted_birthday(&self) -> String {
        format!(
            "{} {}",
            self.date_of_birth.format("%B"),
            self.date_of_birth.day()
        )
    }
}
