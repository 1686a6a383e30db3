//! # Author
//!
//! A validated first/last name pair.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{require_non_blank, ValidationResult};

/// A book author. Both names are trimmed and must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "AuthorRecord")]
#[ts(export)]
pub struct Author {
    first_name: String,
    last_name: String,
}

#[derive(Deserialize)]
struct AuthorRecord {
    first_name: String,
    last_name: String,
}

impl TryFrom<AuthorRecord> for Author {
    type Error = ValidationError;

    fn try_from(record: AuthorRecord) -> Result<Self, Self::Error> {
        Author::new(&record.first_name, &record.last_name)
    }
}

impl Author {
    /// Creates an author, trimming surrounding whitespace from both names.
    ///
    /// The first name is checked before the last name, so a request with
    /// both blank reports the first name.
    pub fn new(first_name: &str, last_name: &str) -> ValidationResult<Self> {
        let first_name = require_non_blank("first name", first_name)?;
        let last_name = require_non_blank("last name", last_name)?;

        Ok(Author {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Initials of the first name tokens, e.g. `"J.K."` for `"Joanne Kathleen"`.
    ///
    /// The last name does not contribute.
    pub fn initials(&self) -> String {
        self.first_name
            .split_whitespace()
            .filter_map(|token| token.chars().next())
            .map(|c| format!("{c}."))
            .collect()
    }
}
