//! Member directory — the roster a selection resolves against.
//!
//! DESIGN
//! ======
//! Lookups are synchronous and never touch the network. An unknown id is a
//! normal absent value, not an error.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// A selectable roster member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
}

impl Member {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Read-only roster capability injected into the load pipeline.
pub trait MemberDirectory: Send + Sync {
    /// Resolve a member by id.
    fn lookup(&self, id: i64) -> Option<Member>;

    /// All members, in display order.
    fn members(&self) -> Vec<Member>;
}

// =============================================================================
// STATIC DIRECTORY
// =============================================================================

/// In-memory roster loaded once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    members: Vec<Member>,
}

const DEFAULT_ROSTER: [(i64, &str); 10] = [
    (1, "Leanne Graham"),
    (2, "Ervin Howell"),
    (3, "Clementine Bauch"),
    (4, "Patricia Lebsack"),
    (5, "Chelsey Dietrich"),
    (6, "Mrs. Dennis Schulist"),
    (7, "Kurtis Weissnat"),
    (8, "Nicholas Runolfsdottir V"),
    (9, "Glenna Reichert"),
    (10, "Clementina DuBuque"),
];

impl StaticDirectory {
    #[must_use]
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    /// The built-in roster, matching the users served by the public demo API.
    #[must_use]
    pub fn default_roster() -> Self {
        Self::new(DEFAULT_ROSTER.iter().map(|(id, name)| Member::new(*id, *name)).collect())
    }

    /// Parse a roster from a JSON array of `{ "id", "name" }` objects.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RosterParse`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let members: Vec<Member> = serde_json::from_str(json)?;
        Ok(Self::new(members))
    }

    /// Read and parse a roster file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RosterRead`] or [`ConfigError::RosterParse`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl MemberDirectory for StaticDirectory {
    fn lookup(&self, id: i64) -> Option<Member> {
        self.members.iter().find(|m| m.id == id).cloned()
    }

    fn members(&self) -> Vec<Member> {
        self.members.clone()
    }
}

#[cfg(test)]
#[path = "members_test.rs"]
mod tests;
