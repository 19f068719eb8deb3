//! To-do wire types, fetch errors, and the source trait.

use serde::{Deserialize, Serialize};

// =============================================================================
// TO-DO ITEM
// =============================================================================

/// A single to-do item owned by a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDoItem {
    /// Id of the member the item belongs to.
    #[serde(rename = "userId")]
    pub owner_id: i64,
    pub id: i64,
    pub title: String,
    /// Public demo servers spell this `completed`.
    #[serde(default, alias = "completed")]
    pub complete: bool,
}

/// Keep at most `max_chars` characters of `title`.
#[must_use]
pub fn truncate_title(title: &str, max_chars: usize) -> &str {
    match title.char_indices().nth(max_chars) {
        Some((end, _)) => &title[..end],
        None => title,
    }
}

/// Truncate every title longer than `max_chars`; shorter titles pass through.
#[must_use]
pub fn normalize_titles(mut items: Vec<ToDoItem>, max_chars: usize) -> Vec<ToDoItem> {
    for item in &mut items {
        let keep = truncate_title(&item.title, max_chars).len();
        item.title.truncate(keep);
    }
    items
}

// =============================================================================
// ERROR
// =============================================================================

/// Failures fetching a member's to-dos. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// No response reached us (DNS, connect, TLS, reset, timeout).
    #[error("An error occurred: {message}")]
    Transport { message: String },

    /// The server answered with an error status, or with a body we could not decode.
    #[error("Backend returned code {status}: {message}")]
    Backend { status: u16, message: String },
}

// =============================================================================
// SOURCE TRAIT
// =============================================================================

/// Async capability that loads a member's to-dos. Enables mocking in tests.
#[async_trait::async_trait]
pub trait TodoSource: Send + Sync {
    /// Fetch every to-do owned by `member_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] when the request fails or the server rejects it.
    async fn fetch_todos(&self, member_id: i64) -> Result<Vec<ToDoItem>, FetchError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
