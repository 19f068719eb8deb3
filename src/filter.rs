//! View-level to-do filter.
//!
//! Projects the committed list; never mutates it and never triggers a fetch.

use crate::todos::ToDoItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    hide_completed: bool,
}

impl TodoFilter {
    #[must_use]
    pub fn new(hide_completed: bool) -> Self {
        Self { hide_completed }
    }

    /// Handle the "hide completed" toggle.
    pub fn set_hide_completed(&mut self, hide_completed: bool) {
        self.hide_completed = hide_completed;
    }

    #[must_use]
    pub fn hide_completed(&self) -> bool {
        self.hide_completed
    }

    #[must_use]
    pub fn apply<'a>(&self, todos: &'a [ToDoItem]) -> Vec<&'a ToDoItem> {
        todos
            .iter()
            .filter(|t| !(self.hide_completed && t.complete))
            .collect()
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
