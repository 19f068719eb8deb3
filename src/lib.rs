//! Member selection driving a switch-latest to-do loader.
//!
//! ARCHITECTURE
//! ============
//! - `members`: member directory (lookup by id, roster listing).
//! - `todos`: to-do wire types, title normalization, and the HTTP source.
//! - `selection`: emitter handle that feeds member ids into the pipeline.
//! - `pipeline`: actor that owns the only writer of the view state.
//! - `state`: immutable view snapshot and its read-only projections.
//! - `filter`: view-level projection hiding completed items.
//! - `store`: wires directory, source, emitter, and pipeline together.
//! - `config`: environment-driven settings.

pub mod config;
pub mod filter;
pub mod members;
pub mod pipeline;
pub mod selection;
pub mod state;
pub mod store;
pub mod todos;

pub use config::{ConfigError, TodoConfig};
pub use filter::TodoFilter;
pub use members::{Member, MemberDirectory, StaticDirectory};
pub use selection::SelectionEmitter;
pub use state::ViewState;
pub use store::TodoStore;
pub use todos::{FetchError, HttpTodoSource, ToDoItem, TodoSource};
