//! To-dos — remote to-do items, fetch errors, and the HTTP source.
//!
//! DESIGN
//! ======
//! `TodoSource` is the capability the load pipeline depends on, so tests can
//! substitute a scripted source. `HttpTodoSource` is the production adapter
//! for `GET <base_url>?userId=<id>`. Title truncation is a presentation
//! normalization applied by the pipeline after a successful fetch; sources
//! return items exactly as served.

pub mod http;
pub mod types;

pub use http::HttpTodoSource;
pub use types::{FetchError, ToDoItem, TodoSource, normalize_titles, truncate_title};
