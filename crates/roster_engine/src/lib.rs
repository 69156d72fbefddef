//! Roster engine: data sources, background fetching and the list controller.
mod controller;
mod engine;
mod http;
mod source;
mod types;

pub use controller::{ControllerOptions, PagedListController};
pub use engine::EngineHandle;
pub use http::{HttpPageSource, HttpSettings, QueryParams};
pub use source::PageSource;
pub use types::{EngineError, EngineEvent, FailureKind, FetchError};
