//! Roster core: pure paged-list state machine and view-model helpers.
mod effect;
mod msg;
mod page;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, PageRequest};
pub use msg::Msg;
pub use page::{PageMeta, PageResult, ShapeError};
pub use state::{ListState, RequestId, StalePolicy, LOAD_ERROR_MESSAGE, PAGE_SIZE};
pub use update::update;
pub use view_model::ListViewModel;
