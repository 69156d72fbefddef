use crate::{PageResult, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg<T> {
    /// View attached; issue the initial load.
    Mounted,
    /// User edited the search box.
    QueryChanged(String),
    /// User scrolled to the end of the list.
    LoadMoreRequested,
    /// User pulled to refresh.
    RefreshRequested,
    /// Data source finished a fetch. `Err` carries diagnostic detail only.
    PageFetched {
        request_id: RequestId,
        page: u32,
        result: Result<PageResult<T>, String>,
    },
}
