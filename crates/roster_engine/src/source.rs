use roster_core::{PageRequest, PageResult};

use crate::FetchError;

/// The injected fetch capability: one call per issued page request.
///
/// Implementations own transport concerns such as timeouts; the controller
/// never retries.
#[async_trait::async_trait]
pub trait PageSource<T: Send + 'static>: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult<T>, FetchError>;
}
