use crate::RequestId;

/// Parameters for one page fetch, handed to the data source unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage {
        request_id: RequestId,
        request: PageRequest,
    },
}
