/// Read-only snapshot handed to the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub has_more: bool,
    pub query: String,
    pub page: u32,
}
