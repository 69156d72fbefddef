use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Pagination metadata attached to a paginated response.
///
/// Missing counters decode as zero, which reads as "no further pages".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: Option<u64>,
}

impl PageMeta {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// The three response shapes a data source may produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResult<T> {
    /// A bare list: everything there is, no paging information.
    Unpaginated(Vec<T>),
    Paginated { items: Vec<T>, meta: PageMeta },
    /// Empty body, `null`, or an object lacking `items` or `meta`.
    Malformed,
}

#[derive(Debug, Error)]
#[error("response body could not be decoded: {0}")]
pub struct ShapeError(#[from] serde_json::Error);

impl<T: DeserializeOwned> PageResult<T> {
    /// Classify a raw response body. Blank bodies count as malformed.
    pub fn from_slice(body: &[u8]) -> Result<Self, ShapeError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(PageResult::Malformed);
        }
        let value: Value = serde_json::from_slice(body)?;
        Self::from_json(value)
    }

    /// Classify an already decoded JSON document.
    ///
    /// A shape that is recognisably wrong (missing `items`/`meta`) is
    /// `Malformed`; a recognised shape whose contents do not decode into `T`
    /// is an error.
    pub fn from_json(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::Array(_) => Ok(PageResult::Unpaginated(serde_json::from_value(value)?)),
            Value::Object(mut fields) => {
                let items = fields.remove("items").filter(|v| !v.is_null());
                let meta = fields.remove("meta").filter(|v| !v.is_null());
                match (items, meta) {
                    (Some(items), Some(meta)) => Ok(PageResult::Paginated {
                        items: serde_json::from_value(items)?,
                        meta: serde_json::from_value(meta)?,
                    }),
                    _ => Ok(PageResult::Malformed),
                }
            }
            _ => Ok(PageResult::Malformed),
        }
    }
}
