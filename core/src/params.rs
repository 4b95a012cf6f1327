use alloc::string::String;
use serde::{Deserialize, Serialize};

pub const DATA_KEY: &str = "data";
pub const ORDER_KEY: &str = "order";
pub const MARKED_KEY: &str = "marked";

/// The three query parameters that carry a whole board.
///
/// An empty value means the same as a missing one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked: Option<String>,
}

impl UrlParams {
    pub fn new(data: Option<String>, order: Option<String>, marked: Option<String>) -> Self {
        Self {
            data: data.filter(|s| !s.is_empty()),
            order: order.filter(|s| !s.is_empty()),
            marked: marked.filter(|s| !s.is_empty()),
        }
    }

    pub fn data(&self) -> Option<&str> {
        present(&self.data)
    }

    pub fn order(&self) -> Option<&str> {
        present(&self.order)
    }

    pub fn marked(&self) -> Option<&str> {
        present(&self.marked)
    }

    pub fn is_empty(&self) -> bool {
        self.data().is_none() && self.order().is_none() && self.marked().is_none()
    }

    /// Key/value pairs in query order, with `None` for keys that should be removed.
    pub fn entries(&self) -> [(&'static str, Option<&str>); 3] {
        [
            (DATA_KEY, self.data()),
            (ORDER_KEY, self.order()),
            (MARKED_KEY, self.marked()),
        ]
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Where the current board lives between page loads.
pub trait StateStore {
    fn read(&self) -> UrlParams;

    /// Replaces the stored parameters; absent or empty values are removed.
    fn write(&mut self, params: &UrlParams);
}

/// Store backed by a plain value, for tests and non-browser hosts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    params: UrlParams,
    writes: usize,
}

impl MemoryStore {
    pub fn new(params: UrlParams) -> Self {
        Self { params, writes: 0 }
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl StateStore for MemoryStore {
    fn read(&self) -> UrlParams {
        self.params.clone()
    }

    fn write(&mut self, params: &UrlParams) {
        let UrlParams { data, order, marked } = params.clone();
        self.params = UrlParams::new(data, order, marked);
        self.writes += 1;
    }
}
