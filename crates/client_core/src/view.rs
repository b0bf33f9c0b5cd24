//! View-side helpers derived from server page metadata.

use shared::{domain::ArticleTagId, protocol::Page};

/// Page metadata as the view tracks it. Re-derived from every server
/// response, never mutated locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub size: u32,
    pub number: u32,
    pub total: u64,
}

impl PageState {
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            size: page.size,
            number: page.number,
            total: page.total,
        }
    }
}

/// A `{value, label}` pair for the tag picker widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOption {
    pub value: ArticleTagId,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_state_mirrors_server_metadata() {
        let page: Page<i64> = Page {
            content: vec![1, 2, 3],
            size: 10,
            number: 2,
            total: 25,
        };
        let state = PageState::from_page(&page);
        assert_eq!(state.size, 10);
        assert_eq!(state.number, 2);
        assert_eq!(state.total, 25);
    }
}
