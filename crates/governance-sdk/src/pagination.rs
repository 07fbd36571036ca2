// crates/governance-sdk/src/pagination.rs
// ============================================================================
// Module: Governance Pagination
// Description: Paged results and page-walking helpers.
// Purpose: Thread continuation tokens verbatim and detect runaway pagination.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every listing returns a [`Page`]. A page without a next token is the final
//! page. [`collect_pages`] walks a listing to completion, echoing each token
//! back unchanged.
//! Invariants:
//! - A repeated token fails instead of looping.
//! - The number of pages is capped at [`MAX_PAGES`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Serialize;

use crate::identifiers::PageToken;
use crate::interfaces::ConnectorError;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum pages walked by [`collect_pages`].
pub const MAX_PAGES: usize = 10_000;

// ============================================================================
// SECTION: Page
// ============================================================================

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Token for the next page; `None` on the final page.
    pub next_page_token: Option<PageToken>,
}

impl<T> Page<T> {
    /// Creates a final page.
    #[must_use]
    pub const fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: None,
        }
    }

    /// Creates a page followed by the provider's token; an empty token ends pagination.
    #[must_use]
    pub fn with_token(items: Vec<T>, token: impl Into<String>) -> Self {
        Self {
            items,
            next_page_token: PageToken::new(token),
        }
    }

    /// Creates an empty final page.
    #[must_use]
    pub const fn empty() -> Self {
        Self::last(Vec::new())
    }

    /// Returns true when no further pages follow.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.next_page_token.is_none()
    }
}

// ============================================================================
// SECTION: Page Walking
// ============================================================================

/// Walks a paginated listing to completion and returns all items.
///
/// # Errors
///
/// Returns the listing's error unchanged, or [`ConnectorError::Pagination`]
/// when a token repeats or [`MAX_PAGES`] is exceeded.
pub fn collect_pages<T, F>(mut fetch: F) -> Result<Vec<T>, ConnectorError>
where
    F: FnMut(Option<&PageToken>) -> Result<Page<T>, ConnectorError>,
{
    let mut items = Vec::new();
    let mut seen = BTreeSet::new();
    let mut token: Option<PageToken> = None;
    for _ in 0 .. MAX_PAGES {
        let page = fetch(token.as_ref())?;
        items.extend(page.items);
        match page.next_page_token {
            None => return Ok(items),
            Some(next) => {
                if !seen.insert(next.as_str().to_string()) {
                    return Err(ConnectorError::Pagination(format!(
                        "continuation token repeated: {next}"
                    )));
                }
                token = Some(next);
            }
        }
    }
    Err(ConnectorError::Pagination(format!("page limit exceeded ({MAX_PAGES})")))
}
