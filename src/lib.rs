#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("doc/Main.md")]

#[cfg(feature = "local")]
#[cfg_attr(docsrs, doc(cfg(feature = "local")))]
pub mod local;

#[cfg(feature = "mt")]
pub mod mt;

#[cfg(feature = "dynamic")]
#[cfg_attr(docsrs, doc(cfg(feature = "dynamic")))]
pub use mt::dynamic;

// `mt` is enabled by default so prelude reexports the mt::prelude. Users will need to specify a
// prelude module manually like `page_cursor::local::prelude::*` if they want to use other flavours
// of page cursor.
#[cfg(feature = "mt")]
#[doc = include_str!("doc/prelude")]
pub mod prelude {
    pub use crate::mt::prelude::*;
}

// `mt` is enabled by default so it's reexported into the root.
#[cfg(feature = "mt")]
pub use crate::mt::*;

pub use error::MalformedPage;

/// An opaque continuation token issued by a paginated API.
///
/// Only the code that implements `FetchPage` is supposed to look inside of it. A cursor merely
/// stores tokens and hands them back to the fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Token {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single page of a paginated collection: the payload, the pagination metadata reported by the
/// server and tokens for adjacent pages. If `prev_token` is `None` this is the first page, if
/// `next_token` is `None` this is the last one.
///
/// [`Page::first`], [`Page::last`] and [`Page::single`] constructors can be used for convenience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub data: T,
    pub results_per_page: u64,
    pub total_results: u64,
    pub prev_token: Option<Token>,
    pub next_token: Option<Token>,
}

impl<T> Page<T> {
    pub fn new(
        data: T,
        results_per_page: u64,
        total_results: u64,
        prev_token: Option<Token>,
        next_token: Option<Token>,
    ) -> Self {
        Self {
            data,
            results_per_page,
            total_results,
            prev_token,
            next_token,
        }
    }

    pub fn first(data: T, results_per_page: u64, total_results: u64, next_token: Token) -> Self {
        Self::new(data, results_per_page, total_results, None, Some(next_token))
    }

    pub fn last(data: T, results_per_page: u64, total_results: u64, prev_token: Token) -> Self {
        Self::new(data, results_per_page, total_results, Some(prev_token), None)
    }

    pub fn single(data: T, results_per_page: u64, total_results: u64) -> Self {
        Self::new(data, results_per_page, total_results, None, None)
    }
}

/// A page as it was received from upstream, before the mandatory pagination metadata was
/// checked. Convert it with `Page::try_from` or `PageCursor::try_from_raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage<T> {
    pub data: T,
    pub results_per_page: Option<u64>,
    pub total_results: Option<u64>,
    pub prev_token: Option<Token>,
    pub next_token: Option<Token>,
}

impl<T> TryFrom<RawPage<T>> for Page<T> {
    type Error = MalformedPage;

    fn try_from(raw: RawPage<T>) -> Result<Self, Self::Error> {
        let results_per_page = raw
            .results_per_page
            .ok_or(MalformedPage::MissingResultsPerPage)?;

        let total_results = raw
            .total_results
            .ok_or(MalformedPage::MissingTotalResults)?;

        Ok(Page::new(
            raw.data,
            results_per_page,
            total_results,
            raw.prev_token,
            raw.next_token,
        ))
    }
}

mod error;
mod internal;

#[cfg(test)]
mod test_utils;
