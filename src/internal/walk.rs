use crate::{Page, Token};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn token<T>(self, page: &Page<T>) -> Option<&Token> {
        match self {
            Direction::Backward => page.prev_token.as_ref(),
            Direction::Forward => page.next_token.as_ref(),
        }
    }

    pub fn take_token<T>(self, page: &mut Page<T>) -> Option<Token> {
        match self {
            Direction::Backward => page.prev_token.take(),
            Direction::Forward => page.next_token.take(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Backward => f.write_str("backward"),
            Direction::Forward => f.write_str("forward"),
        }
    }
}

/// State of a lazy walk in one direction. The data of the page the walk started from is yielded
/// first, then pages are fetched one by one until the token runs out.
pub struct WalkState<T, F> {
    pub fetcher: F,
    pub pending: Option<T>,
    pub token: Option<Token>,
    pub direction: Direction,
}

impl<T, F> WalkState<T, F> {
    pub fn new(mut page: Page<T>, fetcher: F, direction: Direction) -> Self {
        let token = direction.take_token(&mut page);
        Self {
            fetcher,
            pending: Some(page.data),
            token,
            direction,
        }
    }
}

macro_rules! turn_page_decl {
    ($($extra_bounds:tt)*) => {
        async fn turn_page<T, F>(
            fetcher: &F,
            token: crate::Token,
            direction: crate::internal::Direction,
        ) -> FetchResult<T, F>
        where
            F: FetchPage<T>,
            $($extra_bounds)*
        {
            tracing::debug!(%direction, "fetching an adjacent page");

            let result = fetcher.fetch_page(token).await;
            if result.is_err() {
                tracing::debug!(%direction, "failed to fetch an adjacent page");
            }

            result
        }
    };
}

macro_rules! walk_next_decl {
    ($($extra_bounds:tt)*) => {
        async fn walk_next<T, F>(
            mut state: crate::internal::WalkState<T, F>,
        ) -> Result<Option<(T, crate::internal::WalkState<T, F>)>, FetchError<T, F>>
        where
            F: FetchPage<T>,
            $($extra_bounds)*
        {
            if let Some(data) = state.pending.take() {
                return Ok(Some((data, state)));
            }

            let token = match state.token.take() {
                Some(token) => token,
                None => return Ok(None),
            };

            let mut page = turn_page(&state.fetcher, token, state.direction).await?;

            state.token = state.direction.take_token(&mut page);
            Ok(Some((page.data, state)))
        }
    };
}

pub(crate) use turn_page_decl;
pub(crate) use walk_next_decl;
