//! A page cursor suitable for singlethreaded executors. The fetcher doesn't need to be `Send` or
//! `Sync` and neither do futures it returns.

use crate::internal::*;
use futures::{
    stream::{self, Stream},
    TryStreamExt,
};
use std::future::Future;

pub use crate::{MalformedPage, Page, RawPage, Token};
#[doc = include_str!("../doc/prelude")]
pub mod prelude {
    pub use super::{
        CursorResult, FetchPage, FetchResult, MalformedPage, Page, PageCursor, PagesStream,
        RawPage, Token,
    };
}

#[doc = include_str!("../doc/FetchError")]
pub type FetchError<T, F> = <F as FetchPage<T>>::FetchError;
#[doc = include_str!("../doc/FetchResult")]
pub type FetchResult<T, F> = Result<Page<T>, FetchError<T, F>>;
#[doc = include_str!("../doc/CursorResult")]
pub type CursorResult<T, F> = Result<PageCursor<T, F>, FetchError<T, F>>;

/// This is the least constrained fetcher which produces `?Send`(may be Send) futures that should
/// run on single threaded executors. Occasionally, it might also work with multithreaded
/// executors but it's not recommended to abuse that if you write a maintainable code.
///
#[doc = include_str!("../doc/FetchPage")]
pub trait FetchPage<T> {
    type FetchError;

    #[doc = include_str!("../doc/FetchPage__fetch_page")]
    fn fetch_page(&self, token: Token) -> impl Future<Output = FetchResult<T, Self>>;
}

impl<D, P, T> FetchPage<T> for D
where
    D: std::ops::Deref<Target = P>,
    P: FetchPage<T>,
{
    type FetchError = FetchError<T, P>;

    async fn fetch_page(&self, token: Token) -> FetchResult<T, Self> {
        self.deref().fetch_page(token).await
    }
}

page_cursor_def!();

#[doc = include_str!("../doc/PagesStream")]
pub trait PagesStream<T, E>: Stream<Item = Result<T, E>> {
    #[doc = include_str!("../doc/PagesStream__items")]
    fn items(self) -> impl Stream<Item = Result<<T as IntoIterator>::Item, E>>
    where
        T: IntoIterator;
}

impl<S, T, E> PagesStream<T, E> for S
where
    S: Stream<Item = Result<T, E>>,
{
    fn items(self) -> impl Stream<Item = Result<<T as IntoIterator>::Item, E>>
    where
        T: IntoIterator,
    {
        self.map_ok(|items| stream::iter(items.into_iter().map(Ok)))
            .try_flatten()
    }
}

turn_page_decl!();
walk_next_decl!();
