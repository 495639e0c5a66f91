//! A page cursor suitable for multithreaded executors. This is what you need in most cases. See
//! [`dynamic`] if you also need `dyn FetchPage` objects for some reason.

use crate::internal::*;
use futures::stream::{self, Stream, TryStreamExt};
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

/// A page fetcher suitable for use in multithreaded contexts
///
#[doc = include_str!("../doc/FetchPage")]
pub trait FetchPage<T>: Send + Sync
where
    T: Send,
{
    type FetchError: Send;

    #[doc = include_str!("../doc/FetchPage__fetch_page")]
    fn fetch_page(&self, token: Token) -> impl Send + Future<Output = FetchResult<T, Self>>;
}

impl<D, P, T> FetchPage<T> for D
where
    D: Send + Sync + std::ops::Deref<Target = P>,
    P: FetchPage<T>,
    T: Send,
{
    type FetchError = FetchError<T, P>;

    async fn fetch_page(&self, token: Token) -> FetchResult<T, Self> {
        self.deref().fetch_page(token).await
    }
}

page_cursor_def!(T: Send + Sync);

#[doc = include_str!("../doc/PagesStream")]
pub trait PagesStream<T, E>: Send + Stream<Item = Result<T, E>>
where
    T: Send,
    E: Send,
{
    #[doc = include_str!("../doc/PagesStream__items")]
    fn items(self) -> impl Send + Stream<Item = Result<<T as IntoIterator>::Item, E>>
    where
        T: IntoIterator,
        <T as IntoIterator>::Item: Send,
        <T as IntoIterator>::IntoIter: Send;
}

impl<S, T, E> PagesStream<T, E> for S
where
    T: Send,
    E: Send,
    S: Send + Stream<Item = Result<T, E>>,
{
    fn items(self) -> impl Send + Stream<Item = Result<<T as IntoIterator>::Item, E>>
    where
        T: IntoIterator,
        <T as IntoIterator>::Item: Send,
        <T as IntoIterator>::IntoIter: Send,
    {
        self.map_ok(|items| stream::iter(items.into_iter().map(Ok)))
            .try_flatten()
    }
}

turn_page_decl!(T: Send);
walk_next_decl!(T: Send);

#[cfg(feature = "dynamic")]
#[cfg_attr(docsrs, doc(cfg(feature = "dynamic")))]
pub mod dynamic {
    //! A page cursor over a fetcher that can be used as a `dyn` object

    use crate::internal::*;
    use async_trait::async_trait;
    use futures::stream;
    use std::sync::Arc;

    pub use super::PagesStream;
    pub use crate::{MalformedPage, Page, RawPage, Token};
    #[doc = include_str!("../doc/prelude")]
    pub mod prelude {
        pub use super::{
            CursorResult, DynFetchPage, DynPageCursor, FetchPage, FetchResult, MalformedPage,
            Page, PageCursor, PagesStream, RawPage, Token,
        };
    }

    #[doc = include_str!("../doc/FetchError")]
    pub type FetchError<T, F> = <F as FetchPage<T>>::FetchError;
    #[doc = include_str!("../doc/FetchResult")]
    pub type FetchResult<T, F> = Result<Page<T>, FetchError<T, F>>;
    #[doc = include_str!("../doc/CursorResult")]
    pub type CursorResult<T, F> = Result<PageCursor<T, F>, FetchError<T, F>>;

    /// A shared fetcher object with the error type `E`
    pub type DynFetchPage<T, E> = Arc<dyn FetchPage<T, FetchError = E>>;

    /// A cursor which fetches pages through a [`DynFetchPage`]
    pub type DynPageCursor<T, E> = PageCursor<T, DynFetchPage<T, E>>;

    /// A page fetcher which can be used with dynamic dispatch. Requires `#[async_trait]` to be
    /// implemented
    ///
    #[doc = include_str!("../doc/FetchPage")]
    #[async_trait]
    pub trait FetchPage<T>: Send + Sync
    where
        T: 'static + Send,
    {
        type FetchError: 'static + Send;

        #[doc = include_str!("../doc/FetchPage__fetch_page")]
        async fn fetch_page(&self, token: Token) -> FetchResult<T, Self>;
    }

    #[async_trait]
    impl<D, P, T> FetchPage<T> for D
    where
        D: Send + Sync + std::ops::Deref<Target = P>,
        P: ?Sized + FetchPage<T>,
        T: 'static + Send,
    {
        type FetchError = FetchError<T, P>;

        async fn fetch_page(&self, token: Token) -> FetchResult<T, Self> {
            self.deref().fetch_page(token).await
        }
    }

    page_cursor_def!(T: 'static + Send + Sync);

    turn_page_decl!(T: 'static + Send);
    walk_next_decl!(T: 'static + Send);
}
