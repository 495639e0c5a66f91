macro_rules! page_cursor_def {
    ($($extra_bounds:tt)*) => {
        /// One page of a paginated collection bound to the fetcher that turns its tokens into
        /// adjacent pages.
        ///
        /// A cursor never changes after construction. [`PageCursor::previous`] and
        /// [`PageCursor::next`] produce new cursors which share a clone of the same fetcher, so a
        /// whole chain of pages is built lazily, one hop per call.
        #[derive(Clone)]
        pub struct PageCursor<T, F> {
            page: Page<T>,
            fetcher: F,
        }

        impl<T, F> PageCursor<T, F>
        where
            F: FetchPage<T> + Clone,
            $($extra_bounds)*
        {
            pub fn new(page: Page<T>, fetcher: F) -> Self {
                Self { page, fetcher }
            }

            /// Builds a cursor out of a page whose pagination metadata wasn't checked yet. Fails
            /// if either `results_per_page` or `total_results` is missing.
            pub fn try_from_raw(raw: RawPage<T>, fetcher: F) -> Result<Self, MalformedPage> {
                Ok(Self::new(Page::try_from(raw)?, fetcher))
            }

            /// Fetches the previous page.
            ///
            /// Returns `None` without fetching anything if this is the first page. Otherwise the
            /// outcome of exactly one [`FetchPage::fetch_page`] call is returned as is. Nothing is
            /// cached: calling this twice fetches the page twice.
            pub async fn previous(&self) -> Option<CursorResult<T, F>> {
                self.adjacent(crate::internal::Direction::Backward).await
            }

            /// Fetches the next page.
            ///
            /// Returns `None` without fetching anything if this is the last page. Otherwise the
            /// outcome of exactly one [`FetchPage::fetch_page`] call is returned as is. Nothing is
            /// cached: calling this twice fetches the page twice.
            pub async fn next(&self) -> Option<CursorResult<T, F>> {
                self.adjacent(crate::internal::Direction::Forward).await
            }

            /// Collects data of every page of the collection in page order.
            ///
            /// Previous pages are fetched first, one after another, then the next ones. The first
            /// error aborts the whole operation and is returned, data collected so far is
            /// discarded. Page payloads are not flattened, there is one entry per page.
            pub async fn all(self) -> Result<Vec<T>, FetchError<T, F>> {
                use crate::internal::Direction;

                let Self { page, fetcher } = self;
                let Page {
                    data,
                    prev_token,
                    next_token,
                    ..
                } = page;

                let mut pages = std::collections::VecDeque::from([data]);

                let mut token = prev_token;
                while let Some(current) = token.take() {
                    let page = turn_page(&fetcher, current, Direction::Backward).await?;
                    token = page.prev_token;
                    pages.push_front(page.data);
                }

                let mut token = next_token;
                while let Some(current) = token.take() {
                    let page = turn_page(&fetcher, current, Direction::Forward).await?;
                    token = page.next_token;
                    pages.push_back(page.data);
                }

                tracing::debug!(pages = pages.len(), "collected all pages");
                Ok(pages.into())
            }

            /// Returns a stream that yields this page's data and then data of every next page.
            /// Pages are fetched lazily, one per poll. The stream ends after the last page or
            /// right after yielding an error.
            pub fn forward(self) -> impl PagesStream<T, FetchError<T, F>> {
                stream::try_unfold(
                    crate::internal::WalkState::new(
                        self.page,
                        self.fetcher,
                        crate::internal::Direction::Forward,
                    ),
                    walk_next,
                )
            }

            /// Same as [`PageCursor::forward`] but walks towards the first page. Pages are yielded
            /// in the reverse order.
            pub fn backward(self) -> impl PagesStream<T, FetchError<T, F>> {
                stream::try_unfold(
                    crate::internal::WalkState::new(
                        self.page,
                        self.fetcher,
                        crate::internal::Direction::Backward,
                    ),
                    walk_next,
                )
            }

            async fn adjacent(
                &self,
                direction: crate::internal::Direction,
            ) -> Option<CursorResult<T, F>> {
                let Some(token) = direction.token(&self.page).cloned() else {
                    tracing::trace!(%direction, "no adjacent page");
                    return None;
                };

                let result = turn_page(&self.fetcher, token, direction)
                    .await
                    .map(|page| Self::new(page, self.fetcher.clone()));

                Some(result)
            }
        }

        impl<T, F> PageCursor<T, F> {
            pub fn page(&self) -> &Page<T> {
                &self.page
            }

            pub fn into_page(self) -> Page<T> {
                self.page
            }

            pub fn data(&self) -> &T {
                &self.page.data
            }

            pub fn into_data(self) -> T {
                self.page.data
            }

            /// Amount of items the server put into this page.
            pub fn results_per_page(&self) -> u64 {
                self.page.results_per_page
            }

            /// Amount of items in the whole collection as reported by the server. Don't rely on
            /// it to compute exact pagination bounds, APIs tend to overcount.
            pub fn total_results(&self) -> u64 {
                self.page.total_results
            }

            pub fn has_previous(&self) -> bool {
                self.page.prev_token.is_some()
            }

            pub fn has_next(&self) -> bool {
                self.page.next_token.is_some()
            }

            pub fn fetcher(&self) -> &F {
                &self.fetcher
            }
        }

        impl<T, F> std::fmt::Debug for PageCursor<T, F>
        where
            T: std::fmt::Debug,
        {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct("PageCursor")
                    .field("page", &self.page)
                    .finish_non_exhaustive()
            }
        }
    };
}

pub(crate) use page_cursor_def;
