use crate::{Page, Token};
use std::sync::Mutex;

pub type Items = Vec<usize>;

/// An in-memory collection split into pages linked with `page-<index>` tokens. Remembers indices
/// of all fetched pages.
#[derive(Debug)]
pub struct ChainClient {
    pages: Vec<Result<Page<Items>, String>>,
    fetched: Mutex<Vec<usize>>,
}

impl ChainClient {
    pub fn new(page_count: usize, page_size: usize) -> Self {
        let total_results = (page_count * page_size) as u64;

        let pages = (0..page_count)
            .map(|index| {
                let data = (index * page_size..(index + 1) * page_size).collect();
                let prev_token = index.checked_sub(1).map(token_for);
                let next_token = (index + 1 < page_count).then(|| token_for(index + 1));

                Ok(Page::new(
                    data,
                    page_size as u64,
                    total_results,
                    prev_token,
                    next_token,
                ))
            })
            .collect();

        Self {
            pages,
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn page(&self, index: usize) -> Page<Items> {
        self.pages[index].clone().unwrap()
    }

    pub fn fetched(&self) -> Vec<usize> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }

    pub async fn get_page(&self, token: Token) -> Result<Page<Items>, String> {
        let index: usize = token
            .as_str()
            .strip_prefix("page-")
            .and_then(|index| index.parse().ok())
            .ok_or("Invalid token")?;

        self.fetched.lock().unwrap().push(index);

        self.pages
            .get(index)
            .ok_or("The page is out of bound")?
            .clone()
    }

    pub fn set_error(&mut self, index: usize) {
        self.set_error_with_msg(index, "Custom error");
    }

    pub fn set_error_with_msg(&mut self, index: usize, msg: &'static str) {
        self.pages[index] = Err(msg.into())
    }
}

pub fn token_for(index: usize) -> Token {
    Token::new(format!("page-{index}"))
}

macro_rules! chain_client_fetch_page_impl {
    (async_trait) => {
        #[async_trait]
        impl FetchPage<Items> for ChainClient {
            type FetchError = String;

            async fn fetch_page(&self, token: Token) -> FetchResult<Items, Self> {
                self.get_page(token).await
            }
        }
    };
    () => {
        impl FetchPage<Items> for ChainClient {
            type FetchError = String;

            async fn fetch_page(&self, token: Token) -> FetchResult<Items, Self> {
                self.get_page(token).await
            }
        }
    };
}

macro_rules! construction_base_test {
    () => {
        async {
            let client = std::sync::Arc::new(ChainClient::new(1, 2));

            let raw: RawPage<Items> = RawPage {
                data: vec![0, 1],
                results_per_page: Some(2),
                total_results: Some(2),
                prev_token: None,
                next_token: None,
            };

            let cursor = PageCursor::try_from_raw(raw.clone(), client.clone()).unwrap();
            assert_eq!(cursor.page(), &Page::single(vec![0, 1], 2, 2));

            let err = PageCursor::try_from_raw(
                RawPage {
                    results_per_page: None,
                    ..raw.clone()
                },
                client.clone(),
            )
            .unwrap_err();
            assert_eq!(err, MalformedPage::MissingResultsPerPage);

            let err = PageCursor::try_from_raw(
                RawPage {
                    total_results: None,
                    ..raw.clone()
                },
                client.clone(),
            )
            .unwrap_err();
            assert_eq!(err, MalformedPage::MissingTotalResults);

            let single = PageCursor::new(client.page(0), client.clone());
            assert_eq!(single.all().await, Ok(vec![vec![0, 1]]));
            assert_eq!(client.fetch_count(), 0, "A single page must not fetch anything");
        }
    };
}

macro_rules! navigation_base_test {
    () => {
        async {
            let client = std::sync::Arc::new(ChainClient::new(3, 4));

            let first = PageCursor::new(client.page(0), client.clone());
            assert!(!first.has_previous());
            assert!(first.previous().await.is_none(), "The first page has no previous page");

            let last = PageCursor::new(client.page(2), client.clone());
            assert!(!last.has_next());
            assert!(last.next().await.is_none(), "The last page has no next page");

            assert_eq!(client.fetch_count(), 0, "Nothing must be fetched without a token");

            // Round trip
            let middle = first.next().await.unwrap().unwrap();
            assert_eq!(middle.page(), &client.page(1));
            assert_eq!(middle.data(), &vec![4, 5, 6, 7]);
            assert_eq!(middle.results_per_page(), 4);
            assert_eq!(middle.total_results(), 12);

            let last = middle.next().await.unwrap().unwrap();
            assert_eq!(last.page(), &client.page(2));

            let back = last.previous().await.unwrap().unwrap();
            assert_eq!(back.page(), middle.page());
            assert_eq!(client.fetched(), vec![1, 2, 1]);

            // No caching
            let once = last.previous().await.unwrap().unwrap();
            let twice = last.previous().await.unwrap().unwrap();
            assert_eq!(once.page(), twice.page());
            assert_eq!(client.fetched(), vec![1, 2, 1, 1, 1], "Every call must fetch");

            // Errors are passed through as is
            let mut client = ChainClient::new(3, 4);
            client.set_error_with_msg(0, "Previous error");
            client.set_error_with_msg(2, "Next error");
            let client = std::sync::Arc::new(client);

            let middle = PageCursor::new(client.page(1), client.clone());
            match middle.previous().await {
                Some(Err(err)) => assert_eq!(err, "Previous error"),
                other => panic!("Expected a fetch error, got {other:?}"),
            }

            match middle.next().await {
                Some(Err(err)) => assert_eq!(err, "Next error"),
                other => panic!("Expected a fetch error, got {other:?}"),
            }
        }
    };
}

macro_rules! all_base_test {
    () => {
        async {
            let client = std::sync::Arc::new(ChainClient::new(5, 3));
            let expected: Vec<_> = (0..5).map(|index| client.page(index).data).collect();

            let pages = PageCursor::new(client.page(2), client.clone())
                .all()
                .await
                .unwrap();

            assert_eq!(pages.len(), 5, "There should be 5 pages");
            assert_eq!(pages, expected, "Pages must be in page order");
            assert_eq!(
                client.fetched(),
                vec![1, 0, 3, 4],
                "The backward walk must finish before the forward one"
            );

            let client = std::sync::Arc::new(ChainClient::new(5, 3));

            let pages = PageCursor::new(client.page(0), client.clone())
                .all()
                .await
                .unwrap();
            assert_eq!(pages, expected, "After collecting from the first page");

            let pages = PageCursor::new(client.page(4), client.clone())
                .all()
                .await
                .unwrap();
            assert_eq!(pages, expected, "After collecting from the last page");

            // The second backward fetch fails
            let mut client = ChainClient::new(5, 3);
            client.set_error(0);
            let client = std::sync::Arc::new(client);

            let result = PageCursor::new(client.page(2), client.clone()).all().await;
            assert_eq!(result, Err("Custom error".to_owned()));
            assert_eq!(
                client.fetched(),
                vec![1, 0],
                "Nothing must be fetched forward after a backward failure"
            );

            // A forward fetch fails after the backward walk succeeded
            let mut client = ChainClient::new(5, 3);
            client.set_error(4);
            let client = std::sync::Arc::new(client);

            let result = PageCursor::new(client.page(2), client.clone()).all().await;
            assert_eq!(result, Err("Custom error".to_owned()));
            assert_eq!(client.fetched(), vec![1, 0, 3, 4]);
        }
    };
}

macro_rules! streams_base_test {
    () => {
        async {
            let client = std::sync::Arc::new(ChainClient::new(4, 2));

            let pages: Vec<_> = PageCursor::new(client.page(1), client.clone())
                .forward()
                .try_collect()
                .await
                .unwrap();

            assert_eq!(
                pages,
                vec![
                    client.page(1).data,
                    client.page(2).data,
                    client.page(3).data
                ]
            );

            let pages: Vec<_> = PageCursor::new(client.page(1), client.clone())
                .backward()
                .try_collect()
                .await
                .unwrap();

            assert_eq!(pages, vec![client.page(1).data, client.page(0).data]);

            let items: Vec<_> = PageCursor::new(client.page(0), client.clone())
                .forward()
                .items()
                .try_collect()
                .await
                .unwrap();

            assert_eq!(items, (0..8).collect::<Vec<_>>());

            let fetched_before = client.fetch_count();
            let mut stream =
                std::pin::pin!(PageCursor::new(client.page(0), client.clone()).forward());

            let item = stream.try_next().await;
            assert_eq!(item, Ok(Some(client.page(0).data)));
            assert_eq!(
                client.fetch_count(),
                fetched_before,
                "The current page must be yielded without fetching"
            );

            let mut client = ChainClient::new(4, 2);
            client.set_error(2);
            let client = std::sync::Arc::new(client);

            let mut stream =
                std::pin::pin!(PageCursor::new(client.page(0), client.clone()).forward());

            let item = stream.try_next().await;
            assert_eq!(item, Ok(Some(client.page(0).data)));

            let item = stream.try_next().await;
            assert_eq!(item, Ok(Some(client.page(1).data)));

            let item = stream.try_next().await;
            assert_eq!(item, Err("Custom error".to_owned()));

            let item = stream.try_next().await;
            assert_eq!(item, Ok(None), "The stream must end after an error");
        }
    };
}

macro_rules! cursor_base_test {
    () => {
        async {
            construction_base_test!().await;
            navigation_base_test!().await;
        }
    };
}

pub(crate) use all_base_test;
pub(crate) use chain_client_fetch_page_impl;
pub(crate) use construction_base_test;
pub(crate) use cursor_base_test;
pub(crate) use navigation_base_test;
pub(crate) use streams_base_test;
