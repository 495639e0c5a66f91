use thiserror::Error;

/// Returned when an upstream response lacks pagination metadata every page must carry. Receiving
/// it means the API broke its contract, there is nothing a caller can do to recover from it
/// besides reporting.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedPage {
    #[error("malformed page: `results_per_page` is missing")]
    MissingResultsPerPage,

    #[error("malformed page: `total_results` is missing")]
    MissingTotalResults,
}
