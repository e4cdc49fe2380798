use thiserror::Error;

/// Errors that abort a scrape run.
///
/// Extraction misses are not errors: a page without a findable price or a
/// cell with a malformed number degrades to an Unknown decision and is
/// reported as `None` by the extractors, never through this type.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Network or HTTP-status failure while retrieving a page
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client itself could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    /// The loot page contained no table to extract
    #[error("no table found in page")]
    NoTable,

    /// The configured base URL does not parse
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// A configured pattern failed to compile
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Cache or output file I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV output failure
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
