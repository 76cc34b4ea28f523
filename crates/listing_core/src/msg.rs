use crate::ProductRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A page was fetched and run through the extractor.
    PageExtracted {
        url: String,
        /// Where the fetch landed after redirects, when that differs from `url`.
        final_url: Option<String>,
        records: Vec<ProductRecord>,
        next_page: Option<String>,
    },
    /// The fetch collaborator could not deliver the page body.
    FetchFailed { url: String, reason: String },
    /// Caller asked to stop before the next fetch.
    CancelRequested,
}
