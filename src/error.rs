use thiserror::Error;

/// Every way resolving a query can fail. The `Display` text is the message
/// shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Please enter a search term.")]
    EmptyQuery,

    #[error("Unable to connect to Wikipedia. Please check your internet connection.")]
    Connectivity,

    #[error("No response from Wikipedia API.")]
    EmptyResponse,

    #[error("No results found for '{query}'.")]
    NoResults { query: String },

    /// Titles came back, but every one was a disambiguation page, a stub
    /// without an extract, or had no link.
    #[error("Could not find a detailed article for '{query}'. Try being more specific.")]
    NotSpecific { query: String },

    #[error("An unexpected error occurred while searching. Please try again.")]
    Unexpected,
}
