/// Requests the UI hands to the API worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    /// Run a semantic search with the configured `top_k`.
    Search { query: String },
    /// Ask the backend to ingest the book and rebuild its embeddings.
    ProcessPdf,
    /// Refresh backend health, followed by a best-effort system info fetch.
    CheckHealth,
}
