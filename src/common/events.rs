use super::types::{HealthResponse, ProcessPdfResponse, SearchResponse, SystemInfo};

/// Outcomes the API worker reports back to the UI.
///
/// Errors are carried as display strings: the UI only ever shows them.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    SearchCompleted {
        query: String,
        response: SearchResponse,
    },
    SearchFailed {
        query: String,
        error: String,
    },
    PdfProcessed(ProcessPdfResponse),
    PdfFailed(String),
    HealthChecked(HealthResponse),
    HealthFailed(String),
    SystemInfoLoaded(SystemInfo),
}
