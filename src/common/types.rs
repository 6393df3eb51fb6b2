use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One passage returned by the search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk_id: i64,
    pub text: String,
    pub similarity: f64,
    pub similarity_percent: f64,
    pub rank: u32,
    #[serde(default)]
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub found_results: bool,
    #[serde(default)]
    pub top_k_requested: usize,
    #[serde(default)]
    pub threshold_used: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessPdfResponse {
    pub message: String,
    #[serde(default)]
    pub chunks_created: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub embeddings_path: Option<String>,
    #[serde(default)]
    pub chunks_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub pdf_exists: bool,
    pub embeddings_exist: bool,
    pub service_loaded: bool,
    pub similarity_threshold: Option<f64>,
}

/// Host details reported by `/api/v1/system`. Best effort only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    pub system: String,
    pub release: String,
    pub python: String,
    pub python_path: String,
}

impl SystemInfo {
    pub fn python_version(&self) -> &str {
        self.python.split_whitespace().next().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

/// A single entry of the chat history. Never mutated after it is appended.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub author: Author,
    pub timestamp: DateTime<Local>,
    pub results: Option<Vec<SearchResult>>,
    /// Question that produced `results`, used for term highlighting.
    pub query: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Author::User, content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Author::Assistant, content.into())
    }

    pub fn with_results(mut self, query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        self.query = Some(query.into());
        self.results = Some(results);
        self
    }

    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }

    fn new(author: Author, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            author,
            timestamp: Local::now(),
            results: None,
            query: None,
        }
    }
}
