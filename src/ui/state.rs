use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::common::{ChatMessage, HealthResponse, ProcessPdfResponse, SearchResponse, SystemInfo};

pub const WELCOME: &str = "¡Hola! Soy tu asistente académico. Puedo ayudarte a encontrar información en el libro \"Introducción a la Inteligencia Artificial\".";
pub const PROCESS_HINT: &str = "Para comenzar, necesitas procesar el PDF del libro. Haz clic en el botón \"Procesar PDF\" en la parte superior.";
pub const NO_RESULTS: &str =
    "Lo siento, no encontré información relevante sobre ese tema en el libro.";

/// How long a card shows "Copiado" after its text hits the clipboard.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    Loading,
    Healthy,
    Error,
}

/// Session-scoped UI state. Only the UI thread mutates it; nothing persists.
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input_text: String,
    pub is_loading: bool,
    pub backend_status: BackendStatus,
    pub pdf_processed: bool,
    pub processing: bool,
    pub system_info: Option<SystemInfo>,
    /// Pending clear-chat confirmation.
    pub confirm_clear: bool,
    notice: Option<String>,
    copied: Option<(String, Instant)>,
    expanded: HashSet<String>,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            messages: vec![
                ChatMessage::assistant(WELCOME),
                ChatMessage::assistant(PROCESS_HINT),
            ],
            input_text: String::new(),
            is_loading: false,
            backend_status: BackendStatus::Loading,
            pdf_processed: false,
            processing: false,
            system_info: None,
            confirm_clear: false,
            notice: None,
            copied: None,
            expanded: HashSet::new(),
        }
    }

    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Back to the lone welcome greeting.
    pub fn clear_chat(&mut self) {
        self.messages = vec![ChatMessage::assistant(WELCOME)];
        self.expanded.clear();
        self.copied = None;
        self.confirm_clear = false;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    // ========== Search ==========

    /// Accept the current input as a question. Returns the query to send, or
    /// `None` when the input is blank or a search is already running.
    pub fn begin_search(&mut self) -> Option<String> {
        if self.input_text.trim().is_empty() || self.is_loading {
            return None;
        }
        let query = std::mem::take(&mut self.input_text);
        self.add_message(ChatMessage::user(query.clone()));
        self.set_loading(true);
        Some(query)
    }

    pub fn finish_search(&mut self, query: String, response: SearchResponse) {
        let content = if response.found_results {
            format!(
                "Encontré {} resultado(s) relevantes:",
                response.results.len()
            )
        } else {
            NO_RESULTS.to_string()
        };
        self.add_message(ChatMessage::assistant(content).with_results(query, response.results));
        self.set_loading(false);
    }

    pub fn fail_search(&mut self, error: &str) {
        self.add_message(ChatMessage::assistant(format!(
            "❌ Error: {error}\n\nDetalles en el registro (RUST_LOG=debug)"
        )));
        self.set_loading(false);
    }

    // ========== Backend / PDF ==========

    pub fn apply_health(&mut self, health: &HealthResponse) {
        self.backend_status = BackendStatus::Healthy;
        self.pdf_processed = health.service_loaded;
    }

    pub fn health_failed(&mut self) {
        self.backend_status = BackendStatus::Error;
    }

    pub fn recheck_health(&mut self) {
        self.backend_status = BackendStatus::Loading;
    }

    /// The "Procesar PDF" button is only offered to a healthy backend without
    /// loaded embeddings.
    pub fn needs_processing(&self) -> bool {
        self.backend_status == BackendStatus::Healthy && !self.pdf_processed
    }

    pub fn begin_processing(&mut self) -> bool {
        if self.processing {
            return false;
        }
        self.processing = true;
        true
    }

    pub fn finish_processing(&mut self, response: &ProcessPdfResponse) {
        self.processing = false;
        self.pdf_processed = true;
        self.notice = Some(format!(
            "✅ {}\n\n📊 Chunks creados: {}",
            response.message, response.chunks_created
        ));
    }

    pub fn fail_processing(&mut self, error: &str) {
        self.processing = false;
        self.notice = Some(format!("❌ Error: {error}"));
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // ========== Result cards ==========

    pub fn mark_copied(&mut self, key: &str, now: Instant) {
        self.copied = Some((key.to_string(), now));
    }

    pub fn is_copied(&self, key: &str, now: Instant) -> bool {
        matches!(
            &self.copied,
            Some((copied, at)) if copied == key && now.saturating_duration_since(*at) < COPY_FEEDBACK
        )
    }

    pub fn toggle_expanded(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_string());
        }
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }
}

/// Stable key for one result card inside one message.
pub fn card_key(message_id: &str, chunk_id: i64) -> String {
    format!("{message_id}-{chunk_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SearchResult;

    fn result(rank: u32, percent: f64) -> SearchResult {
        SearchResult {
            chunk_id: rank as i64 * 10,
            text: format!("resultado {rank}"),
            similarity: percent / 100.0,
            similarity_percent: percent,
            rank,
            word_count: 2,
        }
    }

    fn response(results: Vec<SearchResult>) -> SearchResponse {
        SearchResponse {
            query: "q".to_string(),
            found_results: !results.is_empty(),
            results,
            top_k_requested: 3,
            threshold_used: 0.3,
        }
    }

    #[test]
    fn starts_with_two_greetings() {
        let state = ChatState::new();
        assert_eq!(state.messages.len(), 2);
        assert!(state.messages.iter().all(|m| !m.is_user()));
        assert_eq!(state.backend_status, BackendStatus::Loading);
    }

    #[test]
    fn add_message_grows_history_by_one() {
        let mut state = ChatState::new();
        let before = state.messages.len();
        state.add_message(ChatMessage::user("hola"));
        assert_eq!(state.messages.len(), before + 1);
    }

    #[test]
    fn clear_chat_resets_to_welcome() {
        let mut state = ChatState::new();
        state.add_message(ChatMessage::user("hola"));
        state.toggle_expanded("x");
        state.confirm_clear = true;

        state.clear_chat();
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].content, WELCOME);
        assert!(!state.is_expanded("x"));
        assert!(!state.confirm_clear);
    }

    #[test]
    fn blank_input_or_busy_state_is_rejected() {
        let mut state = ChatState::new();
        state.input_text = "   ".to_string();
        assert_eq!(state.begin_search(), None);
        assert_eq!(state.messages.len(), 2);

        state.input_text = "¿Qué es un agente?".to_string();
        assert_eq!(state.begin_search().as_deref(), Some("¿Qué es un agente?"));
        assert!(state.is_loading);
        assert!(state.input_text.is_empty());
        assert_eq!(state.messages.len(), 3);
        assert!(state.messages[2].is_user());

        state.input_text = "otra".to_string();
        assert_eq!(state.begin_search(), None);
        assert_eq!(state.input_text, "otra");
    }

    #[test]
    fn finished_search_appends_results() {
        let mut state = ChatState::new();
        state.input_text = "agentes".to_string();
        let query = state.begin_search().unwrap();

        state.finish_search(query, response(vec![result(1, 85.0), result(2, 70.0)]));
        let last = state.messages.last().unwrap();
        assert_eq!(last.content, "Encontré 2 resultado(s) relevantes:");
        assert_eq!(last.results.as_ref().map(Vec::len), Some(2));
        assert_eq!(last.query.as_deref(), Some("agentes"));
        assert!(!state.is_loading);
    }

    #[test]
    fn empty_search_uses_apology() {
        let mut state = ChatState::new();
        state.finish_search("nada".to_string(), response(Vec::new()));
        let last = state.messages.last().unwrap();
        assert_eq!(last.content, NO_RESULTS);
        assert_eq!(last.results.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn failed_search_shows_literal_error() {
        let mut state = ChatState::new();
        state.set_loading(true);
        state.fail_search("connection refused");
        let last = state.messages.last().unwrap();
        assert!(last.content.starts_with("❌ Error: connection refused"));
        assert!(last.results.is_none());
        assert!(!state.is_loading);
    }

    #[test]
    fn health_drives_processing_prompt() {
        let mut state = ChatState::new();
        assert!(!state.needs_processing());

        state.apply_health(&HealthResponse::default());
        assert_eq!(state.backend_status, BackendStatus::Healthy);
        assert!(state.needs_processing());

        state.apply_health(&HealthResponse {
            service_loaded: true,
            ..Default::default()
        });
        assert!(!state.needs_processing());

        state.health_failed();
        assert_eq!(state.backend_status, BackendStatus::Error);
        assert!(!state.needs_processing());
    }

    #[test]
    fn processing_outcomes_raise_notices() {
        let mut state = ChatState::new();
        assert!(state.begin_processing());
        assert!(!state.begin_processing());

        state.finish_processing(&ProcessPdfResponse {
            message: "PDF procesado exitosamente".to_string(),
            chunks_created: 42,
            status: "success".to_string(),
            embeddings_path: None,
            chunks_path: None,
        });
        assert!(!state.processing);
        assert!(state.pdf_processed);
        assert_eq!(
            state.notice(),
            Some("✅ PDF procesado exitosamente\n\n📊 Chunks creados: 42")
        );

        state.dismiss_notice();
        assert!(state.begin_processing());
        state.fail_processing("PDF no encontrado (HTTP 404)");
        assert_eq!(state.notice(), Some("❌ Error: PDF no encontrado (HTTP 404)"));
    }

    #[test]
    fn copy_feedback_expires() {
        let mut state = ChatState::new();
        let now = Instant::now();
        let key = card_key("m1", 7);
        assert_eq!(key, "m1-7");

        state.mark_copied(&key, now);
        assert!(state.is_copied(&key, now + Duration::from_millis(1500)));
        assert!(!state.is_copied("m1-8", now));
        assert!(!state.is_copied(&key, now + COPY_FEEDBACK));
    }

    #[test]
    fn expansion_toggles() {
        let mut state = ChatState::new();
        state.toggle_expanded("m1-7");
        assert!(state.is_expanded("m1-7"));
        state.toggle_expanded("m1-7");
        assert!(!state.is_expanded("m1-7"));
    }
}
