use tokio::sync::mpsc;

use crate::common::{ApiCommand, ApiEvent};

use super::client::BackendClient;

/// Background task that turns UI commands into backend calls.
pub struct ApiWorker {
    client: BackendClient,
    top_k: usize,
    event_sender: mpsc::Sender<ApiEvent>,
    command_receiver: mpsc::Receiver<ApiCommand>,
}

impl ApiWorker {
    pub fn new(
        client: BackendClient,
        top_k: usize,
        event_sender: mpsc::Sender<ApiEvent>,
        command_receiver: mpsc::Receiver<ApiCommand>,
    ) -> Self {
        Self {
            client,
            top_k,
            event_sender,
            command_receiver,
        }
    }

    /// Runs until the UI drops its command sender.
    ///
    /// Every command gets its own task, so a slow call never blocks the next
    /// one and completions may arrive in any order.
    pub async fn run(mut self) {
        log::info!("API worker started for {}", self.client.base_url());

        while let Some(command) = self.command_receiver.recv().await {
            log::debug!("Dispatching {command:?}");
            let client = self.client.clone();
            let events = self.event_sender.clone();
            let top_k = self.top_k;
            tokio::spawn(async move {
                handle_command(client, top_k, command, events).await;
            });
        }

        log::info!("Command channel closed; API worker stopping");
    }
}

async fn handle_command(
    client: BackendClient,
    top_k: usize,
    command: ApiCommand,
    events: mpsc::Sender<ApiEvent>,
) {
    match command {
        ApiCommand::Search { query } => {
            let event = match client.search(&query, top_k).await {
                Ok(response) => {
                    log::info!(
                        "Search '{query}' returned {} result(s)",
                        response.results.len()
                    );
                    ApiEvent::SearchCompleted { query, response }
                }
                Err(err) => {
                    log::warn!("Search for '{query}' failed: {err}");
                    ApiEvent::SearchFailed {
                        query,
                        error: err.to_string(),
                    }
                }
            };
            emit(&events, event).await;
        }
        ApiCommand::ProcessPdf => {
            let event = match client.process_pdf().await {
                Ok(response) => {
                    log::info!("Backend created {} chunks", response.chunks_created);
                    ApiEvent::PdfProcessed(response)
                }
                Err(err) => {
                    log::warn!("POST /process-pdf failed: {err}");
                    ApiEvent::PdfFailed(err.to_string())
                }
            };
            emit(&events, event).await;
        }
        ApiCommand::CheckHealth => match client.health().await {
            Ok(health) => {
                emit(&events, ApiEvent::HealthChecked(health)).await;
                match client.system_info().await {
                    Ok(info) => emit(&events, ApiEvent::SystemInfoLoaded(info)).await,
                    Err(err) => log::debug!("System info unavailable: {err}"),
                }
            }
            Err(err) => {
                log::warn!("GET /health failed: {err}");
                emit(&events, ApiEvent::HealthFailed(err.to_string())).await;
            }
        },
    }
}

async fn emit(events: &mpsc::Sender<ApiEvent>, event: ApiEvent) {
    if let Err(err) = events.send(event).await {
        log::warn!("Failed to notify UI: {err}");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::AppConfig;
    use crate::network::client::stub;

    async fn start(base_url: &str) -> (mpsc::Sender<ApiCommand>, mpsc::Receiver<ApiEvent>) {
        let config = AppConfig::default().with_api_url(Some(base_url));
        let client = BackendClient::new(&config).expect("client");
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(8);
        tokio::spawn(ApiWorker::new(client, config.top_k, event_tx, cmd_rx).run());
        (cmd_tx, event_rx)
    }

    async fn next(events: &mut mpsc::Receiver<ApiEvent>) -> ApiEvent {
        tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("event in time")
            .expect("worker alive")
    }

    #[tokio::test]
    async fn search_command_reports_results() {
        let base = stub::spawn(stub::ready()).await;
        let (commands, mut events) = start(&base).await;

        commands
            .send(ApiCommand::Search {
                query: "inteligencia artificial".to_string(),
            })
            .await
            .unwrap();

        match next(&mut events).await {
            ApiEvent::SearchCompleted { query, response } => {
                assert_eq!(query, "inteligencia artificial");
                assert_eq!(response.top_k_requested, 3);
                assert_eq!(response.results.len(), 2);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn health_check_is_followed_by_system_info() {
        let base = stub::spawn(stub::ready()).await;
        let (commands, mut events) = start(&base).await;

        commands.send(ApiCommand::CheckHealth).await.unwrap();

        assert!(matches!(
            next(&mut events).await,
            ApiEvent::HealthChecked(health) if health.service_loaded
        ));
        assert!(matches!(
            next(&mut events).await,
            ApiEvent::SystemInfoLoaded(info) if info.system == "Linux"
        ));
    }

    #[tokio::test]
    async fn missing_system_endpoint_is_ignored() {
        let base = stub::spawn(stub::unready()).await;
        let (commands, mut events) = start(&base).await;

        commands.send(ApiCommand::CheckHealth).await.unwrap();
        assert!(matches!(next(&mut events).await, ApiEvent::HealthChecked(_)));

        commands.send(ApiCommand::ProcessPdf).await.unwrap();
        match next(&mut events).await {
            ApiEvent::PdfFailed(error) => assert!(error.contains("PDF no encontrado")),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn failures_are_reported_not_retried() {
        let base = stub::spawn(stub::unready()).await;
        let (commands, mut events) = start(&base).await;

        commands
            .send(ApiCommand::Search {
                query: "hola".to_string(),
            })
            .await
            .unwrap();

        match next(&mut events).await {
            ApiEvent::SearchFailed { query, error } => {
                assert_eq!(query, "hola");
                assert!(error.contains("HTTP 503"));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(
            tokio::time::timeout(Duration::from_millis(200), events.recv())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn process_pdf_success() {
        let base = stub::spawn(stub::ready()).await;
        let (commands, mut events) = start(&base).await;

        commands.send(ApiCommand::ProcessPdf).await.unwrap();
        match next(&mut events).await {
            ApiEvent::PdfProcessed(response) => assert_eq!(response.chunks_created, 57),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
