mod common;
mod config;
mod network;
mod ui;

use std::error::Error;

use clap::{Parser, Subcommand};
use config::AppConfig;
use dotenvy::dotenv;
use network::{ApiWorker, BackendClient};
use tokio::sync::mpsc;
use ui::ChatApp;
use ui::format::{self, TRUNCATE_WORDS};

#[derive(Parser)]
#[command(
    name = "book_ai_chat",
    version,
    about = "Desktop chat client for the Book AI semantic search backend"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Backend base URL, overrides the config file
    #[arg(long, env = config::API_URL_ENV, value_name = "URL")]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the backend health report
    Health,
    /// Ask the backend to ingest the book PDF
    ProcessPdf,
    /// Run one search and print the results
    Search {
        query: String,
        /// Number of results to request (defaults to the config value)
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Write the effective configuration to the config path
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::resolve(&cli.config, cli.api_url.as_deref());

    match cli.command {
        None => run_desktop(app_config)?,
        Some(Command::Health) => print_health(&app_config).await?,
        Some(Command::ProcessPdf) => print_process_pdf(&app_config).await?,
        Some(Command::Search { query, top_k }) => {
            print_search(&app_config, &query, top_k.unwrap_or(app_config.top_k)).await?
        }
        Some(Command::InitConfig) => {
            config::save_config(&cli.config, &app_config)?;
            println!("Wrote {}", cli.config);
        }
    }

    Ok(())
}

fn run_desktop(app_config: AppConfig) -> Result<(), Box<dyn Error>> {
    // UI -> worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    let client = BackendClient::new(&app_config)?;
    tokio::spawn(ApiWorker::new(client, app_config.top_k, event_tx, cmd_rx).run());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 760.0])
            .with_min_inner_size([560.0, 420.0]),
        ..Default::default()
    };
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "Book AI Assistant",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!("Chat window started against {}", app_config.api_base_url);

            Ok(Box::new(ChatApp::new(cc, cmd_tx.clone(), event_receiver)))
        }),
    )?;
    Ok(())
}

async fn print_health(app_config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::new(app_config)?;
    let health = client.health().await?;
    println!("Backend:    {} ({})", health.status, health.service);
    println!("PDF:        {}", yes_no(health.pdf_exists));
    println!("Embeddings: {}", yes_no(health.embeddings_exist));
    println!("Loaded:     {}", yes_no(health.service_loaded));
    if let Some(threshold) = health.similarity_threshold {
        println!("Threshold:  {threshold}");
    }
    if let Ok(info) = client.system_info().await {
        println!("System:     {} • Python {}", info.system, info.python_version());
    }
    Ok(())
}

async fn print_process_pdf(app_config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::new(app_config)?;
    let response = client.process_pdf().await?;
    println!("✅ {}", response.message);
    println!("📊 Chunks creados: {}", response.chunks_created);
    Ok(())
}

async fn print_search(
    app_config: &AppConfig,
    query: &str,
    top_k: usize,
) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::new(app_config)?;
    let response = client.search(query, top_k.max(1)).await?;

    if !response.found_results {
        println!("{}", ui::state::NO_RESULTS);
        return Ok(());
    }

    println!(
        "Encontré {} resultado(s) relevantes (umbral {}):\n",
        response.results.len(),
        response.threshold_used
    );
    for result in &response.results {
        let page = format::extract_page_info(&result.text);
        let quality = format::quality(result.similarity_percent);
        let location = page
            .page
            .map(|page| format!(" · Página {page}"))
            .unwrap_or_default();
        println!(
            "Resultado #{} · {}% relevante ({}) · chunk {}{location}",
            result.rank,
            format::format_percent(result.similarity_percent),
            quality.label(),
            result.chunk_id,
        );
        println!(
            "{}\n",
            format::truncate_words(&page.text, TRUNCATE_WORDS, false).text
        );
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "sí" } else { "no" }
}
