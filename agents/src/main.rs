use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use agents::{
    AgentContext, ArrangerAgent, CollectorAgent, IdentifierAgent, Orchestrator,
};
use common::config::load_config;
use common::{OutputPaths, PipelineConfig};
use gemini_client::{validate_api_key, GeminiClient};
use market_chat::{ChatSession, KnowledgeBase};

const CONFIG_FILE: &str = "crowdwisdom.toml";

const BANNER: &str = r#"
+--------------------------------------------------------------+
|                CrowdWisdom Trading AI Agent                  |
|                                                              |
|  Multi-Agent Prediction Market Data Collection & Analysis    |
+--------------------------------------------------------------+
"#;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = load_pipeline_config();
    let paths = OutputPaths::new(&config.reports.output_dir);
    paths.ensure_dir()?;

    // Keep the non-blocking writer guard alive for the whole run
    let _guard = init_logging(&paths);

    println!("{}", BANNER);

    let gemini = check_requirements();
    let ctx = AgentContext::new(config, gemini);

    let options = [
        "Run data pipeline (collect & analyze markets)",
        "Chat with AI about markets",
        "Both (pipeline then chat)",
        "Exit",
    ];

    let choice = Select::new()
        .with_prompt("CrowdWisdom Trading AI options")
        .items(&options)
        .default(0)
        .interact()?;

    match choice {
        0 => {
            info!("User selected: pipeline only");
            if !run_pipeline(&ctx).await {
                std::process::exit(1);
            }
        }
        1 => {
            info!("User selected: chat only");
            run_chat_with_data_check(&ctx).await?;
        }
        2 => {
            info!("User selected: pipeline then chat");
            if run_pipeline(&ctx).await {
                println!("\nPipeline completed successfully, launching chat interface...");
                run_chat(&ctx).await?;
            } else {
                println!("Pipeline failed, skipping chat interface.");
                std::process::exit(1);
            }
        }
        _ => {
            println!("Thank you for using CrowdWisdom Trading AI!");
        }
    }

    Ok(())
}

/// Stdout plus non-ANSI file logging under the output directory.
fn init_logging(paths: &OutputPaths) -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = paths.dir().to_path_buf();
    let file_appender = tracing_appender::rolling::never(log_dir, "app.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stdout_layer = fmt::layer().with_writer(std::io::stdout);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}

fn load_pipeline_config() -> PipelineConfig {
    if std::path::Path::new(CONFIG_FILE).exists() {
        match load_config(CONFIG_FILE) {
            Ok(config) => return config,
            Err(e) => eprintln!("Could not read {}: {}, using defaults", CONFIG_FILE, e),
        }
    }
    PipelineConfig::default()
}

/// Validate the API key and build the Gemini client. The pipeline still runs
/// without one; matching falls back to rule-based scoring and chat is
/// unavailable.
fn check_requirements() -> Option<GeminiClient> {
    info!("Checking system requirements");

    let key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            warn!("GEMINI_API_KEY not found");
            println!("GEMINI_API_KEY is not set.");
            println!("To enable AI-powered matching and chat:");
            println!("  1. Create an API key at https://aistudio.google.com/");
            println!("  2. Export it: export GEMINI_API_KEY=your-key");
            println!("Continuing with rule-based matching only.\n");
            return None;
        }
    };

    match validate_api_key(&key) {
        Ok(()) => {
            let preview: String = key.chars().take(8).collect();
            info!("Requirements satisfied, API key: {}...", preview);
            Some(GeminiClient::new(key))
        }
        Err(e) => {
            warn!("Invalid GEMINI_API_KEY: {}", e);
            println!("GEMINI_API_KEY looks invalid: {}", e);
            println!("Continuing with rule-based matching only.\n");
            None
        }
    }
}

async fn run_pipeline(ctx: &AgentContext) -> bool {
    print_pipeline_plan();

    let confirmed = Confirm::new()
        .with_prompt("Ready to start pipeline execution?")
        .default(false)
        .interact()
        .unwrap_or(false);
    if !confirmed {
        println!("Pipeline execution cancelled by user.");
        return false;
    }

    let mut orchestrator = Orchestrator::new(ctx.clone());
    orchestrator.register(Arc::new(CollectorAgent::new()));
    orchestrator.register(Arc::new(IdentifierAgent::new()));
    orchestrator.register(Arc::new(ArrangerAgent::new()));

    match orchestrator.run_pipeline().await {
        Ok(summary) => {
            println!("\nPIPELINE COMPLETED SUCCESSFULLY");
            println!("Total execution time: {:.2} seconds", summary.total_secs);
            println!("\nNext steps:");
            println!("  - Open {}/final_products.csv in a spreadsheet", ctx.paths.dir().display());
            println!("  - Review {}/analysis_reports.json for insights", ctx.paths.dir().display());
            println!("  - Check {}/app.log for detailed execution logs", ctx.paths.dir().display());
            true
        }
        Err(e) => {
            error!("Pipeline failed: {}", e);
            println!("\nPipeline failed: {}", e);
            println!(
                "Check the logs in {}/app.log for details.",
                ctx.paths.dir().display()
            );
            false
        }
    }
}

fn print_pipeline_plan() {
    println!(
        "
PIPELINE EXECUTION PLAN:

  Step 1: Data Collection
    - Scrape Polymarket prediction markets
    - Scrape Kalshi trading contracts
    - Scrape Prediction-Market data
    - Scrape Manifold Markets
    - Save raw data to JSON

  Step 2: Product Identification
    - Load raw market data
    - Apply AI-powered product matching
    - Calculate similarity confidence scores
    - Unify similar products across platforms
    - Save unified data structure

  Step 3: Data Arrangement
    - Create comprehensive CSV output
    - Generate simplified analysis format
    - Calculate market metrics
    - Produce summary statistics
    - Export report formats
"
    );
}

/// Chat entry point used when the user picked chat directly: offers to run
/// the pipeline first if no unified data exists yet.
async fn run_chat_with_data_check(ctx: &AgentContext) -> Result<()> {
    if !ctx.paths.unified_data().exists() {
        println!("\nNo prediction market data found!");
        println!("Tip: run the pipeline first to collect data for the chat.");

        let run_first = Confirm::new()
            .with_prompt("Run pipeline first?")
            .default(false)
            .interact()
            .unwrap_or(false);

        if !run_first {
            println!("Cannot launch chat without market data.");
            return Ok(());
        }
        if !run_pipeline(ctx).await {
            println!("Pipeline failed. Cannot launch chat without data.");
            return Ok(());
        }
        println!("\nPipeline completed, launching chat interface...");
    }

    run_chat(ctx).await
}

async fn run_chat(ctx: &AgentContext) -> Result<()> {
    let client = match &ctx.gemini {
        Some(client) => client.clone(),
        None => {
            println!("Chat requires a valid GEMINI_API_KEY.");
            return Ok(());
        }
    };

    let kb = match KnowledgeBase::load(&ctx.paths) {
        Ok(kb) => kb,
        Err(e) => {
            println!("Could not build the knowledge base: {}", e);
            return Ok(());
        }
    };

    let mut session = ChatSession::new(client, kb, ctx.config.chat.clone());
    println!("\nPrediction Market ChatBot ready ({} documents indexed).", session.document_count());
    println!("Type 'quit' to exit, 'summary' for a market overview, 'arbitrage' for opportunities.");
    println!("{}", "-".repeat(60));

    loop {
        let question: String = Input::new().with_prompt("You").interact_text()?;
        let trimmed = question.trim();

        let response = match trimmed.to_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" | "bye" => {
                println!("Goodbye! Happy trading!");
                break;
            }
            "summary" => session.market_summary().await,
            "arbitrage" => session.arbitrage_opportunities().await,
            _ => session.ask(trimmed).await,
        };

        match response {
            Ok(answer) => println!("\nBot: {}\n", answer),
            Err(e) => println!("\nSorry, I encountered an error: {}\n", e),
        }
    }

    Ok(())
}
