use anyhow::Result;
use clap::Parser;
use session_lens::{
    analysis::AnalysisService, config, generation, logging, pipeline::SessionContext,
};

/// Analyze training-session materials into an AI-written quality report.
#[derive(Debug, Parser)]
#[command(name = "session-lens", version, about)]
struct Cli {
    /// File paths or URLs to analyze.
    inputs: Vec<String>,

    /// Title of the training session the materials belong to.
    #[arg(long)]
    session_title: Option<String>,

    /// Short description of the training session.
    #[arg(long)]
    session_description: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.inputs.is_empty() {
        eprintln!("Usage: session-lens <file_or_url>... [--session-title TITLE]");
        std::process::exit(1);
    }

    config::init_config();
    logging::init_tracing();

    let session = SessionContext {
        title: cli.session_title,
        description: cli.session_description,
    };

    let service = AnalysisService::new(generation::client_from_config());
    tracing::info!(inputs = cli.inputs.len(), "Starting session analysis");
    let report = service.analyze_session(&cli.inputs, &session).await?;

    let snapshot = service.metrics_snapshot();
    tracing::info!(
        generation_calls = snapshot.generation_calls,
        chunk_failures = snapshot.chunk_failures,
        "Analysis complete"
    );

    println!("=== Feedback Report ===\n");
    println!("{report}");

    Ok(())
}
