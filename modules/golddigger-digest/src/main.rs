use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use golddigger_common::{Config, ScoringVariant};
use golddigger_digest::Digest;

/// Summarize the comments of one YouTube video and print the result as JSON.
#[derive(Parser, Debug)]
#[command(name = "digest")]
struct Args {
    /// Video URL or bare 11-character id.
    url: String,

    /// Override SCORING_VARIANT (high_value or health_signal).
    #[arg(long)]
    variant: Option<ScoringVariant>,

    /// Skip the model pass even if ANTHROPIC_API_KEY is set.
    #[arg(long)]
    no_extract: bool,

    /// Emit logs as JSON.
    #[arg(long, env = "LOG_JSON")]
    json_logs: bool,
}

/// Info-level targets on top of whatever `RUST_LOG` asks for.
const LOG_DIRECTIVES: &[&str] = &["digest=info", "golddigger=info", "youtube_client=info"];

fn log_filter(base: EnvFilter) -> Result<EnvFilter> {
    LOG_DIRECTIVES
        .iter()
        .try_fold(base, |filter, d| Ok(filter.add_directive(d.parse()?)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = log_filter(EnvFilter::from_default_env())?;
    if args.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = Config::from_env()?;
    if let Some(variant) = args.variant {
        config.scoring_variant = variant;
    }
    if args.no_extract {
        config.anthropic_api_key = None;
    }
    config.log_redacted();

    let digest = Digest::from_config(&config)?;

    // Ctrl-C abandons the model call but still prints the keyword statistics.
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, skipping extraction");
            on_signal.cancel();
        }
    });

    let result = digest.summarize(&args.url, &cancel).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
