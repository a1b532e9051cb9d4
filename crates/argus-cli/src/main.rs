use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use argus_client::classifier::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use argus_client::{
    GeminiClassifier, LettreMailer, MailerConfig, RetryingClient, VisibleTextCleaner,
};
use argus_core::screen::{ScreenService, notify_applicant};
use argus_core::traits::NullLog;
use argus_core::{RotatingFetcher, Screening};
use argus_store::{CsvDecisionLog, DEFAULT_DECISIONS_PATH};

#[derive(Parser)]
#[command(name = "argus", version, about = "Agency eligibility screener")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen a website and report its eligibility decision
    Screen {
        /// Website to screen
        #[arg(short, long)]
        url: String,

        /// Email address to notify with the outcome
        #[arg(short, long)]
        notify: Option<String>,

        /// API key for the model endpoint
        #[arg(short, long, env = "ARGUS_API_KEY")]
        api_key: String,

        /// Model to ask for the verdict
        #[arg(short, long, env = "ARGUS_MODEL", default_value = DEFAULT_MODEL)]
        model: String,

        /// OpenAI-compatible API base URL
        #[arg(short, long, env = "ARGUS_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Decision log location
        #[arg(long, env = "ARGUS_DECISIONS_CSV", default_value = DEFAULT_DECISIONS_PATH)]
        csv: PathBuf,

        /// Skip appending the decision to the log
        #[arg(long, default_value_t = false)]
        no_save: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("argus=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            url,
            notify,
            api_key,
            model,
            base_url,
            csv,
            no_save,
        } => {
            cmd_screen(
                &url,
                notify.as_deref(),
                &api_key,
                &model,
                &base_url,
                &csv,
                no_save,
            )
            .await?;
        }
    }

    Ok(())
}

async fn cmd_screen(
    url: &str,
    notify: Option<&str>,
    api_key: &str,
    model: &str,
    base_url: &str,
    csv: &Path,
    no_save: bool,
) -> Result<()> {
    let fetcher = RotatingFetcher::new(RetryingClient::new()?);
    let cleaner = VisibleTextCleaner::new();
    let classifier = GeminiClassifier::with_base_url(api_key, model, base_url)?;

    tracing::info!("Screening {} with model {}", url, model);

    let screening = if no_save {
        let service = ScreenService::<_, _, _, NullLog>::new(fetcher, cleaner, classifier);
        service.screen(url).await?
    } else {
        let log = CsvDecisionLog::new(csv);
        let service = ScreenService::with_log(fetcher, cleaner, classifier, log);
        service.screen(url).await?
    };

    print_screening(url, &screening);

    if let Some(to) = notify {
        let status = send_outcome(to, &screening).await?;
        println!("{status}");
    }

    Ok(())
}

fn print_screening(url: &str, screening: &Screening) {
    println!("URL:      {url}");
    println!("Decision: {}", screening.verdict);
    if screening.rationale.is_empty() {
        println!("Rationale: (none given)");
    } else {
        println!("Rationale: {}", screening.rationale);
    }
}

/// Deliver the outcome email, returning the status line to show the operator.
async fn send_outcome(to: &str, screening: &Screening) -> Result<String> {
    let Some(config) = MailerConfig::from_env()? else {
        return Ok("Error sending email: no SMTP relay configured (set ARGUS_SMTP_HOST)".to_string());
    };

    let mailer = LettreMailer::new(config)?;
    Ok(notify_applicant(&mailer, to, screening).await)
}
