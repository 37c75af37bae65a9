//! Docsign CLI: command-line client for the upload and signing API.
//!
//! Set DOCSIGN_API_URL (or API_URL); defaults to http://localhost:5000.

use anyhow::Context;
use clap::{Parser, Subcommand};
use docsign_api_client::ApiClient;
use docsign_cli::{default_output_path, init_tracing};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "docsign", about = "Docsign API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a PDF and email a signing link to the recipient
    Upload {
        /// Path to the PDF to upload
        file: std::path::PathBuf,
        /// Recipient email address
        #[arg(long)]
        email: String,
    },
    /// Sign a submission
    Sign {
        /// Submission ID from the signing link
        id: String,
        /// Signer's full name
        #[arg(long)]
        name: String,
    },
    /// Email the signing link for a submission again
    Resend {
        /// Submission ID
        id: String,
    },
    /// Download a document by its download URL
    Download {
        /// URL returned by `sign`
        url: String,
        /// Where to write the file (defaults to the name in the URL)
        #[arg(long)]
        output: Option<std::path::PathBuf>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let client = ApiClient::from_env().context("Failed to create API client")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload { file, email } => {
            let response = client.upload(&file, &email).await?;
            print_json(&response)?;
        }
        Commands::Sign { id, name } => {
            let response = client.sign(&id, &name).await?;
            print_json(&response)?;
        }
        Commands::Resend { id } => {
            let response = client.resend(&id).await?;
            print_json(&response)?;
        }
        Commands::Download { url, output } => {
            let data = client.download(&url).await?;
            let output = output.unwrap_or_else(|| default_output_path(&url));
            tokio::fs::write(&output, &data)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            print_json(&serde_json::json!({
                "path": output.display().to_string(),
                "size_bytes": data.len(),
            }))?;
        }
    }

    Ok(())
}
