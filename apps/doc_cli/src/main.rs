use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use doc_client::{DocumentSession, FileUpload, RefreshOutcome, ServiceConfig, UploadOutcome};
use shared::domain::{Document, DocumentId};

#[derive(Parser, Debug)]
#[command(about = "Browse, search, upload, and download repository documents")]
struct Args {
    /// Document service base URL; falls back to doc_client.toml / env / default.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every stored document.
    List,
    /// List documents matching a free-text query.
    Search { query: String },
    /// Upload one or more local files as a single batch.
    Upload { files: Vec<PathBuf> },
    /// Download a document's bytes by id.
    Download {
        id: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut config = doc_client::load_settings();
    if let Some(server_url) = args.server_url {
        config.base_url = server_url;
    }
    let session = DocumentSession::new(&config)?;

    match args.command {
        Command::List => {
            report_refresh(session.query().on_query_change("").await)?;
            print_documents(&session.documents().await);
        }
        Command::Search { query } => {
            report_refresh(session.query().on_query_change(query).await)?;
            print_documents(&session.documents().await);
        }
        Command::Upload { files } => {
            let mut batch = Vec::with_capacity(files.len());
            for path in &files {
                batch.push(FileUpload::from_path(path).await?);
            }
            match session.uploads().upload(batch).await {
                UploadOutcome::Completed { count } => {
                    println!("Uploaded {count} document(s):");
                    print_documents(&session.documents().await);
                }
                UploadOutcome::EmptyBatch => println!("Nothing to upload."),
                UploadOutcome::Failed(err) => return Err(err.into()),
            }
        }
        Command::Download { id, output } => {
            let id = DocumentId::parse(&id);
            let bytes = session.download(&id).await?;
            let target = output.unwrap_or_else(|| PathBuf::from(id.to_string()));
            tokio::fs::write(&target, &bytes)
                .await
                .with_context(|| format!("failed to write '{}'", target.display()))?;
            println!("Wrote {} byte(s) to {}", bytes.len(), target.display());
        }
    }

    Ok(())
}

fn report_refresh(outcome: RefreshOutcome) -> Result<()> {
    match outcome {
        RefreshOutcome::Applied { .. } | RefreshOutcome::Stale => Ok(()),
        RefreshOutcome::Failed(err) => Err(err.into()),
    }
}

fn print_documents(docs: &[Document]) {
    if docs.is_empty() {
        println!("No documents.");
        return;
    }
    for doc in docs {
        let preview = doc.content.as_deref().unwrap_or("");
        println!("{}\t{}\t{}", doc.id, doc.filename, preview);
    }
}
