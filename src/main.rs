use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use keireki::{
    config::Config,
    core::errors::{AppError, AppResult},
    db::{repositories::records, Database},
    export,
    extract::{
        pipeline,
        retry::{RetryPolicy, SleepBackoff},
    },
    providers::openai::OpenAiClient,
};

#[derive(Parser)]
#[command(
    name = "keireki",
    about = "Extract structured records from Japanese résumés and render 職務経歴書 workbooks"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process résumé files (.pdf, .doc, .docx, .xlsx) and store the
    /// extracted records.
    Process { files: Vec<PathBuf> },
    /// List stored records, newest first.
    List,
    /// Print one stored record as JSON.
    Show { id: String },
    /// Render a stored record as a 職務経歴書 workbook.
    Export {
        id: String,
        /// Output .xlsx path.
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn sqlx_debug_enabled() -> bool {
    matches!(
        std::env::var("KEIREKI_SQLX_DEBUG")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn init_tracing() {
    let default_directives = if sqlx_debug_enabled() {
        "info"
    } else {
        "info,sqlx::query=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        tracing::error!(code = err.code(), "{err}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    let db = Database::new(&config.data_dir).await?;

    match cli.command {
        Command::Process { files } => process_files(&db, &config, &files).await,
        Command::List => list_records(&db).await,
        Command::Show { id } => show_record(&db, &id).await,
        Command::Export { id, output } => export_record(&db, &id, &output).await,
    }
}

async fn process_files(db: &Database, config: &Config, files: &[PathBuf]) -> AppResult<()> {
    if files.is_empty() {
        return Err(AppError::InvalidInput("no input files given".to_string()));
    }

    let extractor = OpenAiClient::new(config.openai_api_key.clone(), config.model.clone())?;
    let backoff = SleepBackoff;
    let policy = RetryPolicy::default();
    let doc_cache_dir = config.doc_cache_dir();

    let mut processed = 0usize;
    for path in files {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let outcome = pipeline::process_document(
            db,
            &extractor,
            &backoff,
            &policy,
            &doc_cache_dir,
            path,
            &file_name,
        )
        .await;
        match outcome {
            Ok(outcome) => {
                processed += 1;
                println!(
                    "{}  {}  {:.2}s",
                    outcome.record_id, outcome.file_name, outcome.time_stats.total_time
                );
            }
            Err(err) => {
                // Invalid model output is kept visible for inspection.
                if let AppError::SchemaInvalid { raw, .. } = &err {
                    eprintln!("--- raw model output for {file_name} ---");
                    eprintln!("{raw}");
                }
                tracing::error!(file = %file_name, code = err.code(), "{err}");
            }
        }
    }

    if processed == 0 {
        tracing::error!("no documents processed successfully");
        std::process::exit(1);
    }
    Ok(())
}

async fn list_records(db: &Database) -> AppResult<()> {
    let stored = records::list_records(db.pool()).await?;
    if stored.is_empty() {
        println!("no records");
        return Ok(());
    }
    for record in stored {
        println!(
            "{}  {}  {}  {}",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.unique_id,
            record.file_name
        );
    }
    Ok(())
}

async fn show_record(db: &Database, id: &str) -> AppResult<()> {
    let record = records::get_record(db.pool(), id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn export_record(db: &Database, id: &str, output: &Path) -> AppResult<()> {
    let record = records::get_record(db.pool(), id).await?;
    export::export_to_file(&record.llm_output, output)?;
    println!("{}", output.display());
    Ok(())
}
