//! CLI Adapter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::app::api::{self, CancellationToken, MessageOptions, SubmitOptions};
use crate::domain::attestation::parse_timestamp;
use crate::domain::{AgendaForm, AppConfig, AppError, Network};

#[derive(Parser)]
#[command(name = "agenda-publisher")]
#[command(version)]
#[command(
    about = "Decode, attest, validate and publish DAO agenda metadata",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to ./agenda-publisher.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a "create agenda" transaction and print the proposal draft
    #[clap(visible_alias = "d")]
    Decode {
        /// Network the transaction was mined on (mainnet, sepolia)
        #[arg(short, long)]
        network: Network,
        /// Transaction hash to fetch over RPC
        #[arg(long, required_unless_present = "tx_file")]
        tx: Option<String>,
        /// Read the transaction from a JSON file instead of RPC
        #[arg(long)]
        tx_file: Option<PathBuf>,
    },
    /// Print the message a creator signs for an agenda
    #[clap(visible_alias = "m")]
    Message {
        /// Agenda id
        #[arg(long)]
        id: u64,
        /// Creation transaction hash
        #[arg(long)]
        tx: String,
        /// Timestamp to embed (YYYY-MM-DDTHH:mm:ss.ssZ); defaults to now
        #[arg(long)]
        timestamp: Option<String>,
        /// Build the update wording
        #[arg(long)]
        update: bool,
    },
    /// Validate a metadata file and print the report
    #[clap(visible_alias = "v")]
    Validate {
        /// Metadata JSON file
        file: PathBuf,
        /// Evaluate freshness as of this timestamp instead of now
        #[arg(long)]
        strict_now: Option<String>,
    },
    /// Validate a metadata file and open a pull request for it
    #[clap(visible_alias = "p")]
    Publish {
        /// Metadata JSON file
        file: PathBuf,
    },
    /// Decode, assemble, validate and publish one agenda
    #[clap(visible_alias = "s")]
    Submit {
        #[arg(short, long)]
        network: Network,
        /// Creation transaction hash
        #[arg(long)]
        tx: String,
        /// Read the transaction from a JSON file instead of RPC
        #[arg(long)]
        tx_file: Option<PathBuf>,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Timestamp the creator signed over
        #[arg(long)]
        created_at: String,
        /// Creator wallet signature over the attestation message
        #[arg(long)]
        signature: String,
        /// JSON ABI file for the action targets (repeatable)
        #[arg(long = "abi")]
        abi_files: Vec<PathBuf>,
        /// Print the record instead of publishing it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result: Result<i32, AppError> = load(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Decode { network, tx, tx_file } => {
                run_decode(&config, network, tx.as_deref(), tx_file.as_deref()).map(|_| 0)
            }
            Commands::Message { id, tx, timestamp, update } => {
                let options =
                    MessageOptions { agenda_id: id, tx_hash: tx, timestamp, is_update: update };
                run_message(options).map(|_| 0)
            }
            Commands::Validate { file, strict_now } => run_validate(&file, strict_now.as_deref()),
            Commands::Publish { file } => {
                run_publish(config, &file, cancel_on_interrupt()).map(|_| 0)
            }
            Commands::Submit {
                network,
                tx,
                tx_file,
                title,
                description,
                created_at,
                signature,
                abi_files,
                dry_run,
            } => {
                let options = SubmitOptions {
                    network,
                    tx_hash: tx,
                    form: AgendaForm { title, description },
                    created_at,
                    signature,
                    abi_files,
                };
                let cancel = cancel_on_interrupt();
                run_submit(config, &options, tx_file.as_deref(), dry_run, cancel).map(|_| 0)
            }
        }
    });

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    api::load_config(path)
}

/// Token cancelled by the first Ctrl-C; a second Ctrl-C exits immediately.
fn cancel_on_interrupt() -> CancellationToken {
    let token = CancellationToken::new();
    let handle = token.clone();
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build();
    match runtime {
        Ok(runtime) => {
            std::thread::spawn(move || {
                runtime.block_on(async {
                    if tokio::signal::ctrl_c().await.is_err() {
                        return;
                    }
                    eprintln!("Interrupted: stopping after the current step (Ctrl-C again to abort)");
                    handle.cancel();
                    if tokio::signal::ctrl_c().await.is_ok() {
                        std::process::exit(130);
                    }
                });
            });
        }
        Err(e) => log::warn!("Ctrl-C handling unavailable: {e}"),
    }
    token
}

fn run_decode(
    config: &AppConfig,
    network: Network,
    tx: Option<&str>,
    tx_file: Option<&Path>,
) -> Result<(), AppError> {
    let draft = api::decode_transaction(config, network, tx, tx_file)?;
    println!("{}", serde_json::to_string_pretty(&draft)?);
    Ok(())
}

fn run_message(options: MessageOptions) -> Result<(), AppError> {
    let outcome = api::attestation_message(&options)?;
    println!("✅ Sign the following message (timestamp {}):", outcome.timestamp);
    println!("{}", outcome.message);
    Ok(())
}

fn run_validate(file: &Path, strict_now: Option<&str>) -> Result<i32, AppError> {
    let now = strict_now.map(parse_timestamp).transpose()?;
    let report = api::validate_metadata(file, now)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.is_valid() {
        println!("✅ {} is valid", file.display());
        Ok(0)
    } else {
        for error in &report.errors {
            eprintln!("  • {}", error);
        }
        Ok(1)
    }
}

fn run_publish(config: AppConfig, file: &Path, cancel: CancellationToken) -> Result<(), AppError> {
    let pull_request = api::publish_metadata(config, file, cancel)?;
    println!("✅ Opened pull request #{}: {}", pull_request.number, pull_request.url);
    Ok(())
}

fn run_submit(
    config: AppConfig,
    options: &SubmitOptions,
    tx_file: Option<&Path>,
    dry_run: bool,
    cancel: CancellationToken,
) -> Result<(), AppError> {
    let outcome = api::submit_agenda(config, options, tx_file, dry_run, cancel)?;
    match outcome.pull_request {
        Some(pull_request) => {
            println!("✅ Opened pull request #{}: {}", pull_request.number, pull_request.url);
        }
        None => {
            print!("{}", outcome.agenda.metadata().to_document()?);
            println!("✅ Dry run: would publish {}", outcome.file_path);
        }
    }
    Ok(())
}
