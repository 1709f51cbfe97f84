use std::io::{Read, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_catalogue::format::{FormatError, FormatKind};
use transit_catalogue::requests::{BuildError, RequestDocument, RequestHandler};
use transit_catalogue::snapshot::{Snapshot, SnapshotError};
use transit_catalogue::web::{AppState, create_router};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(name = "make_base", about = "build a catalogue from stdin and save it as a snapshot")]
    MakeBase {
        #[arg(long, value_enum, default_value_t = FormatKind::Json)]
        format: FormatKind,
        /// snapshot file; overrides `serialization_settings.file`
        #[arg(long)]
        base: Option<PathBuf>,
    },
    #[command(
        name = "process_requests",
        about = "answer stat requests from stdin against a saved snapshot"
    )]
    ProcessRequests {
        #[arg(long, value_enum, default_value_t = FormatKind::Json)]
        format: FormatKind,
        /// snapshot file; overrides `serialization_settings.file`
        #[arg(long)]
        base: Option<PathBuf>,
    },
    #[command(about = "build a catalogue and answer stat requests from stdin in one pass")]
    Run {
        #[arg(long, value_enum, default_value_t = FormatKind::Json)]
        format: FormatKind,
    },
    #[command(about = "answer stat requests over HTTP against a saved snapshot")]
    Serve {
        /// snapshot file written by `make_base`
        #[arg(long)]
        base: PathBuf,
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("no snapshot file: pass --base or set serialization_settings.file")]
    MissingBase,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    match run(args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::MakeBase { format, base } => {
            let document = read_document(format)?;
            let path = snapshot_path(base, &document)?;

            let mut handler = RequestHandler::build(&document)?;
            handler.precompute_routes();
            Snapshot::capture(&handler).save(&path)?;
            Ok(())
        }
        Command::ProcessRequests { format, base } => {
            let document = read_document(format)?;
            let path = snapshot_path(base, &document)?;

            let mut handler = Snapshot::load(&path)?.restore()?;
            let responses = handler.answer_all(&document.stat_requests);
            write_output(&format.adapter().render(&document.stat_requests, &responses)?)
        }
        Command::Run { format } => {
            let document = read_document(format)?;

            let mut handler = RequestHandler::build(&document)?;
            let responses = handler.answer_all(&document.stat_requests);
            write_output(&format.adapter().render(&document.stat_requests, &responses)?)
        }
        Command::Serve { base, addr } => serve(&base, addr).await,
    }
}

fn read_document(format: FormatKind) -> Result<RequestDocument, CliError> {
    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;
    Ok(format.adapter().parse(&input)?)
}

fn snapshot_path(base: Option<PathBuf>, document: &RequestDocument) -> Result<PathBuf, CliError> {
    base.or_else(|| document.serialization_settings.as_ref().map(|s| s.file.clone()))
        .ok_or(CliError::MissingBase)
}

fn write_output(bytes: &[u8]) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()?;
    Ok(())
}

async fn serve(base: &Path, addr: SocketAddr) -> Result<(), CliError> {
    let handler = Snapshot::load(base)?.restore()?;
    let app = create_router(AppState::new(handler));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    info!("GET  /health   - Health check");
    info!("POST /requests - Answer stat requests");

    axum::serve(listener, app).await?;
    Ok(())
}
