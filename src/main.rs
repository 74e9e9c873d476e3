use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use neoforge_meta::core::fetch::{fetch_installer, fetch_versions};
use neoforge_meta::core::http::build_http_client;
use neoforge_meta::core::version::OsType;
use neoforge_meta::{extract, MetaResult};

/// Extract launch metadata from NeoForge installers
#[derive(Parser, Debug)]
#[command(name = "neoforge-meta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract metadata from a local installer jar
    Extract {
        /// Path to the installer jar
        path: PathBuf,
    },
    /// Download an installer from the NeoForge maven and extract it
    Fetch {
        /// NeoForge version, e.g. 21.1.65
        version: String,

        /// Write the metadata here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the concrete server command line for one platform
    ServerCommand {
        /// Path to the installer jar
        path: PathBuf,

        /// Target platform
        #[arg(long, value_parser = parse_os, default_value = "linux")]
        os: OsType,

        /// Library directory substituted into paths
        #[arg(long, default_value = "libraries")]
        library_directory: String,
    },
    /// List the versions published on the NeoForge maven
    Versions,
}

fn parse_os(value: &str) -> Result<OsType, String> {
    OsType::ALL
        .into_iter()
        .find(|os| os.name() == value)
        .ok_or_else(|| format!("unknown platform {value} (expected windows, linux or osx)"))
}

#[tokio::main]
async fn main() -> ExitCode {
    neoforge_meta::init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{} ({:?})", e, e.kind());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> MetaResult<()> {
    match cli.command {
        Command::Extract { path } => {
            let bytes = tokio::fs::read(&path).await?;
            let metadata = extract(&bytes)?;
            println!("{}", to_json(&metadata, cli.pretty)?);
        }
        Command::Fetch { version, output } => {
            let client = build_http_client()?;
            let bytes = fetch_installer(&client, &version).await?;
            let metadata = extract(&bytes)?;
            let json = to_json(&metadata, cli.pretty)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, json).await?;
                    info!("Wrote {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::ServerCommand {
            path,
            os,
            library_directory,
        } => {
            let bytes = tokio::fs::read(&path).await?;
            let resolved = extract(&bytes)?
                .server_startup
                .resolve(os, &library_directory);
            let line: Vec<String> = resolved
                .jvm_args
                .into_iter()
                .chain(std::iter::once(resolved.main_class))
                .chain(resolved.program_args)
                .collect();
            println!("{}", line.join(" "));
        }
        Command::Versions => {
            let client = build_http_client()?;
            for version in fetch_versions(&client).await? {
                println!("{version}");
            }
        }
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> MetaResult<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
