//! Command-line runners behind the `vqa-server` and `vqa-export` binaries.
//!
//! The binaries stay thin; argument surfaces and run logic live here so the
//! two tools share loading and reporting behavior.

use std::error::Error;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};

use crate::config::LoadOptions;
use crate::constants::server::{DEFAULT_HOST, DEFAULT_PORT};
use crate::export::export_static_site;
use crate::loader::load_dataset;
use crate::query::QueryEngine;
use crate::server;

#[derive(Debug, Parser)]
#[command(
    name = "vqa-server",
    disable_help_subcommand = true,
    about = "Serve a VQA dataset over a JSON HTTP API",
    long_about = "Load a VQA dataset source (.json or .csv) into an immutable snapshot and serve listing, lookup, statistics, and image routes from it."
)]
struct ServeCli {
    #[arg(
        long = "data-file",
        value_name = "PATH",
        default_value = "vqa_data.json",
        help = "Dataset source file (.json or .csv)"
    )]
    data_file: PathBuf,
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = "extracted_data",
        help = "Base directory holding per-episode image folders"
    )]
    data_dir: PathBuf,
    #[arg(long, default_value = DEFAULT_HOST, help = "Bind address for the API server")]
    host: IpAddr,
    #[arg(long, default_value_t = DEFAULT_PORT, help = "Bind port for the API server")]
    port: u16,
    #[arg(
        long = "no-shuffle",
        help = "Keep items in source order instead of shuffling at load"
    )]
    no_shuffle: bool,
}

#[derive(Debug, Parser)]
#[command(
    name = "vqa-export",
    disable_help_subcommand = true,
    about = "Export a VQA dataset as static JSON artifacts and images",
    long_about = "Load a VQA dataset source (.json or .csv) and write the data/ artifacts plus referenced images for plain file hosting."
)]
struct ExportCli {
    #[arg(
        long = "data-file",
        value_name = "PATH",
        default_value = "vqa_data.json",
        help = "Dataset source file (.json or .csv)"
    )]
    data_file: PathBuf,
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = "extracted_data",
        help = "Base directory holding per-episode image folders"
    )]
    data_dir: PathBuf,
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        default_value = "docs",
        help = "Directory receiving the static artifacts"
    )]
    output_dir: PathBuf,
    #[arg(
        long = "no-shuffle",
        help = "Keep items in source order instead of shuffling at load"
    )]
    no_shuffle: bool,
}

/// Entry point for the `vqa-server` binary.
pub fn run_server<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) =
        parse_cli::<ServeCli, _>(std::iter::once("vqa-server".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let options = LoadOptions::default().with_shuffle(!cli.no_shuffle);
    let snapshot = load_dataset(&cli.data_file, &cli.data_dir, &options)?;
    println!(
        "Loaded {} VQA items from {}",
        snapshot.store.len(),
        cli.data_file.display()
    );

    let engine = QueryEngine::new(snapshot);
    let addr = SocketAddr::new(cli.host, cli.port);
    println!("Serving dataset API on http://{addr}");
    tokio::runtime::Runtime::new()?.block_on(server::serve(engine, addr))?;
    Ok(())
}

/// Entry point for the `vqa-export` binary.
pub fn run_export<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) =
        parse_cli::<ExportCli, _>(std::iter::once("vqa-export".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let options = LoadOptions::default().with_shuffle(!cli.no_shuffle);
    let snapshot = load_dataset(&cli.data_file, &cli.data_dir, &options)?;
    println!(
        "Loaded {} VQA items from {}",
        snapshot.store.len(),
        cli.data_file.display()
    );

    let engine = QueryEngine::new(snapshot);
    let summary = export_static_site(&engine, &cli.output_dir)?;
    println!(
        "Exported {} items across {} episodes and {} categories to {}",
        summary.items,
        summary.episodes,
        summary.categories,
        cli.output_dir.display()
    );
    println!(
        "Copied {} images ({} missing)",
        summary.images_copied, summary.images_missing
    );
    Ok(())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
