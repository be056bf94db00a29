mod progress;

use std::path::{Path, PathBuf};

use clap::Parser;
use clogdecomp::decoding::file::{decompress_stream, open_files};
use clogdecomp::{output_path_for, InputCollector};
use color_eyre::eyre::{Result, WrapErr};
use progress::{fmt_size, ProgressMonitor};
use tracing::info;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Decompress raw-deflate `.clog` files into `.log` files next to them.
///
/// Each argument is either a `.clog` file or a directory, which is searched
/// five levels deep. Without arguments, the `.clog` files in the current
/// directory are decompressed. Every produced `.log` path is printed.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// `.clog` files or directories to search for them
    paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();

    let cli = Cli::parse();
    for input in InputCollector::from_args(cli.paths) {
        let output = output_path_for(&input);
        decompress(&input, &output)
            .wrap_err_with(|| format!("failed to decompress {}", input.display()))?;
        println!("{}", output.display());
    }
    Ok(())
}

fn decompress(input: &Path, output: &Path) -> Result<()> {
    let (source, sink) = open_files(input, output)?;
    let size = source
        .metadata()
        .wrap_err("failed to read input metadata")?
        .len();

    let source = ProgressMonitor::new(source, size, input);
    let written = decompress_stream(source, sink)?;
    info!(
        "{} ({}) -> {} ({})",
        input.display(),
        fmt_size(size as f64),
        output.display(),
        fmt_size(written as f64)
    );
    Ok(())
}
