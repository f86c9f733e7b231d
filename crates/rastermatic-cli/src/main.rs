//! rastermatic - Export images as SimplePlanes label sub-assemblies
//!
//! Reads an image, encodes it as rich-text label markup and writes
//! `<image name>.xml` to the desktop (or `--output-dir`).

mod prompt;
mod sink;
mod source;

use clap::Parser;
use rastermatic::{export, EncodeOptions, ExportEvent, RastermaticError, DEFAULT_PIXEL_SIZE};
use sink::DirectorySink;
use source::FileImageSource;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rastermatic")]
#[command(version)]
#[command(about = "Export images as SimplePlanes label sub-assemblies", long_about = None)]
struct Cli {
    /// Input image file (PNG, JPEG, GIF, WebP, BMP). Prompted for if omitted
    input: Option<PathBuf>,

    /// Size of one pixel in em
    #[arg(short, long, default_value_t = DEFAULT_PIXEL_SIZE, value_parser = parse_pixel_size)]
    pixel_size: f64,

    /// Output directory (default: desktop)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Exit without waiting for ENTER
    #[arg(long)]
    no_wait: bool,

    /// Print debug diagnostics
    #[arg(short, long)]
    verbose: bool,
}

fn parse_pixel_size(s: &str) -> Result<f64, String> {
    let size: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(format!("pixel size must be a positive number, got {s}"))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    println!("SP Rastermatic {}", env!("CARGO_PKG_VERSION"));
    println!("Released under GNU General Public License V3.0");
    println!();

    let code = match run(&cli) {
        Ok(path) => {
            if cli.output_dir.is_some() {
                println!("\nSuccessfully exported data: {}", path.display());
            } else {
                println!("\nSuccessfully exported data onto desktop: {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    };

    if !cli.no_wait {
        if let Err(e) = prompt::wait_for_enter(&mut io::stdin().lock(), &mut io::stdout()) {
            log::warn!("failed to wait for ENTER: {e}");
        }
    }

    code
}

fn run(cli: &Cli) -> rastermatic::Result<PathBuf> {
    let input = match &cli.input {
        Some(path) => PathBuf::from(prompt::clean_path(&path.to_string_lossy())),
        None => prompt::read_image_path(&mut io::stdin().lock(), &mut io::stdout())
            .map(PathBuf::from)
            .map_err(|e| RastermaticError::Input {
                path: "<stdin>".to_string(),
                source: e.into(),
            })?,
    };

    let mut sink = match &cli.output_dir {
        Some(dir) => DirectorySink::new(dir),
        None => DirectorySink::desktop()?,
    };

    println!();
    println!("Opening image...");
    log::debug!("reading '{}'", input.display());

    let mut source = FileImageSource::new(input);
    let opts = EncodeOptions {
        pixel_size: cli.pixel_size,
    };

    let summary = export(&mut source, &mut sink, &opts, |event| match event {
        ExportEvent::Loaded { width, height } => {
            println!("Image resolution: {width}x{height}");
            println!();
        }
        ExportEvent::Row { row, total } => {
            println!("Writing data for line {} of {}", row + 1, total);
        }
    })?;

    log::debug!(
        "exported '{}' ({}x{}, {} bytes)",
        source.path().display(),
        summary.width,
        summary.height,
        summary.bytes
    );
    Ok(summary.path)
}

fn report_failure(err: &RastermaticError) {
    println!("\nExport failed - {}", err.stage());
    println!("{err}");
    let mut cause = err.source();
    while let Some(e) = cause {
        println!("  caused by: {e}");
        cause = e.source();
    }
}
