use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pdf_context::{Backend, ContextConfig, run};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliBackend {
    Lopdf,
    PdfExtract,
}

impl From<CliBackend> for Backend {
    fn from(b: CliBackend) -> Self {
        match b {
            CliBackend::Lopdf => Backend::Lopdf,
            CliBackend::PdfExtract => Backend::PdfExtract,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract the first pages of a PDF into a JavaScript context file", long_about = None)]
struct Args {
    /// PDF to read (default: website/assets/document.pdf)
    input: Option<PathBuf>,

    /// Script file to generate (default: website/assets/context.js)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of leading pages to extract
    #[arg(long)]
    max_pages: Option<usize>,

    /// Name of the window property to assign
    #[arg(long = "global")]
    global_name: Option<String>,

    /// Extraction backend
    #[arg(long, value_enum)]
    backend: Option<CliBackend>,

    /// Read settings from this TOML file instead of ./pdf-context.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let quiet = args.quiet;

    match try_main(args) {
        Ok(()) => {
            if !quiet {
                println!("Context generated successfully.");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main(args: Args) -> Result<()> {
    // 1. Load from file or default
    let mut config = match &args.config {
        Some(path) => ContextConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ContextConfig::discover()?.unwrap_or_default(),
    };

    // 2. Override with CLI args
    if let Some(input) = args.input {
        config.input = input;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(n) = args.max_pages {
        config.max_pages = n;
    }
    if let Some(name) = args.global_name {
        config.global_name = name;
    }
    if let Some(b) = args.backend {
        config.backend = b.into();
    }
    if args.verbose {
        config.verbose = true;
    }

    init_tracing(config.verbose);

    if !args.quiet {
        println!("Reading {}...", config.input.display());
    }

    run(&config).with_context(|| format!("Failed to generate {}", config.output.display()))?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "pdf_context=debug"
    } else {
        "pdf_context=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
