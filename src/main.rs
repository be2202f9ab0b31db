use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io;
use std::path::PathBuf;

use yamlex::lexer::{format_tokens, TokenKind};
use yamlex::{ScanSession, ScannerConfig};

#[derive(Parser)]
#[command(name = "yamlex")]
#[command(author, version, about = "Indentation-aware YAML token scanner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// One token per line (default)
    #[value(name = "text")]
    Text,
    /// A JSON array of tokens
    #[value(name = "json")]
    Json,
}

/// Scanner options shared by every subcommand
#[derive(Args)]
struct ScanArgs {
    /// The source file to scan, or `-` for stdin
    input: PathBuf,

    /// Load scanner settings from a JSON file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra indentation required on continuation lines
    #[arg(long)]
    indent_width: Option<usize>,

    /// Drop comment tokens from the stream
    #[arg(long)]
    no_comments: bool,

    /// Fail on under-indented continuation lines instead of ignoring them
    #[arg(long)]
    strict: bool,

    /// Let column-0 keys open their own mapping block
    #[arg(long)]
    explicit_root: bool,
}

impl ScanArgs {
    fn scanner_config(&self) -> Result<ScannerConfig> {
        let mut config = match &self.config {
            Some(path) => ScannerConfig::from_json_file(path)
                .with_context(|| format!("Failed to load scanner config: {:?}", path))?,
            None => ScannerConfig::default(),
        };

        if let Some(width) = self.indent_width {
            config = config.with_indent_width(width);
        }
        if self.no_comments {
            config = config.with_emit_comments(false);
        }
        if self.strict {
            config = config.with_strict_continuation(true);
        }
        if self.explicit_root {
            config = config.with_implicit_root_map(false);
        }

        log::debug!("Scanner config: {:?}", config);
        Ok(config)
    }

    fn session(&self) -> Result<ScanSession> {
        if self.input.as_os_str() == "-" {
            return ScanSession::from_reader("<stdin>", io::stdin().lock())
                .context("Failed to read stdin");
        }

        ScanSession::new(&self.input).with_context(|| format!("Failed to open {:?}", self.input))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        #[command(flatten)]
        scan: ScanArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Scan a source file and report errors without printing tokens
    Check {
        #[command(flatten)]
        scan: ScanArgs,
    },
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = match cli.command {
        Commands::Tokens { scan, format } => tokens(&scan, format),
        Commands::Check { scan } => check(&scan),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn tokens(scan: &ScanArgs, format: OutputFormat) -> Result<()> {
    let config = scan.scanner_config()?;
    let session = scan.session()?;

    let tokens = match session.tokenize(&config) {
        Ok(tokens) => tokens,
        Err(e) => {
            session.report_error(&e)?;
            anyhow::bail!("Scanning failed");
        }
    };

    match format {
        OutputFormat::Text => println!("{}", format_tokens(&tokens)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tokens)?),
    }

    Ok(())
}

fn check(scan: &ScanArgs) -> Result<()> {
    log::info!("Checking {:?}", scan.input);

    let config = scan.scanner_config()?;
    let session = scan.session()?;

    let tokens = match session.tokenize(&config) {
        Ok(tokens) => tokens,
        Err(e) => {
            session.report_error(&e)?;
            anyhow::bail!("Scanning failed");
        }
    };

    let blocks = tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::MapStart | TokenKind::ListStart))
        .count();

    println!(
        "{}: {} tokens, {} blocks",
        "success".green().bold(),
        tokens.len(),
        blocks
    );
    Ok(())
}
