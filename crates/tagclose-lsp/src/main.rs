//! tagclose-lsp
//!
//! Language server binary speaking LSP over stdio

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use tagclose_lsp::TagCloseLanguageServer;
use tower_lsp::{LspService, Server};

#[derive(Parser)]
#[command(name = "tagclose-lsp")]
#[command(about = "Language server that completes closing tags as `</` is typed")]
#[command(version = tagclose_lsp::VERSION)]
struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        env = "TAGCLOSE_CONFIG",
        help = "Path to configuration file (.tagcloserc.toml/.tagcloserc.json)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => tagclose_core::DEFAULT_LOG_FILTER,
        1 => "tagclose=debug",
        _ => "tagclose=trace",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tagclose_core::init_tracing_with(log_filter(cli.verbose));

    if let Some(path) = &cli.config
        && !path.is_file()
    {
        bail!("Config file not found: {}", path.display());
    }

    tracing::info!(version = tagclose_lsp::VERSION, "Starting tagclose-lsp on stdio");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let (service, socket) =
        LspService::new(|client| TagCloseLanguageServer::with_config_path(client, cli.config));
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
