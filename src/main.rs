use std::path::PathBuf;

use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

use tachyons_lsp::Backend;
use tachyons_lsp::bundled::BundledStylesheet;

/// Go to definition for Tachyons classes, over the Language Server Protocol.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Communicate over stdin/stdout (the default and only transport).
    #[arg(long)]
    stdio: bool,

    /// Stylesheet to fall back to when the workspace has no
    /// node_modules/tachyons. Defaults to the copy built into the binary.
    #[arg(long, value_name = "PATH")]
    bundled_stylesheet: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // stdout carries JSON-RPC, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let bundled = match cli.bundled_stylesheet {
        Some(path) => BundledStylesheet::File(path),
        None => BundledStylesheet::Embedded,
    };

    tracing::info!(
        "Starting tachyons-lsp {} (stdio{})",
        env!("CARGO_PKG_VERSION"),
        if cli.stdio { ", requested" } else { "" }
    );

    let (service, socket) = LspService::new(|client| Backend::new(client, bundled));
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;
}
