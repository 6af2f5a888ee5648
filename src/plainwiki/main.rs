use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use plainwiki::app::AppContext;
use plainwiki::config::WikiConfig;
use plainwiki::render::Templates;
use plainwiki::store::fs::FileStore;
use plainwiki::store::PageStore;
use plainwiki::web;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands, ServeArgs};

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config =
        WikiConfig::discover(cli.config.as_deref(), &cwd).context("failed to load config")?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command {
        Some(Commands::Serve(serve_args)) => handle_serve(config, serve_args).await,
        Some(Commands::Pages) => handle_pages(&config),
        None => handle_serve(config, ServeArgs::default()).await,
    }
}

fn open_store(config: &WikiConfig) -> FileStore {
    FileStore::new(&config.data_dir).with_file_ext(&config.file_ext)
}

async fn handle_serve(mut config: WikiConfig, serve_args: ServeArgs) -> Result<()> {
    if let Some(static_dir) = serve_args.static_dir {
        config.static_dir = static_dir;
    }
    if let Some(templates) = serve_args.templates {
        config.templates_dir = Some(templates);
    }
    if let Some(bind) = serve_args.bind {
        config.bind = bind;
    }
    if let Some(port) = serve_args.port {
        config.port = port;
    }

    let templates = match &config.templates_dir {
        Some(dir) => Templates::from_dir(dir)
            .with_context(|| format!("failed to load templates from {}", dir.display()))?,
        None => Templates::builtin().context("failed to compile built-in templates")?,
    };

    let store: Arc<dyn PageStore> = Arc::new(open_store(&config));
    let (ctx, _indexer) = AppContext::start(store, templates);
    let app = web::router(ctx, &config.static_dir);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(data_dir = %config.data_dir.display(), "Serving wiki on http://{}", addr);
    println!(
        "{} {}",
        "Serving wiki on".green(),
        format!("http://{}", addr).bold()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shut down");
    Ok(())
}

fn handle_pages(config: &WikiConfig) -> Result<()> {
    let index = open_store(config)
        .build_index()
        .with_context(|| format!("failed to list {}", config.data_dir.display()))?;

    if index.is_empty() {
        println!("{}", "No pages yet.".dimmed());
        return Ok(());
    }

    for entry in index.entries() {
        println!("{}", entry.name.bold());
    }
    println!(
        "{}",
        format!("{} page{}", index.len(), if index.len() == 1 { "" } else { "s" }).dimmed()
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
