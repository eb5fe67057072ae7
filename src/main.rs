use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hyper::server::conn::http1;
use hyper_staticmount::{Main, PathPolicy, Settings};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Serve a static directory under a URL prefix, with a fixed home page and 404 fallback.
#[derive(Debug, Parser)]
#[command(name = "staticmount", version)]
struct Args {
    /// TOML settings file with `[server]` and `[static]` tables.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Address to listen on (default 127.0.0.1:8000).
    #[arg(short, long)]
    listen: Option<SocketAddr>,
    /// Directory a relative static directory is resolved against (default: current directory).
    #[arg(long)]
    base_dir: Option<PathBuf>,
    /// URL prefix for static files, beginning and ending with a slash (default /static/).
    #[arg(long)]
    url: Option<String>,
    /// Static directory (default `static`).
    #[arg(long)]
    directory: Option<PathBuf>,
    /// Charset for text files (default utf-8).
    #[arg(long)]
    encoding: Option<String>,
    /// Join request paths onto the static directory without normalizing `..`.
    #[arg(long)]
    raw_paths: bool,
}

impl Args {
    /// Flags override the settings file, which overrides the defaults.
    fn into_settings(self) -> anyhow::Result<Settings> {
        let mut settings = match self.config {
            Some(ref path) => Settings::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(listen) = self.listen {
            settings.server.listen = listen;
        }
        let options = &mut settings.static_files;
        if let Some(base_dir) = self.base_dir {
            options.base_dir(base_dir);
        }
        if let Some(url) = self.url {
            options.url(url);
        }
        if let Some(directory) = self.directory {
            options.directory(directory);
        }
        if let Some(encoding) = self.encoding {
            options.encoding(encoding);
        }
        if self.raw_paths {
            options.path_policy(PathPolicy::Raw);
        }
        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let settings = Args::parse().into_settings()?;
    let main = Main::new(&settings.static_files).context("invalid static file settings")?;
    if let Some(config) = main.resolver().config() {
        info!(
            "Serving {} at {}",
            config.root_directory.display(),
            config.url_prefix
        );
    }

    let listener = TcpListener::bind(settings.server.listen)
        .await
        .with_context(|| format!("failed to bind {}", settings.server.listen))?;
    info!("Listening on http://{}", listener.local_addr()?);

    tokio::select! {
        res = run(listener, main) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn run(listener: TcpListener, main: Main) -> anyhow::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let main = main.clone();
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            if let Err(err) = http1::Builder::new().serve_connection(io, main).await {
                error!("Connection error from {}: {}", peer, err);
            }
        });
    }
}
