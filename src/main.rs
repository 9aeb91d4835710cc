use bully_cluster::config::{self, ElectionConfig};
use bully_cluster::election::ElectionEngine;
use bully_cluster::error::ElectionError;
use bully_cluster::monitor::{self, Monitor, Observer};
use bully_cluster::node::{HttpTransport, PeerClient, ProcessNode};
use bully_cluster::registry::{Endpoint, HttpRegistry, InMemoryRegistry, Registry};
use bully_cluster::{node, registry};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_REGISTRY_ADDR: &str = "127.0.0.1:1099";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:0";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let directive = config::log_directive();
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Invalid {}={:?} ({}), logging at info", config::ENV_LOG, directive, e);
        EnvFilter::new(config::DEFAULT_LOG_DIRECTIVE)
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().collect();

    let mut name: Option<String> = None;
    let mut bind_addr: SocketAddr = DEFAULT_BIND_ADDR.parse()?;
    let mut registry_addr: SocketAddr = DEFAULT_REGISTRY_ADDR.parse()?;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "--registry" if i + 1 >= args.len() => {
                usage(&args[0]);
            }
            "--bind" => {
                bind_addr = args[i + 1].parse()?;
                i += 2;
            }
            "--registry" => {
                registry_addr = args[i + 1].parse()?;
                i += 2;
            }
            "-h" | "--help" => usage(&args[0]),
            other if name.is_none() && !other.starts_with("--") => {
                name = Some(other.to_string());
                i += 1;
            }
            other => {
                tracing::warn!("Ignoring unexpected argument {}", other);
                i += 1;
            }
        }
    }

    let config = ElectionConfig::from_env();

    match name {
        Some(name) => run_node(&name, bind_addr, registry_addr, config).await,
        None => run_observer(registry_addr, config).await,
    }
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} [NAME] [--bind <addr:port>] [--registry <addr:port>]",
        program
    );
    eprintln!("Example: {}                    (observer, hosts the directory)", program);
    eprintln!("Example: {} P1 --registry 127.0.0.1:1099", program);
    std::process::exit(1);
}

async fn run_node(
    name: &str,
    bind_addr: SocketAddr,
    registry_addr: SocketAddr,
    config: ElectionConfig,
) -> anyhow::Result<()> {
    if monitor::is_reserved_name(name) {
        anyhow::bail!("`{}` is reserved for the observer, choose another name", name);
    }

    // 1. Local state:
    let process = ProcessNode::new(name, config.priority_range);
    tracing::info!(
        "Process [{}] created with priority ({})",
        name,
        process.priority().await
    );

    // 2. RPC server:
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let endpoint = Endpoint::http(listener.local_addr()?);
    let app = node::handlers::router(process.clone());
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("RPC server stopped: {}", e);
        }
    });
    tracing::info!("Process [{}] serving RPC on {}", name, endpoint);

    // 3. Directory registration:
    let directory = Arc::new(HttpRegistry::new(registry_addr, config.rpc_timeout));
    match directory.register(name, endpoint).await {
        Ok(()) => {}
        Err(ElectionError::AlreadyBound(_)) => {
            tracing::error!(
                "Process [{}] is already registered, choose another name",
                name
            );
            return Err(ElectionError::AlreadyBound(name.to_string()).into());
        }
        Err(e) => {
            tracing::error!(
                "Leader election simulator is not running at {}: {}",
                registry_addr,
                e
            );
            return Err(e.into());
        }
    }

    // 4. Election loop:
    let peers = PeerClient::new(
        directory.clone(),
        Arc::new(HttpTransport::new(config.rpc_timeout)),
    );
    let engine = ElectionEngine::new(process, peers, config.max_contest_retries);
    let monitor = Monitor::new(engine, config);

    tracing::info!("Press Ctrl+C to shutdown");

    tokio::select! {
        result = monitor.run() => {
            // The directory is gone; nothing left to deregister from
            if let Err(e) = result {
                tracing::info!("Process [{}] stopped: {}", name, e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Process [{}] shutting down", name);
            if let Err(e) = directory.deregister(name).await {
                tracing::warn!("Process [{}] could not deregister: {}", name, e);
            }
        }
    }

    Ok(())
}

async fn run_observer(registry_addr: SocketAddr, config: ElectionConfig) -> anyhow::Result<()> {
    // 1. Directory server:
    let directory = Arc::new(InMemoryRegistry::new());
    let listener = tokio::net::TcpListener::bind(registry_addr).await?;
    let app = registry::handlers::router(directory.clone());
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Directory server stopped: {}", e);
        }
    });
    tracing::info!("Leader election simulator directory listening on {}", registry_addr);

    // 2. Status poller:
    let peers = PeerClient::new(directory, Arc::new(HttpTransport::new(config.rpc_timeout)));
    let observer = Observer::new(monitor::OBSERVER_NAME, peers, config.observer_interval);

    tracing::info!("Press Ctrl+C to shutdown");

    tokio::select! {
        _ = observer.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Leader election simulator shutting down");
        }
    }

    Ok(())
}
