use anyhow::Context;
use casebook_server::{build_router, casebook_from_config, AppState, ServerConfig};
use clap::{value_parser, Arg, ArgMatches, Command};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    let config_arg = Arg::new("config")
        .long("config")
        .short('c')
        .value_parser(value_parser!(PathBuf))
        .help("Path to a TOML config file");

    Command::new("casebook")
        .version(casebook_core::VERSION)
        .about("Case study and focus group submission service")
        .subcommand_required(true)
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP server")
                .arg(config_arg.clone())
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .value_parser(value_parser!(SocketAddr))
                        .help("Listen address, overrides bind_addr"),
                )
                .arg(
                    Arg::new("data-dir")
                        .long("data-dir")
                        .value_parser(value_parser!(PathBuf))
                        .help("Collection file directory, overrides data_dir"),
                ),
        )
        .subcommand(
            Command::new("check-config")
                .about("Validate a config file and print the resolved settings")
                .arg(config_arg),
        )
}

fn resolve_config(args: &ArgMatches) -> anyhow::Result<ServerConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Ok(Some(addr)) = args.try_get_one::<SocketAddr>("bind") {
        config = config.with_bind_addr(*addr);
    }
    if let Ok(Some(dir)) = args.try_get_one::<PathBuf>("data-dir") {
        config = config.with_data_dir(dir.clone());
    }
    Ok(config)
}

fn init_tracing(config: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    init_tracing(&config);
    let state = AppState::new(casebook_from_config(&config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", config.bind_addr))?;
    info!(
        addr = %config.bind_addr,
        data_dir = %config.data_dir.display(),
        "casebook listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("serve", args)) => serve(resolve_config(args)?).await,
        Some(("check-config", args)) => {
            let config = resolve_config(args)?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
        _ => anyhow::bail!("unknown subcommand"),
    }
}
