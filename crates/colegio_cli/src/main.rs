//! `colegio` server binary.
//!
//! # Responsibility
//! - Load configuration, start logging, open the registry database.
//! - Serve the web application until Ctrl-C, then close the store.

mod config;

use colegio_core::db::open_db;
use colegio_core::init_logging;
use colegio_web::Store;
use config::Config;
use log::{error, info, warn};
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::load();
    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=cli status=error error={err}");
            eprintln!("colegio: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let log_dir = config.log_dir()?;
    init_logging(config.log_level(), &log_dir)?;

    let store = Arc::new(Store::new(open_db(&config.db_path)?));
    let router = colegio_web::app(Arc::clone(&store))?;
    let listener = TcpListener::bind(config.bind).await?;
    info!(
        "event=server_start module=cli status=ok bind={} db_path={} core_version={}",
        config.bind,
        config.db_path.display(),
        colegio_core::core_version()
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=cli status=ok");

    // the router and schema are dropped once serve returns
    match Arc::try_unwrap(store) {
        Ok(store) => store.close()?,
        Err(_) => warn!("event=db_close module=cli status=skipped reason=store_still_shared"),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=shutdown_signal module=cli status=error error={err}");
        // without a signal handler the server runs until killed
        std::future::pending::<()>().await;
    }
}
