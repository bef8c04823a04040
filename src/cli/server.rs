use clap::Parser;
use error_stack::{Result, ResultExt};
use jotter::{config::Server as Config, App};
use std::net::IpAddr;
use std::num::NonZeroUsize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to start the server")]
pub struct StartServerError;

/// Expose the jotter HTTP API
#[derive(Debug, Default, Parser)]
pub struct ServerCommand {
    #[clap(long)]
    pub address: Option<IpAddr>,
    #[clap(long)]
    pub port: Option<u16>,
    #[clap(long)]
    pub workers: Option<NonZeroUsize>,
}

pub fn run(args: &ServerCommand) -> Result<(), StartServerError> {
    let mut config = Config::load().change_context(StartServerError)?;
    args.override_config(&mut config);

    jotter::telemetry::init();
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(config.workers)
        .build()
        .change_context(StartServerError)
        .attach_printable("could not build tokio runtime")?
        .block_on(async move {
            let app = App::new(config).await.change_context(StartServerError)?;
            let result = jotter::http::serve(app.clone())
                .await
                .change_context(StartServerError);

            app.close().await;
            result
        })
}

impl ServerCommand {
    fn override_config(&self, config: &mut Config) {
        // override server configurations if set by the cli
        if let Some(address) = self.address {
            config.ip = address;
        }

        if let Some(port) = self.port {
            config.port = port;
        }

        if let Some(workers) = self.workers {
            config.workers = workers.get();
        }
    }
}
