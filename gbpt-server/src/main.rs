use std::process::ExitCode;

use gbpt_server::AppConfig;
use gbpt_server::logging;
use gbpt_server::server;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            logging::init(Default::default());
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(config.log_format);

    match server::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
