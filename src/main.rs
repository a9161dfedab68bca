use dockflow::cli::{handle_run, CliArgs};
use dockflow::{init_logging, LoggingConfig, NAME, VERSION};

use clap::Parser;
use tracing::{debug, warn};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let logging = LoggingConfig::from_env().with_log_file(&args.log_file);
    if let Err(e) = init_logging(logging) {
        warn!(error = %format!("{:#}", e), "Logging to stderr only");
    }

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = handle_run(&args).await;
    std::process::exit(exit_code);
}
