mod cli;
mod core;
mod logging;
mod platform;

use crate::core::error::AzaError;
use crate::core::terminal;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run_main().await {
        let classified = e.downcast_ref::<AzaError>();
        terminal::print_error(&format!("{:#}", e));
        if classified.is_some_and(AzaError::is_usage) {
            eprintln!("Use --help for usage.");
        }
        if let Some(401 | 403) = classified.and_then(AzaError::status) {
            eprintln!("Check the project endpoint and that your Azure login can access it.");
        }
        if std::env::var("AZA_DEBUG").as_deref() == Ok("1") {
            eprintln!("{:?}", e);
        }
        std::process::exit(classified.map(AzaError::exit_code).unwrap_or(1));
    }
}
