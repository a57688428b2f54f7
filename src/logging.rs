use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Structured logging to stderr so stdout stays clean for JSON and tables.
pub(crate) fn init(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
