use tracing::subscriber::SetGlobalDefaultError;
use tracing::Level;

/// Installs the compact `fmt` subscriber as the global default.
pub fn install_logger(level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// `--debug` wins over `--verbose`.
pub fn level_for(verbose: bool, debug: bool) -> Level {
    match (verbose, debug) {
        (_, true) => Level::TRACE,
        (true, false) => Level::DEBUG,
        (false, false) => Level::INFO,
    }
}
