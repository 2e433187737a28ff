//! Shared plumbing for the `indexer`, `query`, and `evaluator` binaries:
//! corpus file discovery, error types, logging setup, and the BM25 config
//! all three accept as flags.

pub mod error;
pub mod io;
pub mod pipeline;

pub use error::CliError;
pub use pipeline::Config;

/// Install a `tracing-subscriber` `EnvFilter` reading `RUST_LOG`, defaulting
/// to `info` when unset. Shared by all three binaries so their diagnostic
/// stream is configured identically.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Parse `T` from argv, routing a malformed-argv failure through the same
/// exit-1-with-stdout-message contract the other fatal errors use instead of
/// clap's own stderr-and-exit-2 default. `--help`/`--version` still behave
/// however clap normally handles them.
pub fn parse_args<T: clap::Parser>() -> T {
    use clap::error::ErrorKind;

    match T::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                println!("{}", CliError::InvalidArguments(err.to_string()));
                std::process::exit(1);
            }
        },
    }
}
