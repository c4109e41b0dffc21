//! Logger initialization.

use env_logger::{Builder, Env};
use log::{LevelFilter, SetLoggerError};

/// Initializes `env_logger` on stderr.
///
/// `RUST_LOG` is honoured (defaulting to `warn`), and `level`, when given,
/// overrides it, so `RUST_LOG=hops_core=debug` works for quick debugging
/// while `--log-level` stays authoritative. Stdout is left to the response
/// transcript.
pub fn init_logger(level: Option<LevelFilter>) -> Result<(), SetLoggerError> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp_millis().try_init()
}
