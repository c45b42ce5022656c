//! Log output for the `codeval` and `codevald` binaries.
//!
//! Lines go to stderr, leaving stdout to the CLI's report. The format is
//! human-readable unless `--json` or `CODEVAL_LOG_FORMAT=json` selects one
//! JSON object per line; `RUST_LOG` narrows or widens the default level.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable selecting the log line format (`json` or `text`).
pub const LOG_FORMAT_VAR: &str = "CODEVAL_LOG_FORMAT";

/// `true` when `CODEVAL_LOG_FORMAT` asks for JSON log lines.
pub fn json_requested_by_env() -> bool {
    std::env::var(LOG_FORMAT_VAR)
        .map(|value| value.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Install the global subscriber writing to stderr, at `level` unless
/// `RUST_LOG` is set. Only the first call in a process has any effect.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init()
            .ok();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}
