use std::borrow::Cow;
use std::string::String;
use std::sync::Once;

/// Target the tiler logs dirty marks under.
const TILER_TARGET: &str = "ember_engine::tiler";

/// Logger setup for binaries and tests.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter, e.g. `"ember_engine=debug"`. Falls back to
    /// `RUST_LOG`, then to `info`.
    pub env_filter: Option<String>,
    /// Raise the tiler to trace so every dirty mark is printed. One line per
    /// mark adds up quickly at full frame rate.
    pub trace_dirty_marks: bool,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            trace_dirty_marks: false,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Filter string handed to `env_logger`, given the `RUST_LOG` value.
    fn filter(&self, rust_log: Option<String>) -> Cow<'_, str> {
        let base: Cow<'_, str> = match (&self.env_filter, rust_log) {
            (Some(filter), _) => Cow::Borrowed(filter),
            (None, Some(env)) => Cow::Owned(env),
            (None, None) => Cow::Borrowed("info"),
        };
        if self.trace_dirty_marks {
            Cow::Owned(std::format!("{base},{TILER_TARGET}=trace"))
        } else {
            base
        }
    }
}

static INIT: Once = Once::new();

/// Installs an `env_logger` backend once; later calls are ignored, as is a
/// logger some test harness installed first.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.filter(std::env::var("RUST_LOG").ok());
        let installed = env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .try_init();
        if installed.is_ok() {
            log::debug!("logging initialized ({filter})");
        }
    });
}
