//! Tracing setup for resolution runs.
//!
//! Nothing is installed unless `SCRIPTSEM_LOG` (or `RUST_LOG`) holds a filter.
//! `SCRIPTSEM_LOG_FORMAT` picks the output:
//!
//! - `text` (default): one line per event
//! - `tree`: events nested under the `resolve` span of each run
//! - `json`: one flattened JSON object per event
//!
//! ```bash
//! # Member name allocation, nested per run
//! SCRIPTSEM_LOG=scriptsem_resolver=trace SCRIPTSEM_LOG_FORMAT=tree cargo test
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "SCRIPTSEM_LOG";
const FALLBACK_LOG_VAR: &str = "RUST_LOG";
const LOG_FORMAT_VAR: &str = "SCRIPTSEM_LOG_FORMAT";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Case-insensitive; unknown names select `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => LogFormat::Tree,
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// What `init_tracing` installs, read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracingSettings {
    /// `EnvFilter` directives; `None` disables tracing.
    pub filter: Option<String>,
    pub format: LogFormat,
}

impl TracingSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Settings from an arbitrary variable lookup. `SCRIPTSEM_LOG` wins over
    /// `RUST_LOG`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        TracingSettings {
            filter: non_blank(LOG_VAR).or_else(|| non_blank(FALLBACK_LOG_VAR)),
            format: lookup(LOG_FORMAT_VAR).map_or_else(LogFormat::default, |v| LogFormat::parse(&v)),
        }
    }

    /// Install a global stderr subscriber for these settings.
    ///
    /// Returns `false` when tracing is disabled or another global subscriber
    /// is already installed.
    pub fn install(&self) -> bool {
        let Some(directives) = &self.filter else {
            return false;
        };
        let filter = EnvFilter::builder().parse_lossy(directives);
        let registry = Registry::default().with(filter);
        match self.format {
            LogFormat::Tree => {
                let layer = tracing_tree::HierarchicalLayer::new(2)
                    .with_indent_lines(true)
                    .with_targets(true)
                    .with_bracketed_fields(true);
                registry.with(layer).try_init().is_ok()
            }
            LogFormat::Json => {
                let layer = fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr);
                registry.with(layer).try_init().is_ok()
            }
            LogFormat::Text => {
                let layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
                registry.with(layer).try_init().is_ok()
            }
        }
    }
}

/// Install the subscriber described by the environment, if any.
pub fn init_tracing() -> bool {
    TracingSettings::from_env().install()
}
