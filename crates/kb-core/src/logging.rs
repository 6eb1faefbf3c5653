//! Structured logging schema and subscriber setup for the knowledgebase.
//!
//! The constants below name the structured fields every event uses, so log
//! aggregation can query by the same names across subsystems. Events spell
//! the names out literally; keep the two in step.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Broken invariant in data handed to us, requires attention |
//! | WARN  | Recoverable issue, graceful fallback applied (missing concept, bad env value) |
//! | INFO  | Lifecycle events (subscriber installed, store created) |
//! | DEBUG | Store mutations with entity ids |
//! | TRACE | Per-lookup decisions (translation fallback tier) |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Error, Result};

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "core", "store"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "labels", "render", "time", "concepts", "statements"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "resolve_label", "render_value", "delete_concept"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Concept UUID being operated on.
pub const CONCEPT_ID: &str = "concept_id";

/// Statement UUID being operated on.
pub const STATEMENT_ID: &str = "statement_id";

/// Translation UUID being operated on.
pub const TRANSLATION_ID: &str = "translation_id";

/// Reference UUID being operated on.
pub const REFERENCE_ID: &str = "reference_id";

/// Requested language tag.
pub const LANG: &str = "lang";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Number of entities removed by a cascading delete.
pub const CASCADE_COUNT: &str = "cascade_count";

/// Fallback tier that produced a label (1 = exact, 2 = language, 3 = any).
pub const FALLBACK_TIER: &str = "fallback_tier";

/// Default env filter when `RUST_LOG` is not set.
pub const DEFAULT_ENV_FILTER: &str = "kb_core=info,kb_store=info";

/// Install a global `tracing` subscriber.
///
/// Environment:
/// - `RUST_LOG`: standard env filter (default: [`DEFAULT_ENV_FILTER`])
/// - `LOG_FORMAT`: `text` (default) or `json`
/// - `LOG_ANSI`: `true`/`false` override for ANSI colors
///
/// Fails with [`Error::Config`] when a global subscriber is already set.
pub fn init_tracing() -> Result<()> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_ENV_FILTER.into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        let mut layer = tracing_subscriber::fmt::layer();
        if let Some(ansi) = log_ansi {
            layer = layer.with_ansi(ansi);
        }
        registry.with(layer).try_init()
    };
    installed.map_err(|e| Error::Config(format!("tracing subscriber: {}", e)))?;

    tracing::info!(log_format = %log_format, "Logging initialized");
    Ok(())
}
