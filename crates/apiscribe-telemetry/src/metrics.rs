//! Recorder metrics.
//!
//! Counters are emitted through the `metrics` facade. No exporter is
//! installed here; an embedding application chooses its own recorder, and
//! without one every call is a no-op.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `apiscribe_exchanges_recorded_total` | Counter | `method` | Exchanges merged into the document |
//! | `apiscribe_unresolved_routes_total` | Counter | `method` | Exchanges whose path matched no route |
//! | `apiscribe_document_saves_total` | Counter | `outcome` | Document saves by outcome |
//! | `apiscribe_document_paths` | Gauge | - | Paths currently in the document |

use std::sync::Once;

use metrics::{counter, describe_counter, describe_gauge, gauge};

/// Exchanges merged into the document.
pub const EXCHANGES_RECORDED: &str = "apiscribe_exchanges_recorded_total";

/// Exchanges whose concrete path matched no route.
pub const UNRESOLVED_ROUTES: &str = "apiscribe_unresolved_routes_total";

/// Document saves by outcome.
pub const DOCUMENT_SAVES: &str = "apiscribe_document_saves_total";

/// Paths currently in the document.
pub const DOCUMENT_PATHS: &str = "apiscribe_document_paths";

static DESCRIBE: Once = Once::new();

/// Registers descriptions for all recorder metrics once per process.
pub fn describe_metrics() {
    DESCRIBE.call_once(|| {
        describe_counter!(
            EXCHANGES_RECORDED,
            "Total number of exchanges merged into the document"
        );
        describe_counter!(
            UNRESOLVED_ROUTES,
            "Total number of exchanges whose path matched no route"
        );
        describe_counter!(DOCUMENT_SAVES, "Total document saves by outcome");
        describe_gauge!(DOCUMENT_PATHS, "Number of paths in the document");
    });
}

/// Records an exchange merged into the document.
pub fn record_exchange(method: &str) {
    counter!(EXCHANGES_RECORDED, "method" => method.to_string()).increment(1);
}

/// Records an exchange that fell back to its concrete path.
pub fn record_unresolved_route(method: &str) {
    counter!(UNRESOLVED_ROUTES, "method" => method.to_string()).increment(1);
}

/// Records a document save attempt.
pub fn record_document_save(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!(DOCUMENT_SAVES, "outcome" => outcome).increment(1);
}

/// Sets the number of documented paths.
#[allow(clippy::cast_precision_loss)]
pub fn set_document_paths(count: usize) {
    gauge!(DOCUMENT_PATHS).set(count as f64);
}
