//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request spans (tower_http TraceLayer, tagged with x-request-id)
//!     → handler events (metadata only, never image content)
//!     → logging.rs subscriber (pretty or JSON on stdout)
//! ```

pub mod logging;
