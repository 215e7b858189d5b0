//! JPEG recompression service.
//!
//! Accepts an image upload over HTTP and returns it re-encoded as JPEG at a
//! caller-chosen quality.
//!
//! ```text
//!     POST /compress?quality=N   ┌──────────┐    ┌──────────────┐    ┌───────────┐
//!     ──────────────────────────▶│  http    │───▶│   compress   │───▶│ response  │──▶ image/jpeg
//!       multipart "image" part   │ handlers │    │ decode/encode│    │ attachment│
//!                                └──────────┘    └──────────────┘    └───────────┘
//!     * /  ─────────────────────▶ 200 "OK"
//! ```

// Core subsystems
pub mod compress;
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
