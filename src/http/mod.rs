//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, routes)
//!     → request.rs (request ID, multipart form, query)
//!     → handlers.rs (health check, compression pipeline)
//!     → response.rs (JPEG attachment or plain-text error)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, Upload, UploadForm, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
