//! Image recompression.
//!
//! # Data Flow
//! ```text
//! upload bytes
//!     → codec::decode (format sniffed from content: JPEG, PNG, GIF, BMP, TIFF)
//!     → DynamicImage (request-local pixel buffer)
//!     → codec::encode_jpeg (at the resolved Quality)
//!     → JPEG bytes
//! ```
//!
//! Everything here is synchronous and CPU-bound; callers on the async runtime
//! run it on the blocking pool.

pub mod codec;
pub mod quality;

pub use codec::{decode, encode_jpeg, recompress, CompressError};
pub use quality::{InvalidQuality, Quality};
