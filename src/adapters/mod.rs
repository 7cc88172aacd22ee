//! Adapter implementations for port traits.
//!
//! - `fonts/`: Embedded and directory-backed font sources
//! - `raster/`: Real drawing onto an RGBA image
//! - `recording/`: Record canvas calls to a draw log
//! - `stub/`: No-op canvas with injectable failures

pub mod fonts;
pub mod raster;
pub mod recording;
pub mod stub;
