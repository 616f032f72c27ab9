//! Service layer - outbound conversion requests and system integration
//!
//! - `convert` - HTTP client for the conversion service
//! - `submit_runner` - worker thread + channel around one in-flight request
//! - `clipboard` - best-effort system clipboard access

pub mod clipboard;
pub mod convert;
pub mod submit_runner;

pub use convert::{ConversionClient, ConvertError};
pub use submit_runner::SubmitRunner;
