//! Logger setup shared by binaries embedding list query controllers.
mod logger;
pub use logger::*;
