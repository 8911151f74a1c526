//! Data types shared by the listq crates.
//!
//! Nothing in here performs I/O: these are the values that flow between the
//! controller, the remote list service and the presentation layer.
mod domain;
pub use domain::*;

mod wire;
pub use wire::{ListEnvelope, ServerPagination};

mod error;
pub use error::FetchError;

pub mod resource;
pub use resource::{LoginLog, Project, Resource, ReviewLog, User, VisitorView};
