//! Record types for the list endpoints the controller is instantiated against.
//!
//! Each record names the key under which the endpoint returns its items, so a
//! controller can be configured per resource without repeating that string.
use serde::de::DeserializeOwned;

mod log;
pub use log::{LoginLog, ReviewLog, VisitorView};

mod user;
pub use user::User;

mod project;
pub use project::Project;

/// A record type served by a paginated list endpoint.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Key of the items array inside the response's `data` object.
    const ITEMS_KEY: &'static str;
}
