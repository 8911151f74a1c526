//! HTTP list source for the list query controller.
//!
//! Talks to a paginated JSON endpoint of the form
//! `GET {endpoint}{path}?page=&limit=&<filters>` answering with
//! `{ success, message?, data: { <items_key>: [...], pagination: {...} } }`.
mod config;
pub use config::RemoteConfig;

mod errors;
pub use errors::RemoteError;

mod source;
pub use source::HttpListSource;
