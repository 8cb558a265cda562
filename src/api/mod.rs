//! Remote content API access.
//!
//! [`ApiClient`] owns transport and credentials; [`ContentApi`] and
//! [`AuthApi`] are thin typed wrappers over individual endpoints.

pub mod auth;
pub mod client;
pub mod content;
pub mod query;

pub use auth::AuthApi;
pub use client::ApiClient;
pub use content::{ContentApi, ListOptions};
pub use query::{Query, SortDirection, SortKey};
