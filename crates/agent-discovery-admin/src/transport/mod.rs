//! Transport layer for the admin API.

pub mod http;

pub use http::{router, AdminServer, AppState, REQUEST_ID_HEADER};
