//! Backend API integration: plain-data channel types, the HTTP client, and
//! the async worker that bridges them to the UI.

pub mod client;
pub mod types;
pub mod worker;
