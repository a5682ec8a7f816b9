//! HTTP transport with timeout and user agent.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
