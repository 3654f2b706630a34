//! Backend module
//!
//! Provides the HTTP client for the inference service and its wire types.

pub mod client;
pub mod types;

pub use client::{Backend, BackendClient, DEFAULT_BACKEND_URL, DEFAULT_HEALTH_TIMEOUT};
pub use types::{PredictRequestBody, PredictResponseBody};
