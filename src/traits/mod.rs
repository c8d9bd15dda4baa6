//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP requests and streaming responses
//! - [`CredentialsProvider`] - credentials storage and retrieval

pub mod credentials;
pub mod http;

pub use credentials::{CredentialsError, CredentialsProvider};
pub use http::{Headers, HttpClient, HttpError, Method, Response};
