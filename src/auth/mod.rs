//! Authentication state kept between runs.
//!
//! - `credentials` - the stored bearer token and its file
//! - `token` - reading the expiry out of a JWT access token

pub mod credentials;
pub mod token;

pub use credentials::{Credentials, CredentialsManager};
pub use token::{expires_at_for, jwt_expires_at};
