//! Authenticator implementations.
//!
//! - `remote`: asks an external authorization service about the session cookie
//! - `dev`: trusts the cookie value as the user id (local development only)

pub mod dev;
pub mod remote;

pub use dev::DevAuthenticator;
pub use remote::RemoteAuthenticator;
