//! OneLogin identity resolver for onoffboard.
//!
//! Resolves a numeric OneLogin user id into a [`onoffboard_core::UserRecord`]
//! through the v2 users API.
//!
//! # Features
//!
//! - `OAuth2` client credentials authentication with token caching
//! - Platform handle read from a configurable custom attribute (`GH` by default)
//!
//! # Example
//!
//! ```no_run
//! use onoffboard_core::{IdentityResolver, UserId};
//! use onoffboard_onelogin::{OneLoginClient, OneLoginConfig, OneLoginCredentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = OneLoginCredentials {
//!     client_id: "your-client-id".to_string(),
//!     client_secret: "your-client-secret".to_string().into(),
//! };
//! let client = OneLoginClient::new(OneLoginConfig::for_subdomain("acme", credentials))?;
//! let user = client.resolve(UserId::new(42)).await?;
//! println!("{}", user.display_name);
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod error;

pub use auth::TokenCache;
pub use client::{OneLoginClient, OneLoginUser};
pub use config::{OneLoginConfig, OneLoginCredentials, DEFAULT_HANDLE_ATTRIBUTE};
pub use error::{OneLoginError, OneLoginResult};
