//! JSON-over-HTTP client for the source forge REST API.
//!
//! Everything a call needs (base URL, token) lives in an explicit
//! [`ClientConfig`]; nothing is read from process-wide state after
//! construction.
//!
//! # Example (env-configured)
//!
//! ```no_run
//! use forge_client::{ClientConfig, ForgeClient};
//!
//! # async fn run() -> forge_client::Result<()> {
//! let client = ForgeClient::new(ClientConfig::from_env()?)?;
//! let repos = client.get("/orgs/acme/repos").await?;
//! println!("{}", forge_client::render::display(&repos, false));
//! # Ok(()) }
//! ```

mod body;
mod client;
mod config;
mod error;
pub mod render;

pub use body::{fields_to_object, parse_body};
pub use client::ForgeClient;
pub use config::{API_URL_ENV, ClientConfig, DEFAULT_API_URL, TOKEN_ENV};
pub use error::{ClientError, Result};
pub use reqwest::Method;
