//! # intake-api
//!
//! HTTP clients for the services behind the intake widget:
//! - the diagnosis chat endpoint (`POST /chat`)
//! - the appointment lookup endpoint (`GET /appointments/{id}`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use intake_api::{ExchangeClient, HttpExchangeClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = HttpExchangeClient::new("http://localhost:8000");
//!
//!     match client.exchange("머리가 아파요", &[]).await {
//!         Ok(reply) => {
//!             for message in reply.messages {
//!                 println!("{}", message);
//!             }
//!         }
//!         Err(e) => eprintln!("exchange failed: {}", e),
//!     }
//! }
//! ```

pub mod appointment;
pub mod client;
pub mod config;

// Re-export commonly used types
pub use client::{ExchangeClient, ExchangeError, HttpExchangeClient};
pub use appointment::{AppointmentClient, LookupError};
pub use config::{normalize_base_url, ClientOptions, DEFAULT_BASE_URL};
