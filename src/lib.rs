// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # parley-net - Networking layer of the Parley chat SDK
//!
//! Configures HTTP access to the chat API: every request is decorated with the
//! SDK identification header (`x-iris-identification: secret:device_id`), the
//! host's additional headers and, when a user is signed in, the
//! `Authorization` header.
//!
//! ## Features
//!
//! - REST client with JSON calls and an interceptor chain
//! - Authenticated image URLs for deferred image loading
//! - Certificate pinning bound to the API host
//! - Error-message extraction from failed responses
//!
//! ## Example
//!
//! ```rust,no_run
//! use parley_net::{ImageKind, RequestConfigurator, SdkConfig, SharedConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SharedConfig::new(
//!         SdkConfig::new("https://api.parley.nu/clientApi/v1.6/", "app-secret", "device-1")
//!             .header("x-tenant", "acme"),
//!     );
//!     let configurator = RequestConfigurator::new(config);
//!
//!     let client = configurator.build_rest_client()?;
//!     let messages: serde_json::Value = client.get_json("messages").await?;
//!     println!("{}", messages);
//!
//!     let image = configurator.build_image_url(ImageKind::Message, 42);
//!     println!("{}", image.url());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod configurator;
pub mod error;
pub mod http;
pub mod image;
pub mod network;
pub mod security;

// Configuration
pub use config::{SdkConfig, SharedConfig, TransportTimeouts};

// Configurator
pub use configurator::RequestConfigurator;

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{
    compute_headers, extract_error_message, extract_error_message_from, ErrorResponse,
    HeaderEntry, Request, Response, RestClient, HEADER_AUTHORIZATION, HEADER_IDENTIFICATION,
};

// Images
pub use image::{AuthenticatedImageUrl, ImageKind};

// Network
pub use network::{interceptor_fn, InterceptAction, InterceptorChain, RequestInterceptor};

// Security
pub use security::{PinningProvider, StaticPinSet};

/// parley-net version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
