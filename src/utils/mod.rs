//! Utility functions for code encoding, URL validation, and request handling.
//!
//! - [`base62`] - Identifier ⇄ short code encoding
//! - [`url_validator`] - Pure validation of long URLs
//! - [`client_ip`] - Client address extraction for click analytics

pub mod base62;
pub mod client_ip;
pub mod url_validator;
