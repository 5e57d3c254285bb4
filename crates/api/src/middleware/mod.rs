//! Request extractors and response middleware.
//!
//! - [`existence::ResolvedFolder`] / [`existence::ResolvedNote`] -- resolve the
//!   `{id}` path segment or short-circuit with 404.
//! - [`security_headers::security_headers`] -- hardening headers on every response.
//! - [`server_errors::render_server_errors`] -- the top-level 500 responder.

pub mod existence;
pub mod security_headers;
pub mod server_errors;
