//! Domain building blocks shared by the Noteful storage and HTTP layers:
//! id/timestamp types, the domain error, request-field rules, and the HTML
//! sanitizer applied to every outgoing text field.

pub mod error;
pub mod fields;
pub mod sanitize;
pub mod types;
