//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Creation inputs live in separate
//! `New*` structs since identifiers and timestamps are assigned by the store.
//!
//! - [`UrlRecord`] - A long URL and the short code derived from its identifier
//! - [`Click`] - One resolution of a short code

pub mod click;
pub mod url_record;

pub use click::{Click, NewClick};
pub use url_record::{NewUrlRecord, UrlRecord};
