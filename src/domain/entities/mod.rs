//! Core domain entities.
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - [`Link`] / [`NewLink`] - short code to destination mapping
//! - [`Click`] / [`NewClick`] - one resolved redirect
//! - [`LinkSummary`] - link joined with its click aggregate (read model)

pub mod click;
pub mod link;

pub use click::{Click, NewClick};
pub use link::{Link, LinkSummary, NewLink};
