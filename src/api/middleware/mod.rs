//! HTTP middleware for request processing.
//!
//! Provides the cross-origin policy and request tracing. Rate limiting lives
//! in the link creation service rather than in a layer, so that only valid
//! creation attempts are counted.

pub mod cors;
pub mod tracing;
