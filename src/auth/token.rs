//! Access-token values returned by adapters.

pub mod access;
pub mod secret;
