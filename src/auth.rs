//! Identity data model: identifiers, scopes, tokens, and login outcomes.

pub mod id;
pub mod identity;
pub mod scope;
pub mod token;

pub use id::*;
pub use identity::*;
pub use scope::*;
pub use token::{access::*, secret::*};
