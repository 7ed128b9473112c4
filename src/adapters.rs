//! Building blocks for concrete provider adapters.
//!
//! [`pending`] carries the redirect bookkeeping state machine that browser-redirect adapters
//! expose through [`ProviderAdapter::peek_pending_login`] and
//! [`ProviderAdapter::acknowledge_login`]. With the `reqwest` feature, [`refresh`] provides a
//! personal-provider adapter that performs silent acquisition as a REST `refresh_token` grant.
//!
//! [`ProviderAdapter::peek_pending_login`]: crate::provider::ProviderAdapter::peek_pending_login
//! [`ProviderAdapter::acknowledge_login`]: crate::provider::ProviderAdapter::acknowledge_login

pub mod pending;
pub mod refresh;

pub use pending::*;
pub use refresh::*;
