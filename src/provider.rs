//! Provider-facing contracts: the adapter capability trait, per-provider application
//! configuration, and the mapping from provider-native failures into [`ErrorKind`].
//!
//! [`ErrorKind`]: crate::error::ErrorKind

pub mod adapter;
pub mod config;
pub mod mapping;

pub use adapter::*;
pub use config::*;
pub use mapping::*;

// self
use crate::_prelude::*;

/// The two identity providers the orchestrator unifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
	/// Individual (non-organizational) accounts.
	Personal,
	/// Directory-backed organizational accounts.
	Organizational,
}
impl ProviderKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Personal => "personal",
			Self::Organizational => "organizational",
		}
	}

	/// Returns the opposite provider.
	pub const fn other(self) -> Self {
		match self {
			Self::Personal => Self::Organizational,
			Self::Organizational => Self::Personal,
		}
	}
}
impl Display for ProviderKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
