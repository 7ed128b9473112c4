//! One login, token, and logout contract over two OAuth 2.0 identity providers: a
//! personal-account provider and an organizational-account provider.
//!
//! The [`Orchestrator`](orchestrator::Orchestrator) picks a provider adapter, follows
//! "switch to the other provider" signals until a concrete identity comes back, delivers it to
//! the application's completion callback, and only then acknowledges pending redirect logins.
//! Token acquisition tries the silent path first and escalates to an interactive prompt only
//! when the adapter reports [`ErrorKind::InteractiveRequired`](error::ErrorKind).

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod adapters;
pub mod auth;
pub mod error;
pub mod http;
pub mod obs;
pub mod orchestrator;
pub mod provider;

mod oauth;

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		hash::{Hash, Hasher},
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{BoxError, Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
