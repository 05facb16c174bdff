pub mod backend;
pub use backend::{Backend, BackendKind};

mod error;
pub use error::{CleanupFailure, Error, IntoError};

pub mod namespace;
pub use namespace::{DatabaseName, Namespace, WorkerId};

/// A Result type alias that uses Andamios' [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
