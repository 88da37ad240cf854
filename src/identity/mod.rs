// Identity secret lifecycle and commitment registration
pub mod manager;
pub mod store;

pub use manager::*;
pub use store::*;

use thiserror::Error;

/// Secure-store failures. The underlying native keystore is a collaborator
/// behind the `SecureStore` trait; its errors surface here as strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("secure store backend error: {0}")]
    Backend(String),

    #[error("stored value could not be decoded: {0}")]
    Decode(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
