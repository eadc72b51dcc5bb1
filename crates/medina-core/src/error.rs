//! # Error Types
//!
//! Domain-specific error types for medina-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  medina-core errors (this file)                                        │
//! │  └── CoreError        - Cart slot encode/decode failures               │
//! │                                                                         │
//! │  medina-storage errors (separate crate)                                │
//! │  └── StorageError     - Durable slot read/write failures               │
//! │                                                                         │
//! │  medina-site errors (session shell)                                    │
//! │  └── SiteError        - Config and startup failures                    │
//! │                                                                         │
//! │  Flow: CoreError → StorageError → SiteError                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart transitions themselves cannot fail: the cart trusts its caller and
//! accepts any item it is given.

use thiserror::Error;

/// Core errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The stored cart lines are not a JSON array of cart items.
    ///
    /// ## When This Occurs
    /// - The slot was written by an older or foreign build
    /// - The slot was edited by hand or truncated
    #[error("Cart slot is not valid: {0}")]
    Decode(#[source] serde_json::Error),

    /// The cart lines could not be turned into JSON.
    #[error("Cart lines could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
