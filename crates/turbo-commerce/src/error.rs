//! Cart error types.
//!
//! The display strings are the storefront's user-facing messages; they are
//! what ends up in the notification toast.

use thiserror::Error;

/// Errors that can occur while mutating a cart.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartError {
    /// Catalog lookup failed (or the new snapshot could not be stored).
    #[error("Erro na adição do produto")]
    AddFailed,

    /// Requested quantity exceeds what the stock service reports.
    #[error("Quantidade solicitada fora de estoque")]
    OutOfStock,

    /// Product is not in the cart.
    #[error("Erro na remoção do produto")]
    RemoveFailed,

    /// Product is not in the cart, or its stock could not be read.
    #[error("Erro na alteração de quantidade do produto")]
    UpdateFailed,
}

/// Fieldless discriminant of [`CartError`], handy for metrics labels and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AddFailed,
    OutOfStock,
    RemoveFailed,
    UpdateFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AddFailed => "add_failed",
            ErrorKind::OutOfStock => "out_of_stock",
            ErrorKind::RemoveFailed => "remove_failed",
            ErrorKind::UpdateFailed => "update_failed",
        }
    }
}

impl CartError {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::AddFailed => ErrorKind::AddFailed,
            CartError::OutOfStock => ErrorKind::OutOfStock,
            CartError::RemoveFailed => ErrorKind::RemoveFailed,
            CartError::UpdateFailed => ErrorKind::UpdateFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(CartError::AddFailed.to_string(), "Erro na adição do produto");
        assert_eq!(
            CartError::OutOfStock.to_string(),
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(CartError::RemoveFailed.to_string(), "Erro na remoção do produto");
        assert_eq!(
            CartError::UpdateFailed.to_string(),
            "Erro na alteração de quantidade do produto"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(CartError::OutOfStock.kind(), ErrorKind::OutOfStock);
        assert_eq!(CartError::RemoveFailed.kind().as_str(), "remove_failed");
    }
}
