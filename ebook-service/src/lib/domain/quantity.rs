use std::fmt;

use thiserror::Error;

/// Error for Quantity validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Quantity must be at least {min}, got {actual}")]
    TooSmall { min: i32, actual: i32 },

    #[error("Quantity overflow: {current} + {added}")]
    Overflow { current: i32, added: i32 },
}

/// Number of copies in an order or cart line. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(i32);

impl Quantity {
    const MIN: i32 = 1;

    pub fn new(value: i32) -> Result<Self, QuantityError> {
        if value < Self::MIN {
            Err(QuantityError::TooSmall {
                min: Self::MIN,
                actual: value,
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Quantity of one.
    pub fn one() -> Self {
        Self(Self::MIN)
    }

    /// Sum of two quantities.
    ///
    /// # Errors
    /// * `Overflow` - The sum does not fit the storage column
    pub fn checked_add(self, other: Quantity) -> Result<Self, QuantityError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(QuantityError::Overflow {
                current: self.0,
                added: other.0,
            })
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::one()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
