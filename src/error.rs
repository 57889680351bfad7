//! Error types for event header decoding.
//!
//! This module defines the [`Error`] enum which represents every failure
//! that can occur when decoding, building, or reading event header frames.
//!
//! Errors fall into three groups:
//!
//! - **Format errors** ([`Error::FrameSize`]): the input buffer does not have
//!   the exact size of the frame layout. Malformed input stays malformed, so
//!   these are never retried.
//! - **Value-range errors** ([`Error::FieldOverflow`]): a value handed to the
//!   encoder does not fit in its on-wire field.
//! - **Contract violations** ([`Error::TriggerKindMismatch`]): the caller asked
//!   for the trigger-info layout the discriminant bit does not select.
//!
//! # Example
//!
//! ```
//! use l2si_header::{Error, EventHeader};
//!
//! match EventHeader::decode(&[0u8; 23]) {
//!     Err(Error::FrameSize { actual, expected }) => {
//!         assert_eq!(actual, 23);
//!         assert_eq!(expected, 24);
//!     }
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

use core::fmt;

#[cfg(feature = "alloc")]
use alloc::string::String;

use crate::trigger::TriggerKind;

/// Errors that can occur while handling event header frames.
#[derive(Debug)]
pub enum Error {
    /// The buffer length does not match the frame layout.
    ///
    /// The decoder never truncates or pads, so any length other than the
    /// exact frame size is rejected.
    FrameSize {
        /// Number of bytes provided
        actual: usize,
        /// Number of bytes the layout requires
        expected: usize,
    },

    /// A value does not fit in the bit width of its on-wire field.
    FieldOverflow {
        /// Name of the field, as it appears on the wire
        field: &'static str,
        /// The rejected value
        value: u64,
        /// Largest value the field can hold
        max: u64,
    },

    /// A trigger-info accessor was called for the layout the discriminant
    /// bit does not select.
    TriggerKindMismatch {
        /// Layout the caller asked for
        expected: TriggerKind,
        /// Layout the discriminant bit selects
        actual: TriggerKind,
    },

    /// An I/O error occurred while reading a frame.
    ///
    /// Only available with the `std` feature.
    #[cfg(feature = "std")]
    IOError(std::io::Error),

    /// Rendering a header to JSON failed.
    #[cfg(feature = "alloc")]
    Serialization(String),
}

impl Error {
    /// Returns true if the input bytes themselves were malformed.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::FrameSize { .. })
    }

    /// Returns true if the caller used the wrong trigger-info accessor.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Error::TriggerKindMismatch { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FrameSize { actual, expected } => write!(
                f,
                "Invalid frame size: expected exactly {expected} bytes, got {actual}"
            ),
            Error::FieldOverflow { field, value, max } => write!(
                f,
                "Value {value:#x} does not fit in field {field:?} (max {max:#x})"
            ),
            Error::TriggerKindMismatch { expected, actual } => write!(
                f,
                "Trigger info holds {actual} layout, {expected} layout requested"
            ),
            #[cfg(feature = "std")]
            Error::IOError(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "alloc")]
            Error::Serialization(s) => write!(f, "Serialization error: {s}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IOError(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IOError(err)
    }
}

/// A specialized Result type for event header operations.
pub type Result<T> = core::result::Result<T, Error>;
