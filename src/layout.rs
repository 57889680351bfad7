//! Wire layout of the event header frame.
//!
//! This module provides:
//! - [`FrameLayout`]: the two frame sizes the producer emits
//! - Byte offsets and bit masks of every header field
//! - Fixed-size field access used by the decoder and encoder

use crate::{Error, Result};

// ============================================================================
// Field Offsets
// ============================================================================
// All offsets are in bytes from the start of the frame. The header is three
// little-endian words (u64, u64, u32 tail) with the partition mask and the
// trigger-info word embedded between the second and third.

/// Size of the event header in bytes.
pub const HEADER_SIZE: usize = 24;

/// Size of the transport payload in bytes (header plus 8 bytes of padding).
pub const PAYLOAD_SIZE: usize = 32;

/// Offset of the 64-bit word carrying the pulse id in its low 56 bits.
pub(crate) const PULSE_ID_OFFSET: usize = 0;

/// Offset of the 64-bit timestamp.
pub(crate) const TIME_STAMP_OFFSET: usize = 8;

/// Offset of the 8-bit partition mask.
pub(crate) const PARTITIONS_OFFSET: usize = 16;

/// Offset of the 16-bit trigger-info word. Byte 17 is padding.
pub(crate) const TRIGGER_INFO_OFFSET: usize = 18;

/// Offset of the 32-bit word packing count (low 24 bits) and version (high 8).
pub(crate) const COUNT_VERSION_OFFSET: usize = 20;

// ============================================================================
// Field Masks
// ============================================================================

/// Mask selecting the 56-bit pulse id out of its 64-bit word.
pub const PULSE_ID_MASK: u64 = 0x00FF_FFFF_FFFF_FFFF;

/// Mask selecting the 24-bit count out of its 32-bit word.
pub const COUNT_MASK: u32 = 0x00FF_FFFF;

/// Shift of the 8-bit version inside the count/version word.
pub(crate) const VERSION_SHIFT: u32 = 24;

/// Frame sizes emitted by the timing hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameLayout {
    /// The bare 24-byte event header.
    #[default]
    Header,
    /// The 32-byte transport payload: the header followed by 8 padding bytes.
    Payload,
}

impl FrameLayout {
    /// Number of bytes one frame occupies in this layout.
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            Self::Header => HEADER_SIZE,
            Self::Payload => PAYLOAD_SIZE,
        }
    }

    /// Create from a frame size in bytes.
    pub fn from_size(size: usize) -> Option<Self> {
        match size {
            HEADER_SIZE => Some(Self::Header),
            PAYLOAD_SIZE => Some(Self::Payload),
            _ => None,
        }
    }
}

// ============================================================================
// Byte Access
// ============================================================================

/// The header bytes of a frame.
pub(crate) type HeaderBytes = [u8; HEADER_SIZE];

/// Borrow the header of a frame that holds exactly one frame of `layout`.
///
/// Returns `Err(FrameSize)` for any other length, so every field read on the
/// returned array is in bounds.
pub(crate) fn header_bytes(bytes: &[u8], layout: FrameLayout) -> Result<&HeaderBytes> {
    let expected = layout.size();
    match bytes.first_chunk::<HEADER_SIZE>() {
        Some(header) if bytes.len() == expected => Ok(header),
        _ => Err(Error::FrameSize {
            actual: bytes.len(),
            expected,
        }),
    }
}

/// The `N` bytes of a header field starting at `offset`.
///
/// Offsets are the constants above, so the range always lies inside the
/// header.
#[inline]
pub(crate) fn field_bytes<const N: usize>(header: &HeaderBytes, offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&header[offset..offset + N]);
    out
}

/// Copy `value` into `bytes` at `offset`.
#[inline]
pub(crate) fn write_at(bytes: &mut [u8], offset: usize, value: &[u8]) {
    bytes[offset..offset + value.len()].copy_from_slice(value);
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Validate that `value` fits in a field whose largest value is `max`.
#[inline]
pub(crate) fn validate_field(field: &'static str, value: u64, max: u64) -> Result<()> {
    if value > max {
        return Err(Error::FieldOverflow { field, value, max });
    }
    Ok(())
}
