//! Partition membership mask.
//!
//! Each readout partition (0-7) subscribes to triggers independently. The
//! header carries one bit per partition; bit `n` is set when partition `n`
//! takes part in the event or transition.

use core::fmt;

use bit_iter::BitIter;

use crate::layout::validate_field;
use crate::Result;

/// Number of partitions the mask can describe.
pub const NUM_PARTITIONS: u8 = 8;

/// Partition membership bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PartitionMask(u8);

impl PartitionMask {
    /// Mask with no partitions.
    pub const NONE: Self = Self(0);

    /// Mask with all eight partitions.
    pub const ALL: Self = Self(0xFF);

    /// Create from raw byte.
    pub const fn from_byte(value: u8) -> Self {
        Self(value)
    }

    /// Get raw byte value.
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Build a mask from partition numbers.
    ///
    /// Returns [`Error::FieldOverflow`](crate::Error::FieldOverflow) for a
    /// partition number above 7.
    pub fn from_partitions(partitions: &[u8]) -> Result<Self> {
        let mut m = 0;
        for &p in partitions {
            validate_field("partitions", p as u64, (NUM_PARTITIONS - 1) as u64)?;
            m |= 1 << p;
        }
        Ok(Self(m))
    }

    /// Check if partition `p` is a member.
    pub fn contains(self, p: u8) -> bool {
        p < NUM_PARTITIONS && (self.0 >> p) & 1 == 1
    }

    /// Number of member partitions.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Check if no partition is a member.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Member partition numbers in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        BitIter::from(self.0).map(|b| b as u8)
    }

    /// Returns the partition if exactly one is a member.
    pub fn single(self) -> Option<u8> {
        match self.count() {
            1 => self.iter().next(),
            _ => None,
        }
    }
}

impl From<u8> for PartitionMask {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<PartitionMask> for u8 {
    fn from(mask: PartitionMask) -> Self {
        mask.0
    }
}

impl fmt::Display for PartitionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, p) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str("]")
    }
}
