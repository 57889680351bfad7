//! Builder for EventHeader values.

use super::EventHeader;
use crate::Result;
use crate::layout::{COUNT_MASK, PULSE_ID_MASK, validate_field};
use crate::partition::PartitionMask;
use crate::trigger::TriggerInfo;

/// Builder for [`EventHeader`].
///
/// All fields default to zero. [`build`](Self::build) checks that every value
/// fits in its on-wire field.
///
/// # Example
///
/// ```
/// use l2si_header::EventHeader;
/// use l2si_header::trigger::EventInfo;
///
/// let header = EventHeader::builder()
///     .pulse_id(0x12_3456)
///     .time_stamp(1_700_000_000)
///     .partitions(0b0000_0001u8)
///     .trigger_info(EventInfo::new(3, 0)?.with_l0_accept(true))
///     .count(17)
///     .build()?;
///
/// let decoded = EventHeader::decode(&header.to_bytes())?;
/// assert_eq!(decoded, header);
/// # Ok::<(), l2si_header::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventHeaderBuilder {
    pulse_id: u64,
    time_stamp: u64,
    partitions: PartitionMask,
    trigger_info: TriggerInfo,
    count: u32,
    version: u8,
}

impl EventHeaderBuilder {
    /// Create a new builder with all fields zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pulse identifier (56 bits).
    pub fn pulse_id(mut self, pulse_id: u64) -> Self {
        self.pulse_id = pulse_id;
        self
    }

    /// Set the timestamp.
    pub fn time_stamp(mut self, time_stamp: u64) -> Self {
        self.time_stamp = time_stamp;
        self
    }

    /// Set the partition mask.
    pub fn partitions(mut self, partitions: impl Into<PartitionMask>) -> Self {
        self.partitions = partitions.into();
        self
    }

    /// Set the trigger-info word, from a raw `u16` or a decoded view.
    pub fn trigger_info(mut self, trigger_info: impl Into<TriggerInfo>) -> Self {
        self.trigger_info = trigger_info.into();
        self
    }

    /// Set the event or transition counter (24 bits).
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Set the format version.
    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Build the header.
    ///
    /// Returns [`Error::FieldOverflow`](crate::Error::FieldOverflow) if the
    /// pulse id needs more than 56 bits or the count more than 24 bits.
    pub fn build(self) -> Result<EventHeader> {
        validate_field("pulseId", self.pulse_id, PULSE_ID_MASK)?;
        validate_field("count", self.count as u64, COUNT_MASK as u64)?;

        Ok(EventHeader {
            pulse_id: self.pulse_id,
            time_stamp: self.time_stamp,
            partitions: self.partitions,
            trigger_info: self.trigger_info,
            count: self.count,
            version: self.version,
        })
    }
}
