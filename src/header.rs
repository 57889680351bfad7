//! Event header frame.
//!
//! The timing system prefixes every event and every transition it delivers
//! with a fixed 24-byte little-endian header:
//!
//! | Bytes  | Field          | Width | Notes                              |
//! |--------|----------------|-------|------------------------------------|
//! | 0-7    | `pulseId`      | 56    | high byte of the word is padding   |
//! | 8-15   | `timeStamp`    | 64    |                                    |
//! | 16     | `partitions`   | 8     | one bit per partition              |
//! | 17     | padding        | 8     |                                    |
//! | 18-19  | `triggerInfo`  | 16    | see [`crate::trigger`]             |
//! | 20-23  | `count`        | 24    | low 24 bits of the word            |
//! | 20-23  | `version`      | 8     | high 8 bits of the same word       |
//!
//! The transport payload carries the same header followed by 8 bytes of
//! padding ([`FrameLayout::Payload`]).

use core::fmt;

use crate::layout::{
    COUNT_MASK, COUNT_VERSION_OFFSET, FrameLayout, HEADER_SIZE, HeaderBytes, PARTITIONS_OFFSET,
    PAYLOAD_SIZE, PULSE_ID_MASK, PULSE_ID_OFFSET, TIME_STAMP_OFFSET, TRIGGER_INFO_OFFSET,
    VERSION_SHIFT, field_bytes, header_bytes, write_at,
};
use crate::partition::PartitionMask;
use crate::trigger::{TriggerInfo, TriggerKind, write_fields};
use crate::{Error, Result};

mod builder;

pub use builder::EventHeaderBuilder;

/// Decoded event header.
///
/// Values are produced by [`EventHeader::decode`] or built with
/// [`EventHeader::builder`]. Both paths guarantee that `pulse_id` fits in
/// 56 bits and `count` in 24 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EventHeader {
    pulse_id: u64,
    time_stamp: u64,
    partitions: PartitionMask,
    trigger_info: TriggerInfo,
    count: u32,
    version: u8,
}

impl EventHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = HEADER_SIZE;

    /// Start building a header from field values.
    pub fn builder() -> EventHeaderBuilder {
        EventHeaderBuilder::new()
    }

    /// Decode a 24-byte header.
    ///
    /// # Arguments
    /// * `bytes` - Exactly [`HEADER_SIZE`] bytes.
    ///
    /// # Returns
    /// The decoded header, or [`Error::FrameSize`] if `bytes` is shorter or
    /// longer than one header.
    ///
    /// # Example
    ///
    /// ```
    /// use l2si_header::EventHeader;
    ///
    /// let mut frame = [0u8; 24];
    /// frame[20..24].copy_from_slice(&0x1234_5678u32.to_le_bytes());
    ///
    /// let header = EventHeader::decode(&frame)?;
    /// assert_eq!(header.count(), 0x34_5678);
    /// assert_eq!(header.version(), 0x12);
    /// # Ok::<(), l2si_header::Error>(())
    /// ```
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, FrameLayout::Header)
    }

    /// Decode a 32-byte transport payload.
    ///
    /// The trailing 8 padding bytes are discarded.
    pub fn decode_payload(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, FrameLayout::Payload)
    }

    /// Decode one frame of the given layout.
    pub fn decode_with(bytes: &[u8], layout: FrameLayout) -> Result<Self> {
        Ok(Self::from_header_bytes(header_bytes(bytes, layout)?))
    }

    fn from_header_bytes(header: &HeaderBytes) -> Self {
        let pulse_id = u64::from_le_bytes(field_bytes(header, PULSE_ID_OFFSET));
        let trigger_info = u16::from_le_bytes(field_bytes(header, TRIGGER_INFO_OFFSET));
        let count_version = u32::from_le_bytes(field_bytes(header, COUNT_VERSION_OFFSET));
        Self {
            pulse_id: pulse_id & PULSE_ID_MASK,
            time_stamp: u64::from_le_bytes(field_bytes(header, TIME_STAMP_OFFSET)),
            partitions: PartitionMask::from_byte(header[PARTITIONS_OFFSET]),
            trigger_info: TriggerInfo::from_u16(trigger_info),
            count: count_version & COUNT_MASK,
            version: (count_version >> VERSION_SHIFT) as u8,
        }
    }

    /// Encode to the 24-byte header layout.
    ///
    /// Padding bytes are written as zero.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        self.write_header(&mut bytes);
        bytes
    }

    /// Encode to the 32-byte transport payload layout.
    pub fn to_payload_bytes(&self) -> [u8; PAYLOAD_SIZE] {
        let mut bytes = [0u8; PAYLOAD_SIZE];
        self.write_header(&mut bytes);
        bytes
    }

    fn write_header(&self, bytes: &mut [u8]) {
        let pulse_id = self.pulse_id & PULSE_ID_MASK;
        let count_version = (self.count & COUNT_MASK) | (self.version as u32) << VERSION_SHIFT;
        write_at(bytes, PULSE_ID_OFFSET, &pulse_id.to_le_bytes());
        write_at(bytes, TIME_STAMP_OFFSET, &self.time_stamp.to_le_bytes());
        write_at(bytes, PARTITIONS_OFFSET, &[self.partitions.to_byte()]);
        let trigger_info = self.trigger_info.to_u16();
        write_at(bytes, TRIGGER_INFO_OFFSET, &trigger_info.to_le_bytes());
        write_at(bytes, COUNT_VERSION_OFFSET, &count_version.to_le_bytes());
    }

    /// Pulse identifier (56 bits).
    pub fn pulse_id(&self) -> u64 {
        self.pulse_id
    }

    /// Absolute timestamp.
    pub fn time_stamp(&self) -> u64 {
        self.time_stamp
    }

    /// Partitions taking part in this event or transition.
    pub fn partitions(&self) -> PartitionMask {
        self.partitions
    }

    /// Raw trigger-info word.
    pub fn trigger_info(&self) -> TriggerInfo {
        self.trigger_info
    }

    /// Running event or transition counter (24 bits).
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Header format version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Check if this header describes an event.
    pub fn is_event(&self) -> bool {
        self.trigger_info.is_event()
    }

    /// Whether this header describes an event or a transition.
    pub fn kind(&self) -> TriggerKind {
        self.trigger_info.kind()
    }

    /// Field name/value pairs in wire order.
    pub fn fields(&self) -> [(&'static str, u64); 6] {
        [
            ("pulseId", self.pulse_id),
            ("timeStamp", self.time_stamp),
            ("partitions", self.partitions.to_byte() as u64),
            ("triggerInfo", self.trigger_info.to_u16() as u64),
            ("count", self.count as u64),
            ("version", self.version as u64),
        ]
    }

    /// Render the header as a JSON object keyed by wire field name.
    ///
    /// Requires the `serde_json` feature.
    #[cfg(feature = "serde_json")]
    pub fn to_json(&self) -> Result<alloc::string::String> {
        serde_json::to_string(self).map_err(|e| {
            Error::Serialization(alloc::format!("JSON serialization failed: {}", e))
        })
    }
}

impl TryFrom<&[u8]> for EventHeader {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes)
    }
}

impl From<[u8; HEADER_SIZE]> for EventHeader {
    fn from(bytes: [u8; HEADER_SIZE]) -> Self {
        Self::from_header_bytes(&bytes)
    }
}

impl From<EventHeader> for [u8; HEADER_SIZE] {
    fn from(header: EventHeader) -> Self {
        header.to_bytes()
    }
}

impl fmt::Display for EventHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(f, &self.fields())
    }
}
