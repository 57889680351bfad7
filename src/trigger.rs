//! Trigger-info word of the event header.
//!
//! The 16-bit trigger-info field carries one of two bit-field layouts over the
//! same storage. Bit 15 is the discriminant: set for an event, clear for a
//! transition.
//!
//! # Event layout
//!
//! | Bits  | Field      |
//! |-------|------------|
//! | 0     | `l0_accept`|
//! | 1-5   | `l0_tag`   |
//! | 6     | unused     |
//! | 7     | `l0_reject`|
//! | 8     | `l1_expect`|
//! | 9     | `l1_accept`|
//! | 10-14 | `l1_tag`   |
//! | 15    | discriminant (1) |
//!
//! # Transition layout
//!
//! | Bits  | Field    |
//! |-------|----------|
//! | 0     | unused   |
//! | 1-5   | `l0_tag` |
//! | 6-7   | unused   |
//! | 8-14  | `header` |
//! | 15    | discriminant (0) |
//!
//! [`TriggerInfo`] only stores the raw word. The layout-specific views are
//! derived on demand.
//!
//! # Example
//!
//! ```
//! use l2si_header::trigger::{TriggerInfo, TriggerInfoKind};
//!
//! let info = TriggerInfo::from_u16(0x8021);
//! assert!(info.is_event());
//!
//! match info.decode() {
//!     TriggerInfoKind::Event(event) => {
//!         assert!(event.l0_accept());
//!         assert_eq!(event.l0_tag(), 0x10);
//!     }
//!     TriggerInfoKind::Transition(_) => unreachable!(),
//! }
//! ```

use core::fmt;

use crate::layout::validate_field;
use crate::{Error, Result};

/// Bit 15: set for events, clear for transitions.
pub const DISCRIMINANT: u16 = 0x8000;

/// Largest L0 and L1 tag (5 bits).
pub const MAX_TAG: u8 = 0x1F;

/// Largest transition header value (7 bits).
pub const MAX_TRANSITION_HEADER: u8 = 0x7F;

const L0_ACCEPT_BIT: u16 = 0;
const L0_TAG_SHIFT: u16 = 1;
const L0_REJECT_BIT: u16 = 7;
const L1_EXPECT_BIT: u16 = 8;
const L1_ACCEPT_BIT: u16 = 9;
const L1_TAG_SHIFT: u16 = 10;
const TRANSITION_HEADER_SHIFT: u16 = 8;

#[inline]
fn field(word: u16, shift: u16, mask: u8) -> u8 {
    ((word >> shift) as u8) & mask
}

#[inline]
fn flag(word: u16, bit: u16) -> bool {
    (word >> bit) & 1 == 1
}

/// Which of the two layouts a trigger-info word holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerKind {
    /// Event accept/reject info (discriminant set).
    Event,
    /// Transition info (discriminant clear).
    Transition,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::Event => f.write_str("event"),
            TriggerKind::Transition => f.write_str("transition"),
        }
    }
}

/// Raw 16-bit trigger-info word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TriggerInfo(u16);

impl TriggerInfo {
    /// Create from the raw word.
    pub const fn from_u16(word: u16) -> Self {
        Self(word)
    }

    /// Get the raw word.
    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// Check if the discriminant marks this as an event.
    pub const fn is_event(self) -> bool {
        self.0 & DISCRIMINANT != 0
    }

    /// Check if the discriminant marks this as a transition.
    pub const fn is_transition(self) -> bool {
        !self.is_event()
    }

    /// The layout selected by the discriminant.
    pub const fn kind(self) -> TriggerKind {
        if self.is_event() {
            TriggerKind::Event
        } else {
            TriggerKind::Transition
        }
    }

    /// Decode the event layout.
    ///
    /// Returns [`Error::TriggerKindMismatch`] if the discriminant marks this
    /// word as a transition. Use [`EventInfo::from_word`] to decode the bits
    /// regardless of the discriminant.
    pub fn as_event_info(self) -> Result<EventInfo> {
        self.expect_kind(TriggerKind::Event)?;
        Ok(EventInfo::from_word(self.0))
    }

    /// Decode the transition layout.
    ///
    /// Returns [`Error::TriggerKindMismatch`] if the discriminant marks this
    /// word as an event.
    pub fn as_transition_info(self) -> Result<TransitionInfo> {
        self.expect_kind(TriggerKind::Transition)?;
        Ok(TransitionInfo::from_word(self.0))
    }

    /// Decode whichever layout the discriminant selects.
    pub fn decode(self) -> TriggerInfoKind {
        match self.kind() {
            TriggerKind::Event => TriggerInfoKind::Event(EventInfo::from_word(self.0)),
            TriggerKind::Transition => {
                TriggerInfoKind::Transition(TransitionInfo::from_word(self.0))
            }
        }
    }

    fn expect_kind(self, expected: TriggerKind) -> Result<()> {
        let actual = self.kind();
        if actual != expected {
            return Err(Error::TriggerKindMismatch { expected, actual });
        }
        Ok(())
    }
}

impl From<u16> for TriggerInfo {
    fn from(word: u16) -> Self {
        Self(word)
    }
}

impl From<TriggerInfo> for u16 {
    fn from(info: TriggerInfo) -> Self {
        info.0
    }
}

impl From<EventInfo> for TriggerInfo {
    fn from(info: EventInfo) -> Self {
        Self(info.to_word())
    }
}

impl From<TransitionInfo> for TriggerInfo {
    fn from(info: TransitionInfo) -> Self {
        Self(info.to_word())
    }
}

impl fmt::Display for TriggerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            TriggerInfoKind::Event(info) => fmt::Display::fmt(&info, f),
            TriggerInfoKind::Transition(info) => fmt::Display::fmt(&info, f),
        }
    }
}

/// A trigger-info word decoded under the layout its discriminant selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerInfoKind {
    /// Event accept/reject info.
    Event(EventInfo),
    /// Transition info.
    Transition(TransitionInfo),
}

/// Event accept/reject info.
///
/// Tags always fit in 5 bits: a value is either built with
/// [`EventInfo::new`] or decoded from a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawEventInfo"))]
pub struct EventInfo {
    l0_accept: bool,
    l0_tag: u8,
    l0_reject: bool,
    l1_expect: bool,
    l1_accept: bool,
    l1_tag: u8,
}

impl EventInfo {
    /// Create event info with the given tags and all flags clear.
    ///
    /// Returns [`Error::FieldOverflow`] if a tag does not fit in 5 bits.
    pub fn new(l0_tag: u8, l1_tag: u8) -> Result<Self> {
        validate_field("l0Tag", l0_tag as u64, MAX_TAG as u64)?;
        validate_field("l1Tag", l1_tag as u64, MAX_TAG as u64)?;
        Ok(Self {
            l0_tag,
            l1_tag,
            ..Self::default()
        })
    }

    /// Decode the event layout from a raw word.
    ///
    /// The discriminant is not consulted: the bits are read mechanically.
    pub fn from_word(word: u16) -> Self {
        Self {
            l0_accept: flag(word, L0_ACCEPT_BIT),
            l0_tag: field(word, L0_TAG_SHIFT, MAX_TAG),
            l0_reject: flag(word, L0_REJECT_BIT),
            l1_expect: flag(word, L1_EXPECT_BIT),
            l1_accept: flag(word, L1_ACCEPT_BIT),
            l1_tag: field(word, L1_TAG_SHIFT, MAX_TAG),
        }
    }

    /// Encode to a raw word with the discriminant set.
    pub fn to_word(&self) -> u16 {
        DISCRIMINANT
            | (self.l0_accept as u16) << L0_ACCEPT_BIT
            | (self.l0_tag as u16) << L0_TAG_SHIFT
            | (self.l0_reject as u16) << L0_REJECT_BIT
            | (self.l1_expect as u16) << L1_EXPECT_BIT
            | (self.l1_accept as u16) << L1_ACCEPT_BIT
            | (self.l1_tag as u16) << L1_TAG_SHIFT
    }

    /// L0 trigger accepted.
    pub fn l0_accept(&self) -> bool {
        self.l0_accept
    }

    /// L0 tag (5 bits).
    pub fn l0_tag(&self) -> u8 {
        self.l0_tag
    }

    /// L0 trigger rejected.
    pub fn l0_reject(&self) -> bool {
        self.l0_reject
    }

    /// An L1 decision is expected for this event.
    pub fn l1_expect(&self) -> bool {
        self.l1_expect
    }

    /// L1 decision accepted.
    pub fn l1_accept(&self) -> bool {
        self.l1_accept
    }

    /// L1 tag (5 bits).
    pub fn l1_tag(&self) -> u8 {
        self.l1_tag
    }

    /// Set the L0 accept flag.
    pub fn with_l0_accept(mut self, accept: bool) -> Self {
        self.l0_accept = accept;
        self
    }

    /// Set the L0 reject flag.
    pub fn with_l0_reject(mut self, reject: bool) -> Self {
        self.l0_reject = reject;
        self
    }

    /// Set the L1 expect flag.
    pub fn with_l1_expect(mut self, expect: bool) -> Self {
        self.l1_expect = expect;
        self
    }

    /// Set the L1 accept flag.
    pub fn with_l1_accept(mut self, accept: bool) -> Self {
        self.l1_accept = accept;
        self
    }

    /// Field name/value pairs in bit order.
    pub fn fields(&self) -> [(&'static str, u64); 6] {
        [
            ("l0Accept", self.l0_accept as u64),
            ("l0Tag", self.l0_tag as u64),
            ("l0Reject", self.l0_reject as u64),
            ("l1Expect", self.l1_expect as u64),
            ("l1Accept", self.l1_accept as u64),
            ("l1Tag", self.l1_tag as u64),
        ]
    }
}

impl fmt::Display for EventInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(f, &self.fields())
    }
}

/// Transition info.
///
/// The tag fits in 5 bits and the header in 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTransitionInfo"))]
pub struct TransitionInfo {
    l0_tag: u8,
    header: u8,
}

impl TransitionInfo {
    /// Create transition info.
    ///
    /// Returns [`Error::FieldOverflow`] if the tag does not fit in 5 bits or
    /// the header does not fit in 7 bits.
    pub fn new(l0_tag: u8, header: u8) -> Result<Self> {
        validate_field("l0Tag", l0_tag as u64, MAX_TAG as u64)?;
        validate_field("header", header as u64, MAX_TRANSITION_HEADER as u64)?;
        Ok(Self { l0_tag, header })
    }

    /// Decode the transition layout from a raw word.
    ///
    /// The discriminant is not consulted: the bits are read mechanically.
    pub fn from_word(word: u16) -> Self {
        Self {
            l0_tag: field(word, L0_TAG_SHIFT, MAX_TAG),
            header: field(word, TRANSITION_HEADER_SHIFT, MAX_TRANSITION_HEADER),
        }
    }

    /// Encode to a raw word with the discriminant clear.
    pub fn to_word(&self) -> u16 {
        (self.l0_tag as u16) << L0_TAG_SHIFT | (self.header as u16) << TRANSITION_HEADER_SHIFT
    }

    /// L0 tag (5 bits).
    pub fn l0_tag(&self) -> u8 {
        self.l0_tag
    }

    /// Transition header (7 bits).
    pub fn header(&self) -> u8 {
        self.header
    }

    /// Field name/value pairs in bit order.
    pub fn fields(&self) -> [(&'static str, u64); 2] {
        [
            ("l0Tag", self.l0_tag as u64),
            ("header", self.header as u64),
        ]
    }
}

impl fmt::Display for TransitionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(f, &self.fields())
    }
}

// Deserialized views go through the width-checking constructors.

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawEventInfo {
    l0_accept: bool,
    l0_tag: u8,
    l0_reject: bool,
    l1_expect: bool,
    l1_accept: bool,
    l1_tag: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawEventInfo> for EventInfo {
    type Error = Error;

    fn try_from(raw: RawEventInfo) -> Result<Self> {
        Ok(Self::new(raw.l0_tag, raw.l1_tag)?
            .with_l0_accept(raw.l0_accept)
            .with_l0_reject(raw.l0_reject)
            .with_l1_expect(raw.l1_expect)
            .with_l1_accept(raw.l1_accept))
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTransitionInfo {
    l0_tag: u8,
    header: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTransitionInfo> for TransitionInfo {
    type Error = Error;

    fn try_from(raw: RawTransitionInfo) -> Result<Self> {
        Self::new(raw.l0_tag, raw.header)
    }
}

/// Write `name - value` lines, values in lower-case hex.
pub(crate) fn write_fields(
    f: &mut fmt::Formatter<'_>,
    fields: &[(&'static str, u64)],
) -> fmt::Result {
    for (i, (name, value)) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str("\n")?;
        }
        write!(f, "{name} - {value:x}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminant() {
        assert!(TriggerInfo::from_u16(0x8000).is_event());
        assert!(!TriggerInfo::from_u16(0x0000).is_event());
        assert!(TriggerInfo::from_u16(0x7FFF).is_transition());
        assert_eq!(TriggerInfo::from_u16(0xFFFF).kind(), TriggerKind::Event);
        assert_eq!(TriggerInfo::from_u16(0x0001).kind(), TriggerKind::Transition);
    }

    #[test]
    fn test_event_info_example() {
        // 1000 0000 0010 0001: discriminant, bit 5 and bit 0
        let info = TriggerInfo::from_u16(0x8021).as_event_info().unwrap();
        assert_eq!(info, EventInfo::new(0x10, 0).unwrap().with_l0_accept(true));
    }

    #[test]
    fn test_event_info_single_bits() {
        assert!(EventInfo::from_word(0x0080).l0_reject());
        assert!(EventInfo::from_word(0x0100).l1_expect());
        assert!(EventInfo::from_word(0x0200).l1_accept());
        assert_eq!(EventInfo::from_word(0x0002).l0_tag(), 0x01);
        assert_eq!(EventInfo::from_word(0x0400).l1_tag(), 0x01);
        assert_eq!(EventInfo::from_word(0x7C00).l1_tag(), 0x1F);
        assert_eq!(EventInfo::from_word(0x003E).l0_tag(), 0x1F);

        // Bit 6 is unused
        assert_eq!(EventInfo::from_word(0x0040), EventInfo::default());
    }

    #[test]
    fn test_transition_info_fields() {
        let info = TriggerInfo::from_u16(0x7F3E).as_transition_info().unwrap();
        assert_eq!(info.l0_tag(), 0x1F);
        assert_eq!(info.header(), 0x7F);

        // Bits 0, 6 and 7 are unused
        assert_eq!(TransitionInfo::from_word(0x00C1), TransitionInfo::default());

        let info = TransitionInfo::from_word(0x0A04);
        assert_eq!(info.l0_tag(), 0x02);
        assert_eq!(info.header(), 0x0A);
    }

    #[test]
    fn test_wrong_accessor_is_contract_violation() {
        let event = TriggerInfo::from_u16(0x8000);
        match event.as_transition_info() {
            Err(Error::TriggerKindMismatch { expected, actual }) => {
                assert_eq!(expected, TriggerKind::Transition);
                assert_eq!(actual, TriggerKind::Event);
            }
            other => panic!("unexpected {other:?}"),
        }

        let transition = TriggerInfo::from_u16(0x0000);
        assert!(matches!(
            transition.as_event_info(),
            Err(Error::TriggerKindMismatch {
                expected: TriggerKind::Event,
                actual: TriggerKind::Transition,
            })
        ));
    }

    #[test]
    fn test_decode_follows_discriminant() {
        let word = 0x0A04;
        assert_eq!(
            TriggerInfo::from_u16(word).decode(),
            TriggerInfoKind::Transition(TransitionInfo::from_word(word))
        );
        let word = word | DISCRIMINANT;
        let decoded = TriggerInfo::from_u16(word).decode();
        assert_eq!(decoded, TriggerInfoKind::Event(EventInfo::from_word(word)));
        assert_eq!(decoded.kind(), TriggerKind::Event);
        assert_eq!(decoded.l0_tag(), 0x02);
    }

    #[test]
    fn test_event_word_encoding() {
        let info = EventInfo::new(0x10, 0x05)
            .unwrap()
            .with_l0_accept(true)
            .with_l1_expect(true)
            .with_l1_accept(true);
        let word = info.to_word();
        assert_eq!(word, 0x8000 | 0x0001 | 0x0020 | 0x0100 | 0x0200 | (0x05 << 10));
        assert_eq!(TriggerInfo::from(info).as_event_info().unwrap(), info);
    }

    #[test]
    fn test_transition_word_encoding() {
        let info = TransitionInfo::new(0x03, 0x42).unwrap();
        let word = info.to_word();
        assert_eq!(word & DISCRIMINANT, 0);
        assert_eq!(word, (0x03 << 1) | (0x42 << 8));
        assert_eq!(TriggerInfo::from(info).as_transition_info().unwrap(), info);
    }

    #[test]
    fn test_info_width_checks() {
        assert!(EventInfo::new(0x20, 0).is_err());
        assert!(EventInfo::new(0, 0x20).is_err());
        assert!(TransitionInfo::new(0x20, 0).is_err());
        assert!(matches!(
            TransitionInfo::new(0, 0x80),
            Err(Error::FieldOverflow {
                field: "header",
                value: 0x80,
                max: 0x7F,
            })
        ));
    }

    #[test]
    fn test_max_width_values_encode_exactly() {
        let info = EventInfo::new(MAX_TAG, MAX_TAG).unwrap();
        assert_eq!(info.to_word(), DISCRIMINANT | 0x1F << 1 | 0x1F << 10);
        assert_eq!(EventInfo::from_word(info.to_word()), info);

        let info = TransitionInfo::new(MAX_TAG, MAX_TRANSITION_HEADER).unwrap();
        assert_eq!(info.to_word(), 0x7F3E);
        assert_eq!(TransitionInfo::from_word(info.to_word()), info);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_deserialize_checks_widths() {
        let json = r#"{"l0_accept":true,"l0_tag":31,"l0_reject":false,"l1_expect":false,"l1_accept":false,"l1_tag":0}"#;
        let info: EventInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info, EventInfo::new(31, 0).unwrap().with_l0_accept(true));

        let json = json.replace("\"l0_tag\":31", "\"l0_tag\":63");
        assert!(serde_json::from_str::<EventInfo>(&json).is_err());
        assert!(serde_json::from_str::<TransitionInfo>(r#"{"l0_tag":1,"header":255}"#).is_err());
    }

    #[test]
    fn test_all_words_survive_view_roundtrip() {
        // Only the declared bits survive: unused bits are dropped.
        const EVENT_BITS: u16 = 0xFFBF;
        const TRANSITION_BITS: u16 = 0x7F3E;
        for word in u16::MIN..=u16::MAX {
            let info = TriggerInfo::from_u16(word);
            let reencoded = match info.decode() {
                TriggerInfoKind::Event(e) => e.to_word(),
                TriggerInfoKind::Transition(t) => t.to_word(),
            };
            let kept = if info.is_event() {
                EVENT_BITS
            } else {
                TRANSITION_BITS
            };
            assert_eq!(reencoded, word & kept, "word {word:#06x}");
        }
    }
}
