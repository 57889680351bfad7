#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

//! # l2si-header
//!
//! Decoder for the Event Header / Transition frame emitted by the L2SI timing
//! system (XPM and trigger event buffer firmware).
//!
//! Every event and every transition the timing system delivers to a readout
//! node starts with a fixed 24-byte little-endian header carrying the pulse
//! id, the timestamp, the partitions that take part, a 16-bit trigger-info
//! word and a running counter. The trigger-info word holds one of two
//! bit-field layouts (event accept/reject info or transition info) selected by
//! its top bit.
//!
//! The layout is position-dependent and has no delimiters or checksums: a
//! wrong offset or width silently produces wrong values. This crate decodes it
//! bit-exactly and rejects buffers of the wrong size instead of guessing.
//!
//! ## Features
//!
//! - **Decoding**: [`EventHeader::decode`] for the 24-byte header,
//!   [`EventHeader::decode_payload`] for the 32-byte transport payload
//! - **Trigger info**: typed [`EventInfo`](trigger::EventInfo) and
//!   [`TransitionInfo`](trigger::TransitionInfo) views over the raw word
//! - **Encoding**: [`EventHeader::builder`] and [`EventHeader::to_bytes`] for
//!   producing frames, e.g. for test data
//! - **Streams**: [`frames`] over a buffer of back-to-back frames and
//!   [`FrameReader`] over any `std::io::Read`
//!
//! ## Quick Start
//!
//! ```
//! use l2si_header::{EventHeader, Result};
//! use l2si_header::trigger::TriggerInfoKind;
//!
//! fn main() -> Result<()> {
//!     let mut frame = [0u8; 24];
//!     frame[0..8].copy_from_slice(&0x0000_0000_0012_3456u64.to_le_bytes());
//!     frame[16] = 0b0000_0011;
//!     frame[18..20].copy_from_slice(&0x8021u16.to_le_bytes());
//!
//!     let header = EventHeader::decode(&frame)?;
//!     println!("{header}");
//!
//!     match header.trigger_info().decode() {
//!         TriggerInfoKind::Event(info) => assert_eq!(info.l0_tag(), 0x10),
//!         TriggerInfoKind::Transition(info) => println!("transition {}", info.header()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`header`] | [`EventHeader`] decoding, encoding and field listing |
//! | [`trigger`] | Trigger-info word and its two layouts |
//! | [`partition`] | Partition membership mask |
//! | [`layout`] | Frame sizes, offsets and masks |
//! | [`reader`] | Buffer and stream framing |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Cargo Features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | yes | `std::io` support, implies `alloc`, `serde` and `serde_json` |
//! | `alloc` | via `std` | [`decode_all`] |
//! | `serde` | via `std` | `Serialize`/`Deserialize` derives |
//! | `serde_json` | via `std` | [`EventHeader::to_json`] |
//! | `tracing` | no | frame-level diagnostics through `tracing` |
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. A buffer of the wrong size is
//! a format error ([`Error::FrameSize`]); asking for the trigger-info layout
//! the discriminant does not select is a contract violation
//! ([`Error::TriggerKindMismatch`]).

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod header;
pub mod layout;
pub mod partition;
pub mod reader;
pub mod trigger;

// Re-export commonly used types at the crate root
pub use error::{Error, Result};
pub use header::{EventHeader, EventHeaderBuilder};
pub use layout::{FrameLayout, HEADER_SIZE, PAYLOAD_SIZE};
pub use partition::PartitionMask;
#[cfg(feature = "alloc")]
pub use reader::decode_all;
#[cfg(feature = "std")]
pub use reader::FrameReader;
pub use reader::{FrameIter, frames};
pub use trigger::{TriggerInfo, TriggerKind};
