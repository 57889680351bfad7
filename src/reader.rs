//! Splitting buffers and streams into event header frames.
//!
//! The transport layer hands over either a buffer of back-to-back frames or a
//! byte stream. [`FrameIter`] walks a buffer without allocating;
//! [`FrameReader`] pulls frames from any [`std::io::Read`] (requires `std`).
//!
//! # Example
//!
//! ```
//! use l2si_header::{EventHeader, FrameLayout, frames};
//!
//! let mut buffer = Vec::new();
//! for count in 0..3 {
//!     let header = EventHeader::builder().count(count).build()?;
//!     buffer.extend_from_slice(&header.to_bytes());
//! }
//!
//! let counts = frames(&buffer, FrameLayout::Header)
//!     .map(|h| h.map(|h| h.count()))
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(counts, [0, 1, 2]);
//! # Ok::<(), l2si_header::Error>(())
//! ```

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::header::EventHeader;
use crate::layout::FrameLayout;
use crate::{Error, Result};

#[cfg(feature = "tracing")]
fn trace_header(header: &EventHeader) {
    tracing::trace!(
        pulse_id = header.pulse_id(),
        count = header.count(),
        kind = %header.kind(),
        "decoded frame"
    );
}

/// Iterator over the frames of a buffer.
///
/// Yields one decoded header per frame. A trailing partial frame yields a
/// single [`Error::FrameSize`] and ends the iteration.
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    bytes: &'a [u8],
    layout: FrameLayout,
    offset: usize,
    done: bool,
}

/// Iterate over the frames of `bytes`.
pub fn frames(bytes: &[u8], layout: FrameLayout) -> FrameIter<'_> {
    FrameIter::new(bytes, layout)
}

/// Decode every frame of `bytes`, failing on the first error.
#[cfg(feature = "alloc")]
pub fn decode_all(bytes: &[u8], layout: FrameLayout) -> Result<Vec<EventHeader>> {
    frames(bytes, layout).collect()
}

impl<'a> FrameIter<'a> {
    /// Create an iterator over `bytes`.
    pub fn new(bytes: &'a [u8], layout: FrameLayout) -> Self {
        Self {
            bytes,
            layout,
            offset: 0,
            done: false,
        }
    }

    /// Byte offset of the next frame.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    pub fn remainder(&self) -> &'a [u8] {
        &self.bytes[self.offset..]
    }
}

impl Iterator for FrameIter<'_> {
    type Item = Result<EventHeader>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let size = self.layout.size();
        let remaining = self.remainder();
        if remaining.is_empty() {
            self.done = true;
            return None;
        }
        if remaining.len() < size {
            self.done = true;
            #[cfg(feature = "tracing")]
            tracing::warn!(
                offset = self.offset,
                remaining = remaining.len(),
                expected = size,
                "trailing partial frame"
            );
            return Some(Err(Error::FrameSize {
                actual: remaining.len(),
                expected: size,
            }));
        }

        let frame = &remaining[..size];
        self.offset += size;
        let header = EventHeader::decode_with(frame, self.layout);

        #[cfg(feature = "tracing")]
        {
            if let Ok(header) = &header {
                trace_header(header);
            }
        }

        Some(header)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.bytes.len() - self.offset;
        let size = self.layout.size();
        let frames = remaining / size;
        let partial = usize::from(remaining % size != 0);
        (frames + partial, Some(frames + partial))
    }
}

impl core::iter::FusedIterator for FrameIter<'_> {}

#[cfg(feature = "std")]
pub use self::stream::FrameReader;

#[cfg(feature = "std")]
mod stream {
    use std::io::{ErrorKind, Read};

    use super::*;
    use crate::layout::PAYLOAD_SIZE;

    /// Fill `buf` from `reader`, retrying interrupted reads.
    ///
    /// Returns the number of bytes read, short of `buf.len()` only at end of
    /// stream.
    fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(filled)
    }

    impl EventHeader {
        /// Read exactly one frame of the given layout from `reader`.
        ///
        /// A stream that ends before the frame is complete yields
        /// [`Error::FrameSize`] with the number of bytes that did arrive, the
        /// same as [`FrameReader`]. Other I/O failures surface as
        /// [`Error::IOError`].
        pub fn read_from<R: Read>(reader: &mut R, layout: FrameLayout) -> Result<Self> {
            let mut buf = [0u8; PAYLOAD_SIZE];
            let frame = &mut buf[..layout.size()];
            let filled = fill(reader, frame)?;
            EventHeader::decode_with(&frame[..filled], layout)
        }
    }

    /// Reads complete frames from any `Read` stream.
    ///
    /// Handles partial reads internally. End of stream on a frame boundary
    /// ends the iteration; end of stream inside a frame yields
    /// [`Error::FrameSize`] with the number of bytes that did arrive.
    pub struct FrameReader<R> {
        inner: R,
        layout: FrameLayout,
        frames_read: u64,
        done: bool,
    }

    impl<R: Read> FrameReader<R> {
        /// Create a frame reader over `inner`.
        pub fn new(inner: R, layout: FrameLayout) -> Self {
            Self {
                inner,
                layout,
                frames_read: 0,
                done: false,
            }
        }

        /// Read the next frame (blocking).
        ///
        /// Returns `Ok(None)` at end of stream.
        pub fn read_frame(&mut self) -> Result<Option<EventHeader>> {
            if self.done {
                return Ok(None);
            }

            let size = self.layout.size();
            let mut buf = [0u8; PAYLOAD_SIZE];
            let filled = match fill(&mut self.inner, &mut buf[..size]) {
                Ok(n) => n,
                Err(err) => {
                    self.done = true;
                    return Err(Error::IOError(err));
                }
            };

            if filled == 0 {
                self.done = true;
                return Ok(None);
            }
            if filled < size {
                self.done = true;
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    frames_read = self.frames_read,
                    received = filled,
                    expected = size,
                    "stream ended inside a frame"
                );
                return Err(Error::FrameSize {
                    actual: filled,
                    expected: size,
                });
            }

            let header = EventHeader::decode_with(&buf[..size], self.layout)?;
            self.frames_read += 1;

            #[cfg(feature = "tracing")]
            trace_header(&header);

            Ok(Some(header))
        }

        /// Number of frames decoded so far.
        pub fn frames_read(&self) -> u64 {
            self.frames_read
        }

        /// Borrow the underlying stream.
        pub fn get_ref(&self) -> &R {
            &self.inner
        }

        /// Mutably borrow the underlying stream.
        pub fn get_mut(&mut self) -> &mut R {
            &mut self.inner
        }

        /// Consume the reader and return the inner stream.
        pub fn into_inner(self) -> R {
            self.inner
        }
    }

    impl<R: Read> Iterator for FrameReader<R> {
        type Item = Result<EventHeader>;

        fn next(&mut self) -> Option<Self::Item> {
            self.read_frame().transpose()
        }
    }
}
