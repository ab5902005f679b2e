//! Error types for the framing layer.
//!
//! The taxonomy separates wire-level framing corruption (fatal for the
//! connection), local buffer-capacity failures (recoverable by the caller),
//! and EOF conditions observed by the async codec:
//!
//! - [`FrameFormatError`]: the frame header declares an impossible layout. Byte alignment cannot be
//!   recovered afterwards, so the transport must be torn down.
//! - [`BufferTooSmallError`]: the writer's destination cannot hold the serialised frame. The caller
//!   grows the buffer and retries; no partial output was produced.
//! - [`EofError`]: the stream ended, either cleanly at a frame boundary or mid-frame.
//! - [`FramingError`]: top-level enum wrapping all categories plus I/O errors.

use std::io;

use thiserror::Error;

/// Malformed frame header encountered while parsing.
///
/// Any of these variants means the peer's framing is corrupt: the declared
/// sizes no longer describe a coherent byte layout, and no subsequent frame
/// boundary can be trusted.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum FrameFormatError {
    /// Declared SIZE is smaller than the fixed 8-byte header.
    #[error("declared frame size {size} below minimum header size 8")]
    UndersizedFrame {
        /// SIZE value read from the wire.
        size: u32,
    },

    /// DOFF places the payload inside the fixed header.
    #[error("data offset {doff} words below minimum of 2")]
    DataOffsetTooSmall {
        /// DOFF value read from the wire.
        doff: u8,
    },

    /// DOFF places the payload beyond the end of the frame.
    #[error("data offset {body_offset} exceeds frame size {total_size}")]
    DataOffsetPastEnd {
        /// Payload offset in bytes (`doff * 4`).
        body_offset: usize,
        /// Declared total frame length.
        total_size: usize,
    },

    /// Extended header too long to express in the one-byte DOFF field.
    #[error("extended header length {len} exceeds DOFF addressing range")]
    ExtendedHeaderTooLong {
        /// Extended header length offered by the caller.
        len: usize,
    },
}

/// Destination buffer cannot hold the serialised frame.
///
/// Recoverable locally: the frame was not partially written, so the caller
/// may allocate `required` bytes and retry.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("output buffer too small: need {required} bytes, have {capacity}")]
pub struct BufferTooSmallError {
    /// Bytes the serialised frame occupies.
    pub required: usize,
    /// Capacity of the buffer that was offered.
    pub capacity: usize,
}

/// EOF handling variants distinguishing normal vs. premature closure.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum EofError {
    /// EOF received mid-frame: the header was read but the body never
    /// completed. Some data was lost.
    #[error("premature EOF: {bytes_received} bytes of {expected} byte frame received")]
    MidFrame {
        /// Bytes received before EOF.
        bytes_received: usize,
        /// Declared total frame size.
        expected: usize,
    },

    /// EOF received before the fixed header completed.
    #[error("premature EOF during header: {bytes_received} of {header_size} header bytes")]
    MidHeader {
        /// Header bytes received before EOF.
        bytes_received: usize,
        /// Expected header size.
        header_size: usize,
    },
}

/// Top-level framing error taxonomy.
///
/// # Examples
///
/// ```
/// use amqframe::error::{FrameFormatError, FramingError};
///
/// let err = FramingError::Format(FrameFormatError::DataOffsetTooSmall { doff: 1 });
/// assert!(err.should_disconnect());
///
/// let err = FramingError::from(amqframe::error::BufferTooSmallError {
///     required: 16,
///     capacity: 8,
/// });
/// assert!(!err.should_disconnect());
/// ```
#[derive(Debug, Error)]
pub enum FramingError {
    /// Frame header corruption (fatal for the connection).
    #[error("frame format error: {0}")]
    Format(#[from] FrameFormatError),

    /// Declared frame size exceeds the codec's configured maximum.
    #[error("frame exceeds max length: {size} > {max}")]
    OversizedFrame {
        /// Declared frame size.
        size: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Writer destination buffer too small (locally recoverable).
    #[error("buffer error: {0}")]
    BufferTooSmall(#[from] BufferTooSmallError),

    /// End-of-stream handling.
    #[error("EOF: {0}")]
    Eof(#[from] EofError),

    /// Transport layer I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FramingError {
    /// Returns true if the connection should be terminated.
    ///
    /// Format corruption, oversized frames, premature EOF, and I/O failures
    /// all leave the byte stream in a state where no further frame boundary
    /// can be trusted. Only a writer-side capacity failure is recoverable in
    /// place.
    #[must_use]
    pub fn should_disconnect(&self) -> bool { !matches!(self, Self::BufferTooSmall(_)) }

    /// Returns the error category as a string for logging.
    ///
    /// One of: `"format"`, `"oversized"`, `"buffer"`, `"eof"`, or `"io"`.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Format(_) => "format",
            Self::OversizedFrame { .. } => "oversized",
            Self::BufferTooSmall(_) => "buffer",
            Self::Eof(_) => "eof",
            Self::Io(_) => "io",
        }
    }
}

impl From<FramingError> for io::Error {
    fn from(err: FramingError) -> Self {
        match err {
            FramingError::Io(e) => e,
            FramingError::Format(e) => io::Error::new(io::ErrorKind::InvalidData, e),
            FramingError::OversizedFrame { .. } => {
                io::Error::new(io::ErrorKind::InvalidData, err.to_string())
            }
            FramingError::BufferTooSmall(e) => io::Error::new(io::ErrorKind::InvalidInput, e),
            FramingError::Eof(e) => io::Error::new(io::ErrorKind::UnexpectedEof, e),
        }
    }
}
