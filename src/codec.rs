//! Async framing adapter for the wire protocol.
//!
//! Wraps the pure [`framing`](crate::framing) operations in a
//! `tokio_util` [`Decoder`]/[`Encoder`] pair so a transport can drive them
//! from a [`Framed`] stream. The decoder enforces a configurable maximum
//! frame length (rejecting an oversized declared SIZE before buffering the
//! body) and distinguishes a clean close at a frame boundary from a
//! premature EOF mid-header or mid-frame.
//!
//! Because a [`Frame`](crate::frame::Frame) borrows from the receive buffer,
//! the decoder produces the owned counterpart [`FrameBuf`], whose `extended`
//! and `payload` are zero-copy [`Bytes`] slices of the buffered input.

use std::io;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{Decoder, Encoder, Framed};

use crate::{
    byte_order::read_network_u32,
    error::{EofError, FramingError},
    frame::{Frame, HEADER_SIZE},
    framing::{read_frame, write_frame},
};

/// Minimum frame length in bytes (512).
///
/// Frame lengths passed to codec constructors are clamped to at least this
/// value, the smallest maximum frame size the protocol family permits a peer
/// to negotiate.
pub const MIN_FRAME_LENGTH: usize = 512;

/// Maximum frame length in bytes (16 MiB).
///
/// Frame lengths passed to codec constructors are clamped to at most this
/// value to prevent unbounded memory allocation from an attacker-chosen
/// SIZE field.
pub const MAX_FRAME_LENGTH: usize = 16 * 1024 * 1024;

pub(crate) fn clamp_frame_length(value: usize) -> usize {
    value.clamp(MIN_FRAME_LENGTH, MAX_FRAME_LENGTH)
}

/// An owned frame whose content is shared, not copied.
///
/// Produced by [`AmqpFrameCodec`] when decoding; `extended` and `payload`
/// are slices of the receive buffer refcounted via [`Bytes`], so a decoded
/// frame may outlive the codec and cross task boundaries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrameBuf {
    /// Frame type identifier, opaque at this layer.
    pub frame_type: u8,
    /// Channel identifier, opaque at this layer.
    pub channel: u16,
    /// Extended header bytes as they appeared on the wire (word-padded).
    pub extended: Bytes,
    /// Opaque frame body.
    pub payload: Bytes,
}

impl FrameBuf {
    /// Construct an owned frame from its parts.
    #[must_use]
    pub const fn new(frame_type: u8, channel: u16, extended: Bytes, payload: Bytes) -> Self {
        Self {
            frame_type,
            channel,
            extended,
            payload,
        }
    }

    /// Copy a borrowed [`Frame`] into an owned one.
    #[must_use]
    pub fn from_frame(frame: &Frame<'_>) -> Self {
        Self {
            frame_type: frame.frame_type,
            channel: frame.channel,
            extended: Bytes::copy_from_slice(frame.extended),
            payload: Bytes::copy_from_slice(frame.payload),
        }
    }

    /// View this frame as a borrowed [`Frame`] for serialisation.
    #[must_use]
    pub fn as_frame(&self) -> Frame<'_> {
        Frame {
            frame_type: self.frame_type,
            channel: self.channel,
            extended: &self.extended,
            payload: &self.payload,
        }
    }

    /// Total number of bytes this frame occupies on the wire.
    #[must_use]
    pub fn encoded_len(&self) -> usize { self.as_frame().encoded_len() }
}

/// Frame codec enforcing a maximum frame length.
///
/// # Examples
///
/// ```
/// use amqframe::codec::{AmqpFrameCodec, MIN_FRAME_LENGTH};
///
/// let codec = AmqpFrameCodec::new(64);
/// assert_eq!(codec.max_frame_length(), MIN_FRAME_LENGTH);
/// ```
#[derive(Clone, Debug)]
pub struct AmqpFrameCodec {
    max_frame_length: usize,
}

impl AmqpFrameCodec {
    /// Construct a codec with a maximum frame length, clamped to
    /// [`MIN_FRAME_LENGTH`]..=[`MAX_FRAME_LENGTH`].
    #[must_use]
    pub fn new(max_frame_length: usize) -> Self {
        Self {
            max_frame_length: clamp_frame_length(max_frame_length),
        }
    }

    /// Return the maximum frame length accepted by this codec.
    #[must_use]
    pub fn max_frame_length(&self) -> usize { self.max_frame_length }

    /// Wrap an I/O stream in a [`Framed`] transport using this codec.
    pub fn framed<T>(self, io: T) -> Framed<T, Self>
    where
        T: AsyncRead + AsyncWrite,
    {
        Framed::new(io, self)
    }
}

impl Default for AmqpFrameCodec {
    fn default() -> Self {
        Self {
            max_frame_length: MAX_FRAME_LENGTH,
        }
    }
}

impl Decoder for AmqpFrameCodec {
    type Item = FrameBuf;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Reject an oversized declared SIZE as soon as the header arrives,
        // before buffering a body that would never be accepted.
        if src.len() >= HEADER_SIZE {
            let declared = read_network_u32([src[0], src[1], src[2], src[3]]) as usize;
            if declared > self.max_frame_length {
                tracing::debug!(
                    size = declared,
                    max = self.max_frame_length,
                    "rejecting oversized frame"
                );
                return Err(FramingError::OversizedFrame {
                    size: declared,
                    max: self.max_frame_length,
                }
                .into());
            }
        }

        let (frame_type, channel, body_offset, consumed) =
            match read_frame(src.as_ref()).map_err(FramingError::from)? {
                None => return Ok(None),
                Some((frame, consumed)) => (
                    frame.frame_type,
                    frame.channel,
                    HEADER_SIZE + frame.extended.len(),
                    consumed,
                ),
            };

        let body = src.split_to(consumed).freeze();
        tracing::trace!(
            frame_type,
            channel,
            ex_size = body_offset - HEADER_SIZE,
            size = consumed - body_offset,
            "decoded frame"
        );
        Ok(Some(FrameBuf {
            frame_type,
            channel,
            extended: body.slice(HEADER_SIZE..body_offset),
            payload: body.slice(body_offset..consumed),
        }))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Clean close: no data remaining at frame boundary.
        if src.is_empty() {
            return Ok(None);
        }
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None => Err(build_eof_error(src)),
        }
    }
}

impl Encoder<FrameBuf> for AmqpFrameCodec {
    type Error = io::Error;

    fn encode(&mut self, item: FrameBuf, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let frame = item.as_frame();
        let total_size = frame.encoded_len();
        if total_size > self.max_frame_length {
            return Err(FramingError::OversizedFrame {
                size: total_size,
                max: self.max_frame_length,
            }
            .into());
        }
        let start = dst.len();
        dst.resize(start + total_size, 0);
        if let Err(err) = write_frame(&mut dst[start..], &frame) {
            dst.truncate(start);
            return Err(err.into());
        }
        Ok(())
    }
}

/// Build the appropriate EOF error based on remaining buffer state.
///
/// Determines whether the connection closed mid-header or mid-frame:
///
/// - [`EofError::MidHeader`]: fewer than 8 bytes received; the connection closed before the fixed
///   header could be read.
/// - [`EofError::MidFrame`]: header complete but body truncated; the SIZE field was read but the
///   connection closed before the declared length arrived.
fn build_eof_error(src: &BytesMut) -> io::Error {
    let bytes_received = src.len();
    if bytes_received < HEADER_SIZE {
        return FramingError::Eof(EofError::MidHeader {
            bytes_received,
            header_size: HEADER_SIZE,
        })
        .into();
    }
    let expected = read_network_u32([src[0], src[1], src[2], src[3]]) as usize;
    FramingError::Eof(EofError::MidFrame {
        bytes_received,
        expected,
    })
    .into()
}
