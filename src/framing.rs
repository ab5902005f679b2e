//! Pure frame extraction and serialisation over byte slices.
//!
//! Both operations are synchronous, reentrant, and allocation-free:
//! [`read_frame`] borrows windows into the caller's receive buffer and
//! [`write_frame`] fills a caller-provided destination with no partial
//! output on failure. A transport accumulates bytes and calls `read_frame`
//! in a loop until it reports that more data is needed; malformed headers
//! are fatal because no later frame boundary can be recovered.

use crate::{
    byte_order::{read_network_u16, read_network_u32, write_network_u16, write_network_u32},
    error::{BufferTooSmallError, FrameFormatError, FramingError},
    frame::{Frame, HEADER_SIZE, MIN_DOFF},
};

/// Attempt to extract one complete frame from the front of `buf`.
///
/// Returns `Ok(None)` while `buf` does not yet hold a complete frame: either
/// fewer than 8 bytes are buffered, or the declared SIZE exceeds the bytes
/// available. The caller appends more data and retries; the call never reads
/// past `buf.len()` and is idempotent on an unmodified buffer.
///
/// On success the returned `usize` is the number of bytes consumed (the
/// frame's declared SIZE); the frame's `extended` and `payload` views borrow
/// from `buf` and remain valid only while `buf` is neither mutated nor
/// released.
///
/// # Errors
///
/// Returns a [`FrameFormatError`] when the header declares an impossible
/// layout (`SIZE < 8`, `DOFF < 2`, or a payload offset past the end of the
/// frame). This is fatal for the connection: byte alignment cannot be
/// recovered, so the transport must be torn down.
///
/// # Examples
///
/// ```
/// use amqframe::framing::read_frame;
///
/// // SIZE=8, DOFF=2, TYPE=0, CHANNEL=7: the minimal empty frame.
/// let wire = [0, 0, 0, 8, 2, 0, 0, 7];
/// let (frame, consumed) = read_frame(&wire).unwrap().unwrap();
/// assert_eq!(consumed, 8);
/// assert_eq!(frame.channel, 7);
/// assert!(frame.payload.is_empty());
///
/// // One byte short of a header: not an error, just incomplete.
/// assert!(read_frame(&wire[..7]).unwrap().is_none());
/// ```
pub fn read_frame(buf: &[u8]) -> Result<Option<(Frame<'_>, usize)>, FrameFormatError> {
    if buf.len() < HEADER_SIZE {
        return Ok(None);
    }
    let declared = read_network_u32([buf[0], buf[1], buf[2], buf[3]]);
    let total_size = declared as usize;
    if total_size < HEADER_SIZE {
        return Err(FrameFormatError::UndersizedFrame { size: declared });
    }
    if buf.len() < total_size {
        return Ok(None);
    }

    let doff = buf[4];
    let body_offset = usize::from(doff) * 4;
    if doff < MIN_DOFF {
        return Err(FrameFormatError::DataOffsetTooSmall { doff });
    }
    if body_offset > total_size {
        return Err(FrameFormatError::DataOffsetPastEnd {
            body_offset,
            total_size,
        });
    }

    let frame = Frame {
        frame_type: buf[5],
        channel: read_network_u16([buf[6], buf[7]]),
        extended: &buf[HEADER_SIZE..body_offset],
        payload: &buf[body_offset..total_size],
    };
    Ok(Some((frame, total_size)))
}

/// Serialise `frame` into the front of `out`, returning the bytes written.
///
/// The extended header is zero-padded to the next 4-byte boundary before
/// DOFF is computed, so callers may supply unaligned extension data. The
/// write is all-or-nothing: on any error `out` is untouched and the caller
/// may grow the buffer and retry.
///
/// # Errors
///
/// - [`FramingError::BufferTooSmall`] when `out` cannot hold the serialised frame.
/// - [`FramingError::Format`] with [`FrameFormatError::ExtendedHeaderTooLong`] when the extended
///   header cannot be addressed by the one-byte DOFF field (padded length above 1012 bytes).
/// - [`FramingError::OversizedFrame`] when the total length overflows the u32 SIZE field.
///
/// # Examples
///
/// ```
/// use amqframe::{frame::Frame, framing::write_frame};
///
/// let frame = Frame::new(0, 7, &[], &[]);
/// let mut out = [0u8; 16];
/// let written = write_frame(&mut out, &frame).unwrap();
/// assert_eq!(written, 8);
/// assert_eq!(&out[..8], &[0, 0, 0, 8, 2, 0, 0, 7]);
/// ```
pub fn write_frame(out: &mut [u8], frame: &Frame<'_>) -> Result<usize, FramingError> {
    let ex_size = frame.ex_size();
    let body_offset = HEADER_SIZE + ex_size;
    if body_offset > usize::from(u8::MAX) * 4 {
        return Err(FrameFormatError::ExtendedHeaderTooLong {
            len: frame.extended.len(),
        }
        .into());
    }
    let total_size = body_offset + frame.payload.len();
    let Ok(declared) = u32::try_from(total_size) else {
        return Err(FramingError::OversizedFrame {
            size: total_size,
            max: u32::MAX as usize,
        });
    };
    if total_size > out.len() {
        return Err(BufferTooSmallError {
            required: total_size,
            capacity: out.len(),
        }
        .into());
    }

    out[0..4].copy_from_slice(&write_network_u32(declared));
    out[4] = frame.doff();
    out[5] = frame.frame_type;
    out[6..8].copy_from_slice(&write_network_u16(frame.channel));
    out[HEADER_SIZE..HEADER_SIZE + frame.extended.len()].copy_from_slice(frame.extended);
    // Zero the word-alignment padding explicitly; the destination may be reused.
    out[HEADER_SIZE + frame.extended.len()..body_offset].fill(0);
    out[body_offset..total_size].copy_from_slice(frame.payload);
    Ok(total_size)
}
