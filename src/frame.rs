//! Frame data model and wire-layout constants.
//!
//! A frame is one discrete protocol message unit: a fixed 8-byte header, an
//! optional word-aligned extended header, and an opaque payload. This layer
//! never interprets the payload or the channel; both belong to the
//! performative and session layers above.
//!
//! Wire layout (all integers big-endian):
//!
//! ```text
//! offset  size  field
//! 0       4     SIZE     total frame length, header included
//! 4       1     DOFF     data offset in 4-byte words (minimum 2)
//! 5       1     TYPE     frame type identifier
//! 6       2     CHANNEL  channel / multiplexing identifier
//! 8       …     EXTENDED type-specific header, zero-padded to a word boundary
//! DOFF*4  …     PAYLOAD  opaque frame body
//! ```

/// Size of the fixed frame header in bytes.
pub const HEADER_SIZE: usize = 8;

/// Minimum legal DOFF value: the fixed header itself occupies two words.
pub const MIN_DOFF: u8 = 2;

/// Frame type identifier for protocol frames.
pub const FRAME_TYPE_AMQP: u8 = 0;

/// Frame type identifier for SASL negotiation frames.
pub const FRAME_TYPE_SASL: u8 = 1;

/// A decoded or to-be-encoded frame borrowing its content.
///
/// `extended` and `payload` are windows into a caller-supplied buffer; the
/// lifetime ties their validity to that buffer. A `Frame` produced by
/// [`read_frame`](crate::framing::read_frame) must not outlive the receive
/// buffer it was parsed from.
///
/// # Examples
///
/// ```
/// use amqframe::frame::Frame;
///
/// let frame = Frame::new(0, 7, &[], b"body");
/// assert_eq!(frame.channel, 7);
/// assert_eq!(frame.encoded_len(), 8 + 4);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame<'a> {
    /// Frame type identifier, opaque at this layer.
    pub frame_type: u8,
    /// Channel identifier multiplexing logical streams, opaque at this layer.
    pub channel: u16,
    /// Extended header bytes. Word-aligned on the wire; a writer pads a
    /// shorter view with zero bytes.
    pub extended: &'a [u8],
    /// Opaque frame body.
    pub payload: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Construct a frame from its parts.
    #[must_use]
    pub const fn new(frame_type: u8, channel: u16, extended: &'a [u8], payload: &'a [u8]) -> Self {
        Self {
            frame_type,
            channel,
            extended,
            payload,
        }
    }

    /// Length of the extended header as it will appear on the wire, padded
    /// to the next 4-byte boundary.
    #[must_use]
    pub const fn ex_size(&self) -> usize { self.extended.len().next_multiple_of(4) }

    /// Length of the payload in bytes.
    #[must_use]
    pub const fn size(&self) -> usize { self.payload.len() }

    /// Total number of bytes this frame occupies on the wire.
    ///
    /// Always equals `HEADER_SIZE + ex_size + size`.
    #[must_use]
    pub const fn encoded_len(&self) -> usize { HEADER_SIZE + self.ex_size() + self.size() }

    /// DOFF value encoding the payload offset in 4-byte words.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "DOFF is bounded by the u32 SIZE field; callers validate before encoding."
    )]
    pub const fn doff(&self) -> u8 { ((HEADER_SIZE + self.ex_size()) / 4) as u8 }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Frame, HEADER_SIZE, MIN_DOFF};

    #[rstest]
    #[case::empty(&[], &[], 8, 2)]
    #[case::payload_only(&[], &[1, 2, 3], 11, 2)]
    #[case::aligned_extended(&[0; 4], &[], 12, 3)]
    #[case::unaligned_extended_padded(&[9; 5], &[1], 17, 4)]
    fn frame_lengths(
        #[case] extended: &[u8],
        #[case] payload: &[u8],
        #[case] encoded_len: usize,
        #[case] doff: u8,
    ) {
        let frame = Frame::new(0, 0, extended, payload);
        assert_eq!(frame.encoded_len(), encoded_len);
        assert_eq!(frame.doff(), doff);
        assert_eq!(
            frame.encoded_len(),
            HEADER_SIZE + frame.ex_size() + frame.size()
        );
    }

    #[test]
    fn minimal_frame_doff_matches_header() {
        let frame = Frame::new(0, 0, &[], &[]);
        assert_eq!(frame.doff(), MIN_DOFF);
        assert_eq!(frame.ex_size(), 0);
    }

    #[test]
    fn ex_size_is_word_aligned() {
        for len in 0..9usize {
            let extended = vec![0u8; len];
            let frame = Frame::new(0, 0, &extended, &[]);
            assert_eq!(frame.ex_size() % 4, 0);
            assert!(frame.ex_size() >= len);
            assert!(frame.ex_size() < len + 4);
        }
    }
}
