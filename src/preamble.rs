//! Protocol-header preamble exchanged before any frame.
//!
//! Each side of a connection announces its protocol family and version with
//! an 8-byte header, `b"AMQP"` followed by a protocol id and a three-part
//! version, before the first frame is sent. The framing layer only needs to
//! recognise and produce this preamble; version negotiation policy belongs
//! to the connection layer.

use thiserror::Error;

/// Size of the protocol header preamble in bytes.
pub const PREAMBLE_SIZE: usize = 8;

const MAGIC: [u8; 4] = *b"AMQP";

/// A peer announced something other than the expected `AMQP` magic.
///
/// Fatal: the peer is not speaking this protocol family at all.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("preamble magic {found:?} is not b\"AMQP\"")]
pub struct PreambleError {
    /// First four bytes the peer actually sent.
    pub found: [u8; 4],
}

/// The 8-byte protocol header announcing family and version.
///
/// # Examples
///
/// ```
/// use amqframe::preamble::ProtocolHeader;
///
/// let header = ProtocolHeader::AMQP;
/// assert_eq!(header.encode(), *b"AMQP\x00\x01\x00\x00");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProtocolHeader {
    /// Protocol id: 0 for plain frames, 3 for SASL negotiation.
    pub protocol_id: u8,
    /// Major protocol version.
    pub major: u8,
    /// Minor protocol version.
    pub minor: u8,
    /// Protocol revision.
    pub revision: u8,
}

impl ProtocolHeader {
    /// Header announcing the plain protocol, version 1.0.0.
    pub const AMQP: Self = Self {
        protocol_id: 0,
        major: 1,
        minor: 0,
        revision: 0,
    };

    /// Header announcing the SASL security layer, version 1.0.0.
    pub const SASL: Self = Self {
        protocol_id: 3,
        major: 1,
        minor: 0,
        revision: 0,
    };

    /// Serialise the preamble to its wire representation.
    #[must_use]
    pub const fn encode(&self) -> [u8; PREAMBLE_SIZE] {
        [
            MAGIC[0],
            MAGIC[1],
            MAGIC[2],
            MAGIC[3],
            self.protocol_id,
            self.major,
            self.minor,
            self.revision,
        ]
    }

    /// Attempt to parse a preamble from the front of `buf`.
    ///
    /// Returns `Ok(None)` while fewer than [`PREAMBLE_SIZE`] bytes are
    /// buffered; the caller waits for more data.
    ///
    /// # Errors
    ///
    /// Returns [`PreambleError`] when the first four bytes are not the
    /// `AMQP` magic. The caller must close the transport.
    ///
    /// # Examples
    ///
    /// ```
    /// use amqframe::preamble::ProtocolHeader;
    ///
    /// let parsed = ProtocolHeader::decode(b"AMQP\x03\x01\x00\x00").unwrap();
    /// assert_eq!(parsed, Some(ProtocolHeader::SASL));
    /// assert_eq!(ProtocolHeader::decode(b"AMQ").unwrap(), None);
    /// ```
    pub fn decode(buf: &[u8]) -> Result<Option<Self>, PreambleError> {
        if buf.len() < PREAMBLE_SIZE {
            return Ok(None);
        }
        if buf[..4] != MAGIC {
            return Err(PreambleError {
                found: [buf[0], buf[1], buf[2], buf[3]],
            });
        }
        Ok(Some(Self {
            protocol_id: buf[4],
            major: buf[5],
            minor: buf[6],
            revision: buf[7],
        }))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{PREAMBLE_SIZE, PreambleError, ProtocolHeader};

    #[rstest]
    #[case::amqp(ProtocolHeader::AMQP, *b"AMQP\x00\x01\x00\x00")]
    #[case::sasl(ProtocolHeader::SASL, *b"AMQP\x03\x01\x00\x00")]
    fn known_headers_round_trip(
        #[case] header: ProtocolHeader,
        #[case] wire: [u8; PREAMBLE_SIZE],
    ) {
        assert_eq!(header.encode(), wire);
        assert_eq!(ProtocolHeader::decode(&wire).unwrap(), Some(header));
    }

    #[test]
    fn short_input_is_incomplete() {
        assert_eq!(ProtocolHeader::decode(b"AMQP\x00\x01\x00").unwrap(), None);
        assert_eq!(ProtocolHeader::decode(&[]).unwrap(), None);
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let err = ProtocolHeader::decode(b"HTTP\x00\x01\x00\x00").unwrap_err();
        assert_eq!(err, PreambleError { found: *b"HTTP" });
    }
}
