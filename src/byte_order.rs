//! Helpers for explicit network byte-order conversions.
//!
//! These helpers keep Clippy expectations scoped to the conversion points so
//! protocol code can remain explicit about wire endianness without repeating
//! lint annotations. Every multi-byte integer in the frame header is
//! big-endian.

/// Serialise a `u16` in network byte order (big-endian).
///
/// # Examples
///
/// ```
/// use amqframe::byte_order::write_network_u16;
///
/// assert_eq!(write_network_u16(0x1234), [0x12, 0x34]);
/// ```
#[must_use]
pub fn write_network_u16(value: u16) -> [u8; 2] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    value.to_be_bytes()
}

/// Parse a network-order `u16` from its on-wire representation.
///
/// # Examples
///
/// ```
/// use amqframe::byte_order::read_network_u16;
///
/// assert_eq!(read_network_u16([0x12, 0x34]), 0x1234);
/// ```
#[must_use]
pub fn read_network_u16(bytes: [u8; 2]) -> u16 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    u16::from_be_bytes(bytes)
}

/// Serialise a `u32` in network byte order (big-endian).
///
/// # Examples
///
/// ```
/// use amqframe::byte_order::write_network_u32;
///
/// assert_eq!(write_network_u32(0x1234_5678), [0x12, 0x34, 0x56, 0x78]);
/// ```
#[must_use]
pub fn write_network_u32(value: u32) -> [u8; 4] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    value.to_be_bytes()
}

/// Parse a network-order `u32` from its on-wire representation.
///
/// # Examples
///
/// ```
/// use amqframe::byte_order::read_network_u32;
///
/// assert_eq!(read_network_u32([0x12, 0x34, 0x56, 0x78]), 0x1234_5678);
/// ```
#[must_use]
pub fn read_network_u32(bytes: [u8; 4]) -> u32 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    u32::from_be_bytes(bytes)
}

#[cfg(test)]
mod tests {
    //! Round-trip tests for network byte-order conversion helpers.

    use rstest::rstest;

    use super::{read_network_u16, read_network_u32, write_network_u16, write_network_u32};

    /// Verify that each network-order write/read pair round-trips correctly.
    #[rstest]
    #[case::u16(
        0x1234u32,
        &write_network_u16(0x1234)[..],
        &[0x12, 0x34],
        u32::from(read_network_u16([0x12, 0x34]))
    )]
    #[case::u32(
        0x1234_5678u32,
        &write_network_u32(0x1234_5678)[..],
        &[0x12, 0x34, 0x56, 0x78],
        read_network_u32([0x12, 0x34, 0x56, 0x78])
    )]
    fn network_byte_order_round_trip(
        #[case] value: u32,
        #[case] written: &[u8],
        #[case] expected_bytes: &[u8],
        #[case] read_back: u32,
    ) {
        assert_eq!(written, expected_bytes);
        assert_eq!(read_back, value);
    }
}
