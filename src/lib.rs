#![doc(html_root_url = "https://docs.rs/amqframe/latest")]
//! Public API for the `amqframe` library.
//!
//! This crate implements the framing layer of an AMQP-style transport: a
//! fixed 8-byte header wrapping an optional word-aligned extended header and
//! an opaque payload. The pure [`framing`] functions work on byte slices
//! with no allocation or I/O; the [`codec`] module adapts them to a
//! `tokio_util` [`Decoder`](tokio_util::codec::Decoder)/
//! [`Encoder`](tokio_util::codec::Encoder) pair for use in async pipelines.
//!
//! Everything above framing — performative encoding, connection, session,
//! and link state machines, SASL, TLS — treats the frame payload as opaque
//! bytes and lives in other crates.

pub mod byte_order;
pub mod codec;
pub mod error;
pub mod frame;
pub mod framing;
pub mod preamble;

pub use codec::{AmqpFrameCodec, FrameBuf, MAX_FRAME_LENGTH, MIN_FRAME_LENGTH};
pub use error::{BufferTooSmallError, EofError, FrameFormatError, FramingError};
pub use frame::{FRAME_TYPE_AMQP, FRAME_TYPE_SASL, Frame, HEADER_SIZE, MIN_DOFF};
pub use framing::{read_frame, write_frame};
pub use preamble::{PreambleError, ProtocolHeader};
