//! Integration coverage for the frame codec over an in-memory transport.

use amqframe::{AmqpFrameCodec, FRAME_TYPE_SASL, FrameBuf};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::io::AsyncWriteExt;

#[tokio::test]
async fn frames_round_trip_over_duplex_stream() {
    let (client, server) = tokio::io::duplex(4096);
    let mut client = AmqpFrameCodec::new(1024).framed(client);
    let mut server = AmqpFrameCodec::new(1024).framed(server);

    let frames = vec![
        FrameBuf::new(0, 0, Bytes::new(), Bytes::new()),
        FrameBuf::new(
            FRAME_TYPE_SASL,
            1,
            Bytes::from_static(&[1, 2, 3, 4]),
            Bytes::from_static(b"sasl-init"),
        ),
        FrameBuf::new(0, 42, Bytes::new(), Bytes::from(vec![0xAB; 300])),
    ];

    for frame in &frames {
        client.send(frame.clone()).await.expect("send frame");
    }

    for expected in &frames {
        let got = server
            .next()
            .await
            .expect("stream should yield a frame")
            .expect("frame should decode");
        assert_eq!(&got, expected);
    }
}

#[tokio::test]
async fn clean_close_after_last_frame_ends_the_stream() {
    let (client, server) = tokio::io::duplex(256);
    let mut client = AmqpFrameCodec::new(1024).framed(client);
    let mut server = AmqpFrameCodec::new(1024).framed(server);

    let frame = FrameBuf::new(0, 7, Bytes::new(), Bytes::from_static(b"last"));
    client.send(frame.clone()).await.expect("send frame");
    drop(client);

    let got = server
        .next()
        .await
        .expect("frame before close")
        .expect("frame should decode");
    assert_eq!(got, frame);
    assert!(server.next().await.is_none(), "clean close yields no error");
}

#[tokio::test]
async fn premature_close_mid_frame_is_unexpected_eof() {
    let (mut client, server) = tokio::io::duplex(64);
    // Header declares 16 bytes; only 11 ever arrive.
    client
        .write_all(&[0, 0, 0, 16, 2, 0, 0, 0, 1, 2, 3])
        .await
        .expect("write partial frame");
    drop(client);

    let mut server = AmqpFrameCodec::default().framed(server);
    let err = server
        .next()
        .await
        .expect("stream should yield an error")
        .expect_err("truncated frame must not decode");
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
}

#[tokio::test]
async fn premature_close_mid_header_is_unexpected_eof() {
    let (mut client, server) = tokio::io::duplex(64);
    client
        .write_all(&[0, 0, 0])
        .await
        .expect("write partial header");
    drop(client);

    let mut server = AmqpFrameCodec::default().framed(server);
    let err = server
        .next()
        .await
        .expect("stream should yield an error")
        .expect_err("partial header must not decode");
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
}

#[tokio::test]
async fn corrupt_data_offset_tears_down_the_stream() {
    let (mut client, server) = tokio::io::duplex(64);
    // DOFF=1 places the body inside the fixed header.
    client
        .write_all(&[0, 0, 0, 8, 1, 0, 0, 0])
        .await
        .expect("write corrupt frame");

    let mut server = AmqpFrameCodec::default().framed(server);
    let err = server
        .next()
        .await
        .expect("stream should yield an error")
        .expect_err("corrupt framing must not decode");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
