//! Transfer ordering checked with a mock transport

use bytes::BytesMut;
use mockall::Sequence;
use nxtusb::{Brick, ErrorKind};
use nxtusb_transport::{Error as TransportError, MockTransport};

fn connected_mock() -> MockTransport {
    let mut transport = MockTransport::new();
    transport.expect_is_open().return_const(true);
    transport
        .expect_description()
        .returning(|| "mock".to_string());
    transport
}

#[tokio::test]
async fn test_write_then_read() {
    let mut transport = connected_mock();
    let mut seq = Sequence::new();

    transport
        .expect_write()
        .withf(|data| data.to_vec() == vec![0x00, 0x0B])
        .times(1)
        .in_sequence(&mut seq)
        .returning(|data| Ok(data.len()));
    transport
        .expect_read()
        .withf(|max_len| *max_len == 64)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(BytesMut::from(&[0x02u8, 0x0B, 0x00, 0x40, 0x1F][..])));

    let brick = Brick::connect(Box::new(transport)).await.unwrap();
    assert_eq!(brick.battery_level().await.unwrap(), 8000);
}

#[tokio::test]
async fn test_failed_write_skips_read() {
    let mut transport = connected_mock();

    transport
        .expect_write()
        .times(1)
        .returning(|_| Err(TransportError::Transfer("stall".to_string())));
    transport.expect_read().never();

    let brick = Brick::connect(Box::new(transport)).await.unwrap();

    let err = brick.stop_sound().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_connect_opens_closed_transport() {
    let mut transport = MockTransport::new();
    let mut seq = Sequence::new();

    transport
        .expect_is_open()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(false);
    transport
        .expect_open()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(()));
    transport
        .expect_description()
        .returning(|| "mock".to_string());
    transport.expect_close().times(1).returning(|| Ok(()));

    let brick = Brick::connect(Box::new(transport)).await.unwrap();
    brick.close().await.unwrap();
}

#[tokio::test]
async fn test_open_failure_propagates() {
    let mut transport = MockTransport::new();
    transport.expect_is_open().return_const(false);
    transport.expect_open().returning(|| {
        Err(TransportError::DeviceNotFound {
            vendor_id: 0x0694,
            product_id: 0x0002,
        })
    });

    let err = Brick::connect(Box::new(transport)).await.err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
