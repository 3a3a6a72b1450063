use broadside::{decode_frame, encode_frame, Command, Reply, Settings, MAX_FRAME_LEN};
use uuid::Uuid;

#[test]
fn test_command_frame_round_trip() {
    let cmd = Command::AddShip {
        game_id: Uuid::new_v4(),
        token: Uuid::new_v4(),
        row: 3,
        col: 7,
        size: 2,
        vertical: true,
    };
    let frame = encode_frame(&cmd).unwrap();
    let len = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]) as usize;
    assert_eq!(len, frame.len() - 4);

    let decoded: Command = decode_frame(&frame).unwrap();
    assert_eq!(decoded, cmd);
}

#[test]
fn test_create_game_carries_settings() {
    let cmd = Command::CreateGame {
        nickname: "alice".to_string(),
        settings: Settings::multi_play(),
    };
    let decoded: Command = decode_frame(&encode_frame(&cmd).unwrap()).unwrap();
    assert_eq!(decoded, cmd);
}

#[test]
fn test_reject_oversized_header() {
    let mut frame = (MAX_FRAME_LEN + 1).to_be_bytes().to_vec();
    frame.extend_from_slice(&[0u8; 16]);
    let err = decode_frame::<Reply>(&frame).unwrap_err();
    assert!(err.to_string().contains("too large"));
}

#[test]
fn test_reject_zero_length() {
    let frame = 0u32.to_be_bytes();
    assert!(decode_frame::<Reply>(&frame).is_err());
}

#[test]
fn test_reject_truncated_frames() {
    let frame = encode_frame(&Reply::Accepted(true)).unwrap();
    assert!(decode_frame::<Reply>(&frame[..2]).is_err());
    assert!(decode_frame::<Reply>(&frame[..frame.len() - 1]).is_err());
    assert!(decode_frame::<Reply>(&[]).is_err());
}

#[test]
fn test_reject_trailing_bytes() {
    let mut frame = encode_frame(&Reply::Accepted(false)).unwrap();
    frame.push(0);
    let err = decode_frame::<Reply>(&frame).unwrap_err();
    assert!(err.to_string().contains("mismatch"));
}

#[test]
fn test_garbage_body_fails_cleanly() {
    let mut frame = 4u32.to_be_bytes().to_vec();
    frame.extend_from_slice(&[0xff, 0xff, 0xff, 0xff]);
    assert!(decode_frame::<Command>(&frame).is_err());
}
