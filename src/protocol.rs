//! Message envelope exchanged with the session layer, and its frame codec.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::Settings,
    domain::{PlayerUpdate, ShotReport},
    game::GameState,
    player::Token,
};

/// Upper bound on an encoded frame body.
pub const MAX_FRAME_LEN: u32 = 1_000_000;

/// Inbound operations, addressed by game id and access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    CreateGame {
        nickname: String,
        settings: Settings,
    },
    JoinGame {
        game_id: Uuid,
        nickname: String,
    },
    AutoFill {
        game_id: Uuid,
        token: Token,
    },
    AddShip {
        game_id: Uuid,
        token: Token,
        row: usize,
        col: usize,
        size: usize,
        vertical: bool,
    },
    DeleteShip {
        game_id: Uuid,
        token: Token,
        row: usize,
        col: usize,
    },
    PlayerReady {
        game_id: Uuid,
        token: Token,
    },
    TakeShot {
        game_id: Uuid,
        token: Token,
        row: usize,
        col: usize,
    },
    /// Ask for a fresh [`PlayerUpdate`].
    GameUpdate {
        game_id: Uuid,
        token: Token,
    },
}

/// Outbound replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    GameCreated {
        game_id: Uuid,
        token: Token,
        state: GameState,
    },
    GameJoined {
        game_id: Uuid,
        token: Token,
        rival: String,
    },
    /// Outcome of a placement, removal, auto-fill or readiness request.
    Accepted(bool),
    /// Readiness accepted and the game started; carries any opening bot shots.
    Started {
        bot: Vec<ShotReport>,
    },
    /// The caller's shot (if it was accepted) followed by the bot shots it
    /// triggered.
    Shots {
        player: Option<ShotReport>,
        bot: Vec<ShotReport>,
    },
    Update(Box<PlayerUpdate>),
    Error {
        error: String,
    },
}

/// Serialize `msg` into a length-prefixed frame.
pub fn encode_frame<T: Serialize>(msg: &T) -> anyhow::Result<Vec<u8>> {
    let data = bincode::serialize(msg).map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
    if data.len() as u64 > MAX_FRAME_LEN as u64 {
        return Err(anyhow::anyhow!(
            "Message too large: {} bytes (max: {})",
            data.len(),
            MAX_FRAME_LEN
        ));
    }
    let mut frame = Vec::with_capacity(4 + data.len());
    frame.extend_from_slice(&(data.len() as u32).to_be_bytes());
    frame.extend_from_slice(&data);
    Ok(frame)
}

/// Parse one length-prefixed frame. Trailing bytes are rejected.
pub fn decode_frame<T: DeserializeOwned>(frame: &[u8]) -> anyhow::Result<T> {
    let Some((len_buf, body)) = frame.split_first_chunk::<4>() else {
        return Err(anyhow::anyhow!("Truncated frame header: {} bytes", frame.len()));
    };
    let len = u32::from_be_bytes(*len_buf);
    if len > MAX_FRAME_LEN {
        return Err(anyhow::anyhow!(
            "Message too large: {} bytes (max: {})",
            len,
            MAX_FRAME_LEN
        ));
    }
    if len == 0 {
        return Err(anyhow::anyhow!("Invalid message length: 0"));
    }
    if body.len() != len as usize {
        return Err(anyhow::anyhow!(
            "Frame length mismatch: header says {}, body has {}",
            len,
            body.len()
        ));
    }
    bincode::deserialize(body).map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))
}
