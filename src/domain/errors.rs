use thiserror::Error;

/// Rule-kernel failures. `Display` text is the wire-stable token external
/// callers parse, so each variant pins its exact string via `#[error(...)]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("ROUND_NOT_READY")]
    RoundNotReady,
    #[error("PLAYER_NOT_FOUND")]
    PlayerNotFound,
    #[error("CARD_NOT_IN_HAND")]
    CardNotInHand,
    #[error("MUST_FOLLOW_SUIT")]
    MustFollowSuit,
    #[error("NO_ACTIVE_TRICK")]
    NoActiveTrick,
    #[error("OUT_OF_TURN")]
    OutOfTurn,
    #[error("PHASE_MISMATCH")]
    PhaseMismatch,
    #[error("INVALID_BID")]
    InvalidBid,
    #[error("PARSE_CARD: {0}")]
    ParseCard(String),
}
