//! Test-only state builders, mirroring the teacher's `test_state_helpers`
//! convention: small, explicit constructors rather than a generic builder.
#![cfg(test)]

use crate::domain::cards::{Card, Trump};
use crate::domain::state::{GameState, Phase, PlayerId, RoundState, TrickState, PLAYERS};

/// Builds a `GameState` already in `Phase::Trick` with an open trick led by
/// `leader`, for rule-kernel unit tests that don't need bidding/scoring.
pub fn init_trick(hands: [Vec<Card>; PLAYERS], leader: PlayerId, trump: Trump) -> GameState {
    let hand_size = hands.iter().map(|h| h.len()).max().unwrap_or(0) as u8;
    GameState {
        round_no: 1,
        hand_size,
        phase: Phase::Trick,
        hands,
        tricks_won: [0; PLAYERS],
        turn: leader,
        turn_start: leader,
        leader,
        trick_no: 0,
        scores_total: [0; PLAYERS],
        round: RoundState {
            trump: Some(trump),
            trump_broken: false,
            bids: [None; PLAYERS],
            winning_bidder: None,
            trick_in_progress: Some(TrickState::new(0, leader)),
            completed_tricks: Vec::new(),
        },
    }
}

/// Builds a `GameState` at the start of bidding, all hands equal size.
pub fn init_bidding(hands: [Vec<Card>; PLAYERS], turn_start: PlayerId) -> GameState {
    let hand_size = hands[0].len() as u8;
    GameState {
        round_no: 1,
        hand_size,
        phase: Phase::Bidding,
        hands,
        tricks_won: [0; PLAYERS],
        turn: turn_start,
        turn_start,
        leader: turn_start,
        trick_no: 0,
        scores_total: [0; PLAYERS],
        round: RoundState::empty(),
    }
}
