use std::collections::HashMap;

use crate::domain::cards::{Card, Trump};

pub type PlayerId = u8;

pub const PLAYERS: usize = 4;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Bidding,
    TrumpSelect,
    Trick,
    Scoring,
    Complete,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TrickPlay {
    pub player_id: PlayerId,
    pub card: Card,
    pub order: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrickState {
    pub trick_no: u8,
    pub leader_player_id: PlayerId,
    pub led_suit: Option<crate::domain::cards::Suit>,
    pub plays: Vec<TrickPlay>,
    pub winning_player_id: Option<PlayerId>,
    pub winning_card: Option<Card>,
    pub completed: bool,
}

impl TrickState {
    pub fn new(trick_no: u8, leader_player_id: PlayerId) -> Self {
        TrickState {
            trick_no,
            leader_player_id,
            led_suit: None,
            plays: Vec::new(),
            winning_player_id: None,
            winning_card: None,
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub trump: Option<Trump>,
    pub trump_broken: bool,
    pub bids: [Option<u8>; PLAYERS],
    pub winning_bidder: Option<PlayerId>,
    pub trick_in_progress: Option<TrickState>,
    pub completed_tricks: Vec<TrickState>,
}

impl RoundState {
    pub fn empty() -> Self {
        RoundState {
            trump: None,
            trump_broken: false,
            bids: [None; PLAYERS],
            winning_bidder: None,
            trick_in_progress: None,
            completed_tricks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub round_no: u8,
    pub hand_size: u8,
    pub phase: Phase,
    pub hands: [Vec<Card>; PLAYERS],
    pub tricks_won: [u8; PLAYERS],
    pub turn: PlayerId,
    pub turn_start: PlayerId,
    pub leader: PlayerId,
    pub trick_no: u8,
    pub scores_total: [i32; PLAYERS],
    pub round: RoundState,
}

impl GameState {
    pub fn player_state(&self, player_id: PlayerId) -> Option<&Vec<Card>> {
        self.hands.get(player_id as usize)
    }

    pub fn turn_order(&self) -> [PlayerId; PLAYERS] {
        [0, 1, 2, 3]
    }

    pub fn plays_made(&self, player_id: PlayerId) -> u8 {
        let mut made = self
            .round
            .completed_tricks
            .iter()
            .filter(|t| t.plays.iter().any(|p| p.player_id == player_id))
            .count() as u8;
        if let Some(trick) = &self.round.trick_in_progress {
            if trick.plays.iter().any(|p| p.player_id == player_id) {
                made += 1;
            }
        }
        made
    }
}

/// Degraded recollection of who is known to be void in which suits, derived
/// from play history. Not part of `GameState` itself; computed on demand by
/// the determinizer.
pub type VoidMap = HashMap<PlayerId, Vec<crate::domain::cards::Suit>>;
