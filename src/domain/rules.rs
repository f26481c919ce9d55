//! The rule kernel: pure, deterministic state transitions over a `GameState`
//! clone. Every public function here either succeeds or returns a
//! `DomainError` — it never panics on a well-typed, reachable input.

use crate::domain::cards::{card_beats, hand_has_suit, Card, Suit};
use crate::domain::errors::DomainError;
use crate::domain::state::{GameState, Phase, PlayerId, TrickState, PLAYERS};

fn current_trick_player(leader: PlayerId, plays_so_far: usize) -> PlayerId {
    (leader + plays_so_far as PlayerId) % PLAYERS as PlayerId
}

/// Whether `hand` is currently allowed to lead a trump card. When the
/// restriction is active (`can_lead_trump_before_broken = false`), a hand
/// may lead trump only once trump has been broken, or if trump is the only
/// suit left in hand.
pub fn can_lead_trump(
    state: &GameState,
    hand: &[Card],
    can_lead_trump_before_broken: bool,
) -> bool {
    if can_lead_trump_before_broken {
        return true;
    }
    if state.round.trump_broken {
        return true;
    }
    match state.round.trump.and_then(|t| t.suit()) {
        Some(trump_suit) => hand.iter().all(|c| c.suit == trump_suit),
        None => true,
    }
}

/// Legal cards the player on turn may play. Empty outside `Phase::Trick` or
/// when no trick is in progress.
pub fn legal_moves(state: &GameState, can_lead_trump_before_broken: bool) -> Vec<Card> {
    if state.phase != Phase::Trick {
        return Vec::new();
    }
    let trick = match &state.round.trick_in_progress {
        Some(t) => t,
        None => return Vec::new(),
    };
    let player = current_trick_player(trick.leader_player_id, trick.plays.len());
    let hand = match state.hands.get(player as usize) {
        Some(h) => h,
        None => return Vec::new(),
    };

    match trick.led_suit {
        Some(led) if hand_has_suit(hand, led) => {
            hand.iter().filter(|c| c.suit == led).copied().collect()
        }
        Some(_) => hand.clone(),
        None => {
            if can_lead_trump(state, hand, can_lead_trump_before_broken) {
                hand.clone()
            } else {
                let trump_suit = state.round.trump.and_then(|t| t.suit());
                match trump_suit {
                    Some(trump) => {
                        let non_trump: Vec<Card> =
                            hand.iter().filter(|c| c.suit != trump).copied().collect();
                        if non_trump.is_empty() {
                            hand.clone()
                        } else {
                            non_trump
                        }
                    }
                    None => hand.clone(),
                }
            }
        }
    }
}

/// Applies a single card play, validating ownership, turn, and follow-suit
/// rules. Mutates `state` in place (callers operate on a clone).
pub fn play_card(
    state: &mut GameState,
    player_id: PlayerId,
    card: Card,
    can_lead_trump_before_broken: bool,
) -> Result<(), DomainError> {
    if state.phase != Phase::Trick {
        return Err(DomainError::RoundNotReady);
    }
    let hand = state
        .hands
        .get(player_id as usize)
        .ok_or(DomainError::PlayerNotFound)?;
    if !hand.contains(&card) {
        return Err(DomainError::CardNotInHand);
    }

    let trick = state
        .round
        .trick_in_progress
        .as_ref()
        .ok_or(DomainError::NoActiveTrick)?;
    let expected = current_trick_player(trick.leader_player_id, trick.plays.len());
    if expected != player_id {
        return Err(DomainError::OutOfTurn);
    }

    let legal = legal_moves(state, can_lead_trump_before_broken);
    if !legal.contains(&card) {
        return Err(DomainError::MustFollowSuit);
    }

    let trump_suit = state.round.trump.and_then(|t| t.suit());
    let trick = state.round.trick_in_progress.as_mut().unwrap();
    let order = trick.plays.len() as u8;
    if trick.plays.is_empty() {
        trick.led_suit = Some(card.suit);
    }
    trick.plays.push(crate::domain::state::TrickPlay {
        player_id,
        card,
        order,
    });
    if Some(card.suit) == trump_suit {
        state.round.trump_broken = true;
    }

    let hand = &mut state.hands[player_id as usize];
    if let Some(pos) = hand.iter().position(|c| *c == card) {
        hand.remove(pos);
    }
    state.turn = current_trick_player(state.leader, state.round.trick_in_progress.as_ref().unwrap().plays.len());
    Ok(())
}

/// Resolves the trick in progress, crediting the winner's trick count and
/// either opening the next trick or moving the round into `Phase::Scoring`.
pub fn complete_trick(state: &mut GameState) -> Result<PlayerId, DomainError> {
    if state.phase != Phase::Trick {
        return Err(DomainError::RoundNotReady);
    }
    {
        let trick = state
            .round
            .trick_in_progress
            .as_ref()
            .ok_or(DomainError::NoActiveTrick)?;
        if trick.plays.len() != PLAYERS {
            return Err(DomainError::NoActiveTrick);
        }
    }

    let trump = state.round.trump.unwrap_or(crate::domain::cards::Trump::NoTrumps);
    let mut finished = state.round.trick_in_progress.take().unwrap();
    let led_suit = finished.led_suit.expect("trick with plays has a led suit");

    let mut winning_idx = 0usize;
    for i in 1..finished.plays.len() {
        let candidate = finished.plays[i].card;
        let current_best = finished.plays[winning_idx].card;
        if card_beats(candidate, current_best, led_suit, trump) {
            winning_idx = i;
        }
    }
    let winner = finished.plays[winning_idx].player_id;
    finished.winning_player_id = Some(winner);
    finished.winning_card = Some(finished.plays[winning_idx].card);
    finished.completed = true;

    state.tricks_won[winner as usize] += 1;
    state.round.completed_tricks.push(finished);

    if state.round.completed_tricks.len() == state.hand_size as usize {
        state.phase = Phase::Scoring;
    } else {
        let next_trick_no = state.trick_no + 1;
        state.trick_no = next_trick_no;
        state.leader = winner;
        state.turn = winner;
        state.round.trick_in_progress = Some(TrickState::new(next_trick_no, winner));
    }

    Ok(winner)
}

/// Bids a player may currently place; empty outside `Phase::Bidding`.
pub fn legal_bids(state: &GameState) -> Vec<u8> {
    if state.phase != Phase::Bidding {
        return Vec::new();
    }
    (0..=state.hand_size).collect()
}

pub fn place_bid(state: &mut GameState, player_id: PlayerId, bid: u8) -> Result<(), DomainError> {
    if state.phase != Phase::Bidding {
        return Err(DomainError::PhaseMismatch);
    }
    if player_id as usize >= PLAYERS {
        return Err(DomainError::PlayerNotFound);
    }
    if state.turn != player_id {
        return Err(DomainError::OutOfTurn);
    }
    if bid > state.hand_size {
        return Err(DomainError::InvalidBid);
    }
    if state.round.bids[player_id as usize].is_some() {
        return Err(DomainError::InvalidBid);
    }
    state.round.bids[player_id as usize] = Some(bid);
    state.turn = (player_id + 1) % PLAYERS as PlayerId;

    if state.round.bids.iter().all(|b| b.is_some()) {
        let mut winner = state.turn_start;
        let mut best = -1i16;
        for offset in 0..PLAYERS as PlayerId {
            let p = (state.turn_start + offset) % PLAYERS as PlayerId;
            let b = state.round.bids[p as usize].unwrap() as i16;
            if b > best {
                best = b;
                winner = p;
            }
        }
        state.round.winning_bidder = Some(winner);
        state.phase = Phase::TrumpSelect;
        state.turn = winner;
    }
    Ok(())
}

pub fn set_trump(
    state: &mut GameState,
    player_id: PlayerId,
    trump: crate::domain::cards::Trump,
) -> Result<(), DomainError> {
    if state.phase != Phase::TrumpSelect {
        return Err(DomainError::PhaseMismatch);
    }
    if state.round.winning_bidder != Some(player_id) {
        return Err(DomainError::OutOfTurn);
    }
    state.round.trump = Some(trump);
    state.leader = player_id;
    state.turn = player_id;
    state.trick_no = 0;
    state.round.trick_in_progress = Some(TrickState::new(0, player_id));
    state.phase = Phase::Trick;
    Ok(())
}

/// Applies end-of-round scoring and transitions to `Phase::Complete`. A
/// no-op outside `Phase::Scoring`. Each player's cumulative score gains
/// their tricks won this round, plus a flat +10 bonus when they bid and
/// made exactly that many tricks.
pub fn apply_round_scoring(state: &mut GameState) {
    if state.phase != Phase::Scoring {
        return;
    }
    const EXACT_BID_BONUS: i32 = 10;
    for pid in 0..PLAYERS {
        let tricks = state.tricks_won[pid] as i32;
        let bonus = match state.round.bids[pid] {
            Some(b) if b as i32 == tricks => EXACT_BID_BONUS,
            _ => 0,
        };
        state.scores_total[pid] += tricks + bonus;
    }
    state.phase = Phase::Complete;
}
