//! Determinization: sampling a concrete, fully-specified world consistent
//! with one player's information set.
//!
//! Every search iteration calls [`determinize`] again with a fresh RNG draw
//! — re-sampling the hidden information per iteration (rather than fixing one
//! sampled world for the whole search) is what makes the surrounding search
//! an information-set method instead of single-determinization Monte Carlo.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::domain::cards::{full_deck, Card, Suit};
use crate::domain::state::{GameState, PlayerId, PLAYERS};
use crate::instrumentation::InstrumentationSink;

/// Retry budget used by the plain [`determinize`] entry point and its test
/// suite. The search engine instead calls [`determinize_with_retries`]
/// directly with `EngineConfig::max_determinization_retries`.
const DEFAULT_MAX_RETRIES: u8 = 50;

/// Outcome of one determinization call: the sampled state plus bookkeeping
/// the caller (or the instrumentation sink) may want to inspect.
#[derive(Debug, Clone)]
pub struct Determinization {
    pub state: GameState,
    pub attempts: u32,
    pub degraded: bool,
}

fn derive_voids(state: &GameState) -> HashMap<PlayerId, Vec<Suit>> {
    let mut voids: HashMap<PlayerId, Vec<Suit>> =
        (0..PLAYERS as PlayerId).map(|p| (p, Vec::new())).collect();

    let mut record = |player_id: PlayerId, led_suit: Suit, played_suit: Suit| {
        if played_suit != led_suit {
            let entry = voids.entry(player_id).or_default();
            if !entry.contains(&led_suit) {
                entry.push(led_suit);
            }
        }
    };

    for trick in &state.round.completed_tricks {
        let Some(led_suit) = trick.led_suit else {
            continue;
        };
        for play in &trick.plays {
            record(play.player_id, led_suit, play.card.suit);
        }
    }
    if let Some(trick) = &state.round.trick_in_progress {
        if let Some(led_suit) = trick.led_suit {
            for play in &trick.plays {
                record(play.player_id, led_suit, play.card.suit);
            }
        }
    }
    voids
}

fn visible_cards(state: &GameState, observer: PlayerId) -> Vec<Card> {
    let mut visible: Vec<Card> = state
        .hands
        .get(observer as usize)
        .cloned()
        .unwrap_or_default();
    for trick in &state.round.completed_tricks {
        visible.extend(trick.plays.iter().map(|p| p.card));
    }
    if let Some(trick) = &state.round.trick_in_progress {
        visible.extend(trick.plays.iter().map(|p| p.card));
    }
    visible
}

fn needed_counts(state: &GameState, observer: PlayerId) -> HashMap<PlayerId, usize> {
    let mut needed = HashMap::new();
    for p in 0..PLAYERS as PlayerId {
        if p == observer {
            needed.insert(p, 0);
            continue;
        }
        let plays_made = state.plays_made(p) as usize;
        let current = (state.hand_size as usize).saturating_sub(plays_made);
        needed.insert(p, current);
    }
    needed
}

/// Samples opponent hands consistent with `observer`'s information set,
/// retrying up to the default budget (`DEFAULT_MAX_RETRIES`) before
/// degrading. See [`determinize_with_retries`] for a caller (the search
/// engine) that wants its retry budget taken from `EngineConfig`.
///
/// Returns a state where every player's hand is fully populated. Never
/// fails outright: if constrained allocation cannot succeed within the
/// retry budget, the remaining pool is dealt ignoring void constraints and
/// the outcome is reported as `degraded` via `sink`, never as an error.
pub fn determinize(
    state: &GameState,
    observer: PlayerId,
    rng: &mut impl RngCore,
    sink: &dyn InstrumentationSink,
) -> Determinization {
    determinize_with_retries(state, observer, rng, sink, DEFAULT_MAX_RETRIES)
}

/// Same algorithm as [`determinize`], parameterized on the retry budget
/// (`EngineConfig::max_determinization_retries` in production).
pub fn determinize_with_retries(
    state: &GameState,
    observer: PlayerId,
    rng: &mut impl RngCore,
    sink: &dyn InstrumentationSink,
    max_retries: u8,
) -> Determinization {
    let mut new_state = state.clone();
    let voids = derive_voids(&new_state);
    let visible = visible_cards(&new_state, observer);
    let mut unknown_cards: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| !visible.contains(c))
        .collect();
    unknown_cards.shuffle(rng);

    let needed = needed_counts(&new_state, observer);
    let mut player_order: Vec<(PlayerId, usize)> = needed
        .iter()
        .filter(|(_, &count)| count > 0)
        .map(|(&p, &c)| (p, c))
        .collect();
    player_order.sort_by(|a, b| {
        let va = voids.get(&a.0).map(|v| v.len()).unwrap_or(0);
        let vb = voids.get(&b.0).map(|v| v.len()).unwrap_or(0);
        vb.cmp(&va).then(a.0.cmp(&b.0))
    });

    for attempt in 0..max_retries {
        let mut pool = unknown_cards.clone();
        pool.shuffle(rng);

        let mut assignments: HashMap<PlayerId, Vec<Card>> = HashMap::new();
        let mut success = true;

        for &(pid, count) in &player_order {
            let empty = Vec::new();
            let player_voids = voids.get(&pid).unwrap_or(&empty);
            let valid: Vec<Card> = pool
                .iter()
                .filter(|c| !player_voids.contains(&c.suit))
                .copied()
                .collect();
            if valid.len() < count {
                success = false;
                break;
            }
            let selected: Vec<Card> = valid.into_iter().take(count).collect();
            pool.retain(|c| !selected.contains(c));
            assignments.insert(pid, selected);
        }

        if success {
            for (pid, cards) in assignments {
                new_state.hands[pid as usize] = cards;
            }
            sink.determinization(attempt + 1, false);
            return Determinization {
                state: new_state,
                attempts: attempt + 1,
                degraded: false,
            };
        }
    }

    // Graceful degradation: deal the remaining pool ignoring voids.
    let mut pool = unknown_cards;
    pool.shuffle(rng);
    for &(pid, count) in &player_order {
        let drained: Vec<Card> = pool.drain(0..count.min(pool.len())).collect();
        new_state.hands[pid as usize] = drained;
    }
    sink.determinization(max_retries as u32, true);
    Determinization {
        state: new_state,
        attempts: max_retries as u32,
        degraded: true,
    }
}
