//! Terminal-state evaluation strategies.
//!
//! Dispatched through a closed, tagged enum rather than `dyn Strategy` — the
//! evaluator runs exactly once per search iteration, on the single hottest
//! path in the engine, so a `match` on a small enum is both the idiomatic
//! choice and avoids a vtable indirection there.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::cards::Suit;
use crate::domain::state::{GameState, PlayerId};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Default,
    Aggressive,
    SloughPoints,
    BidAware,
}

impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::Default
    }
}

impl StrategyKind {
    /// Parses a dispatch tag, falling back to `Default` for anything
    /// unrecognized (including stale tags from an older config).
    pub fn from_tag(tag: &str) -> StrategyKind {
        match tag {
            "default" => StrategyKind::Default,
            "aggressive" => StrategyKind::Aggressive,
            "slough_points" => StrategyKind::SloughPoints,
            "bid_aware" => StrategyKind::BidAware,
            _ => StrategyKind::Default,
        }
    }
}

fn default_alpha() -> f64 {
    0.5
}
fn default_beta() -> f64 {
    1.0
}
fn default_aggression_factor() -> f64 {
    0.3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggressiveParams {
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    #[serde(default = "default_aggression_factor")]
    pub aggression_factor: f64,
}

impl Default for AggressiveParams {
    fn default() -> Self {
        AggressiveParams {
            alpha: default_alpha(),
            beta: default_beta(),
            aggression_factor: default_aggression_factor(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SloughParams {
    #[serde(default)]
    pub alpha: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    #[serde(default)]
    pub point_values: HashMap<String, i32>,
}

impl Default for SloughParams {
    fn default() -> Self {
        SloughParams {
            alpha: 0.0,
            beta: default_beta(),
            point_values: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyParams {
    #[serde(default)]
    pub aggressive: AggressiveParams,
    #[serde(default)]
    pub slough: SloughParams,
}

fn default_eval(state: &GameState, observer: PlayerId) -> f64 {
    if state.hand_size == 0 {
        return 0.0;
    }
    state.tricks_won[observer as usize] as f64 / state.hand_size as f64
}

fn aggressive_eval(state: &GameState, observer: PlayerId, params: &AggressiveParams) -> f64 {
    let base = default_eval(state, observer);
    let threshold = ((state.hand_size as f64 * params.aggression_factor).floor() as u32).max(2);
    let early_wins = state
        .round
        .completed_tricks
        .iter()
        .filter(|t| {
            (t.trick_no as u32) < threshold && t.winning_player_id == Some(observer)
        })
        .count() as f64;
    params.alpha * base + params.beta * (early_wins / threshold.max(1) as f64)
}

fn card_point_value(card: crate::domain::cards::Card, point_values: &HashMap<String, i32>) -> i32 {
    let suit_rank_key = format!("{}:{}", suit_key(card.suit), rank_char(card.rank));
    if let Some(v) = point_values.get(&suit_rank_key) {
        return *v;
    }
    point_values.get(suit_key(card.suit)).copied().unwrap_or(0)
}

fn suit_key(suit: Suit) -> &'static str {
    match suit {
        Suit::Clubs => "clubs",
        Suit::Diamonds => "diamonds",
        Suit::Hearts => "hearts",
        Suit::Spades => "spades",
    }
}

fn rank_char(rank: crate::domain::cards::Rank) -> char {
    use crate::domain::cards::Rank::*;
    match rank {
        Two => '2',
        Three => '3',
        Four => '4',
        Five => '5',
        Six => '6',
        Seven => '7',
        Eight => '8',
        Nine => '9',
        Ten => 'T',
        Jack => 'J',
        Queen => 'Q',
        King => 'K',
        Ace => 'A',
    }
}

fn trick_point_total(
    trick: &crate::domain::state::TrickState,
    point_values: &HashMap<String, i32>,
) -> i32 {
    trick
        .plays
        .iter()
        .map(|p| card_point_value(p.card, point_values))
        .sum()
}

/// Raw (unclamped) slough-points value. Exposed as a test seam: the public
/// `evaluate` clamps to `[0,1]` for UCB1's bounded-reward assumption, but the
/// pre-clamp arithmetic is itself a documented, testable quantity.
pub fn slough_eval_raw(state: &GameState, observer: PlayerId, params: &SloughParams) -> f64 {
    let base = default_eval(state, observer);
    let mut slough_raw = 0.0;
    for trick in &state.round.completed_tricks {
        if trick.winning_player_id == Some(observer) {
            // Winning the trick absorbs every point card played into it.
            slough_raw -= trick_point_total(trick, &params.point_values) as f64;
        } else if let Some(play) = trick.plays.iter().find(|p| p.player_id == observer) {
            // Didn't win: only the observer's own point card counts against them.
            let value = card_point_value(play.card, &params.point_values);
            slough_raw += value as f64;
        }
    }
    params.alpha * base + params.beta * (slough_raw / 26.0)
}

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Evaluates a terminal (or any intermediate) state from `observer`'s
/// perspective, dispatched by `kind`. Always finite and within `[0,1]`.
pub fn evaluate(state: &GameState, observer: PlayerId, kind: StrategyKind, params: &StrategyParams) -> f64 {
    match kind {
        StrategyKind::Default => clamp01(default_eval(state, observer)),
        StrategyKind::Aggressive => clamp01(aggressive_eval(state, observer, &params.aggressive)),
        StrategyKind::SloughPoints => clamp01(slough_eval_raw(state, observer, &params.slough)),
        // TODO: score progress toward the observer's own bid rather than raw
        // trick count once bid-aware evaluation is implemented.
        StrategyKind::BidAware => clamp01(default_eval(state, observer)),
    }
}
