//! Information-Set Monte Carlo Tree Search decision engine for a
//! partially-observable, trump-based, follow-suit trick-taking card game.
//!
//! Given one player's view of a round in progress — their hand, the trick
//! currently open, trump, bids, and completed-trick history — [`mcts::Mcts`]
//! searches under a wall-clock budget and returns the card that player
//! should play next. The engine never mutates the caller's state: every
//! search iteration works on a freshly determinized clone.
//!
//! Consulting this engine to reconstruct state from an external payload,
//! exporting its instrumentation to a metrics backend, and the policy used
//! to place bids are all out of scope here — those are the responsibility
//! of whatever embeds this crate.

pub mod config;
pub mod determinize;
pub mod domain;
pub mod instrumentation;
pub mod mcts;
pub mod strategy;

pub use config::EngineConfig;
pub use determinize::{determinize, determinize_with_retries, Determinization};
pub use domain::{
    apply_round_scoring, can_lead_trump, complete_trick, legal_bids, legal_moves, place_bid,
    play_card, set_trump, Card, DomainError, GameState, Phase, PlayerId, Rank, RoundState, Suit,
    TrickPlay, TrickState, Trump,
};
pub use instrumentation::{InstrumentationSink, LogLevel, NoopSink, TracingSink};
pub use mcts::Mcts;
pub use strategy::{evaluate, StrategyKind, StrategyParams};
