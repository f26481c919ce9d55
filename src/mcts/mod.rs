//! The information-set Monte Carlo tree search engine.
//!
//! Every iteration re-determinizes the hidden information (§ the
//! `determinize` module), descends the tree under UCB1 filtered to moves
//! legal in the current sample, expands one node, rolls out to a terminal
//! state with a uniform-random policy, and backpropagates a single scalar
//! reward from the observer's perspective up the path taken.

mod node;

use std::time::{Duration, Instant};

use rand::RngCore;

use crate::config::{EngineConfig, ExpansionPolicy};
use crate::determinize::determinize_with_retries;
use crate::domain::cards::{Card, Rank};
use crate::domain::rules::{complete_trick, legal_moves, play_card};
use crate::domain::state::{GameState, PlayerId, Phase, PLAYERS};
use crate::instrumentation::{InstrumentationSink, NoopSink};
use crate::strategy::evaluate;

pub use node::Node;

const EXPLORATION_C: f64 = std::f64::consts::SQRT_2;

fn rank_value(rank: Rank) -> u8 {
    use Rank::*;
    match rank {
        Two => 2,
        Three => 3,
        Four => 4,
        Five => 5,
        Six => 6,
        Seven => 7,
        Eight => 8,
        Nine => 9,
        Ten => 10,
        Jack => 11,
        Queen => 12,
        King => 13,
        Ace => 14,
    }
}

fn is_terminal(state: &GameState) -> bool {
    state.phase != Phase::Trick
}

fn current_player(state: &GameState) -> Option<PlayerId> {
    let trick = state.round.trick_in_progress.as_ref()?;
    Some((trick.leader_player_id + trick.plays.len() as PlayerId) % PLAYERS as PlayerId)
}

/// Plays `card` for whoever is on turn in `state`, completing the trick (and
/// crediting its winner) if that was the fourth play. Returns the player who
/// made the play.
fn apply_move(
    state: &mut GameState,
    card: Card,
    can_lead_trump_before_broken: bool,
) -> Option<PlayerId> {
    let player = current_player(state)?;
    play_card(state, player, card, can_lead_trump_before_broken).ok()?;
    if let Some(trick) = &state.round.trick_in_progress {
        if trick.plays.len() == PLAYERS {
            let _ = complete_trick(state);
        }
    }
    Some(player)
}

/// An information-set MCTS search rooted at one observer's view of a game in
/// progress. Owns its arena-allocated tree; dropped wholesale when it goes
/// out of scope.
pub struct Mcts {
    root_state: GameState,
    observer: PlayerId,
    config: EngineConfig,
    nodes: Vec<Node>,
    sink: Box<dyn InstrumentationSink>,
}

impl Mcts {
    pub fn new(root_state: GameState, observer: PlayerId, config: EngineConfig) -> Mcts {
        Mcts {
            root_state,
            observer,
            config,
            nodes: Vec::new(),
            sink: Box::new(NoopSink),
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn InstrumentationSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Runs the search for up to `budget`, polling the wall clock at the top
    /// of each iteration. May overrun by at most one in-flight iteration.
    pub fn search(&mut self, rng: &mut impl RngCore, budget: Duration) -> Option<Card> {
        let start = Instant::now();
        self.search_with_cancel(rng, || start.elapsed() >= budget)
    }

    /// Runs the search until `should_stop` returns true, checked at the top
    /// of each iteration (not preemptively). Returns `None` if zero
    /// iterations completed or the root has no legal moves.
    pub fn search_with_cancel(
        &mut self,
        rng: &mut impl RngCore,
        mut should_stop: impl FnMut() -> bool,
    ) -> Option<Card> {
        let start = Instant::now();
        self.sink.decision_start(self.observer);

        let root_moves = legal_moves(&self.root_state, self.config.can_lead_trump_before_broken);
        self.nodes = vec![Node::root(root_moves)];

        let mut iterations: u32 = 0;
        while !should_stop() {
            self.iterate(rng);
            iterations += 1;
        }

        let chosen = self.best_move();
        self.sink
            .decision_end(chosen, iterations, start.elapsed());
        chosen
    }

    fn iterate(&mut self, rng: &mut impl RngCore) {
        let determinization = determinize_with_retries(
            &self.root_state,
            self.observer,
            rng,
            self.sink.as_ref(),
            self.config.max_determinization_retries,
        );
        let mut working = determinization.state;
        let can_lead = self.config.can_lead_trump_before_broken;

        let mut path = vec![0usize];
        let mut node_idx = 0usize;

        // SELECT
        loop {
            if is_terminal(&working) {
                break;
            }
            let legal_now = legal_moves(&working, can_lead);
            let untried_here: Vec<Card> = self.nodes[node_idx]
                .untried_moves
                .iter()
                .copied()
                .filter(|c| legal_now.contains(c))
                .collect();
            if !untried_here.is_empty() {
                break;
            }
            let legal_children: Vec<usize> = self.nodes[node_idx]
                .children
                .iter()
                .copied()
                .filter(|&c| {
                    self.nodes[c]
                        .move_
                        .map(|m| legal_now.contains(&m))
                        .unwrap_or(false)
                })
                .collect();
            if legal_children.is_empty() {
                break;
            }
            let parent_visits = self.nodes[node_idx].visits;
            let chosen = self.select_ucb1(&legal_children, parent_visits);
            let mv = self.nodes[chosen].move_.expect("child always has a move");
            apply_move(&mut working, mv, can_lead);
            node_idx = chosen;
            path.push(node_idx);
        }

        // EXPAND
        if !is_terminal(&working) {
            let legal_now = legal_moves(&working, can_lead);
            let untried_here: Vec<Card> = self.nodes[node_idx]
                .untried_moves
                .iter()
                .copied()
                .filter(|c| legal_now.contains(c))
                .collect();
            if !untried_here.is_empty() {
                let mv = self.pick_expansion(&untried_here, rng);
                if let Some(player) = apply_move(&mut working, mv, can_lead) {
                    let child_untried = legal_moves(&working, can_lead);
                    let child = Node::child(node_idx, mv, player, child_untried);
                    let child_idx = self.nodes.len();
                    self.nodes.push(child);
                    self.nodes[node_idx].children.push(child_idx);
                    node_idx = child_idx;
                    path.push(node_idx);
                }
            }
        }

        // SIMULATE
        while !is_terminal(&working) {
            let legal = legal_moves(&working, can_lead);
            if legal.is_empty() {
                break;
            }
            let idx = (rng.next_u32() as usize) % legal.len();
            apply_move(&mut working, legal[idx], can_lead);
        }

        // EVALUATE
        let score = evaluate(
            &working,
            self.observer,
            self.config.strategy,
            &self.config.strategy_params,
        );

        // BACKPROPAGATE
        for &idx in &path {
            self.nodes[idx].visits += 1;
            self.nodes[idx].wins += score;
        }
    }

    fn pick_expansion(&self, untried: &[Card], rng: &mut impl RngCore) -> Card {
        match self.config.expansion_policy {
            ExpansionPolicy::FirstUntried => untried[0],
            ExpansionPolicy::RandomUntried => {
                let idx = (rng.next_u32() as usize) % untried.len();
                untried[idx]
            }
        }
    }

    fn select_ucb1(&self, candidates: &[usize], parent_visits: u32) -> usize {
        let ln_parent = (parent_visits.max(1) as f64).ln();
        *candidates
            .iter()
            .max_by(|&&a, &&b| {
                let ucb = |idx: usize| -> f64 {
                    let node = &self.nodes[idx];
                    if node.visits == 0 {
                        return f64::INFINITY;
                    }
                    let exploitation = node.wins / node.visits as f64;
                    let exploration =
                        EXPLORATION_C * (ln_parent / node.visits as f64).sqrt();
                    exploitation + exploration
                };
                ucb(a)
                    .partial_cmp(&ucb(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("candidates is non-empty")
    }

    /// Best root child by lexicographic `(rank_value(move), visits)` —
    /// among moves of the same apparent strength, prefer the most-explored.
    fn best_move(&self) -> Option<Card> {
        self.nodes[0]
            .children
            .iter()
            .filter_map(|&idx| {
                let node = &self.nodes[idx];
                node.move_.map(|mv| (idx, mv))
            })
            .max_by_key(|(idx, mv)| (rank_value(mv.rank), self.nodes[*idx].visits))
            .map(|(_, mv)| mv)
    }

    /// Total nodes allocated this search; bounded by `iterations + 1`.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
