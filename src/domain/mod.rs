pub mod cards;
pub mod errors;
pub mod rules;
pub mod state;

#[cfg(test)]
pub mod test_gens;
#[cfg(test)]
pub mod test_state_helpers;
#[cfg(test)]
mod tests_props_tricks;
#[cfg(test)]
mod tests_props_bidding;

pub use cards::{card_beats, hand_has_suit, Card, Rank, Suit, Trump};
pub use errors::DomainError;
pub use rules::{
    apply_round_scoring, can_lead_trump, complete_trick, legal_bids, legal_moves, place_bid,
    play_card, set_trump,
};
pub use state::{GameState, Phase, PlayerId, RoundState, TrickPlay, TrickState, PLAYERS};
