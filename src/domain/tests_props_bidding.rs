//! Property tests for the bidding/trump-selection slice of the state machine.
#![cfg(test)]

use proptest::prelude::*;

use crate::domain::cards::Card;
use crate::domain::rules::{legal_bids, place_bid};
use crate::domain::test_state_helpers::init_bidding;

fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 32,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn prop_legal_bids_is_full_range(hand_size in 1u8..=13u8) {
        let hands: [Vec<Card>; 4] = Default::default();
        let mut state = init_bidding(hands, 0);
        state.hand_size = hand_size;
        let bids = legal_bids(&state);
        prop_assert_eq!(bids.len(), hand_size as usize + 1);
        prop_assert_eq!(*bids.first().unwrap(), 0);
        prop_assert_eq!(*bids.last().unwrap(), hand_size);
    }

    #[test]
    fn prop_bidding_resolves_after_all_four_bid(seed_bid in 0u8..=5u8) {
        let hands: [Vec<Card>; 4] = Default::default();
        let mut state = init_bidding(hands, 0);
        state.hand_size = 5;
        for pid in 0..4u8 {
            place_bid(&mut state, pid, (seed_bid + pid) % 6).unwrap();
        }
        prop_assert!(state.round.winning_bidder.is_some());
        prop_assert_eq!(state.phase, crate::domain::state::Phase::TrumpSelect);
    }
}
