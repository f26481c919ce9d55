//! Proptest generators for the card/trick domain, mirroring the teacher's
//! `test_gens` module shape.
#![cfg(test)]

use proptest::prelude::*;

use crate::domain::cards::{Card, Rank, Suit, Trump, ALL_RANKS, ALL_SUITS};
use crate::domain::state::PlayerId;

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

pub fn trump() -> impl Strategy<Value = Trump> {
    prop_oneof![
        Just(Trump::NoTrumps),
        Just(Trump::Clubs),
        Just(Trump::Diamonds),
        Just(Trump::Hearts),
        Just(Trump::Spades),
    ]
}

pub fn trump_suit() -> impl Strategy<Value = Trump> {
    prop_oneof![
        Just(Trump::Clubs),
        Just(Trump::Diamonds),
        Just(Trump::Hearts),
        Just(Trump::Spades),
    ]
}

pub fn rank() -> impl Strategy<Value = Rank> {
    (0usize..ALL_RANKS.len()).prop_map(|i| ALL_RANKS[i])
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

pub fn player_id() -> impl Strategy<Value = PlayerId> {
    0u8..=3u8
}

fn full_deck_vec() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for &s in &ALL_SUITS {
        for &r in &ALL_RANKS {
            deck.push(Card { suit: s, rank: r });
        }
    }
    deck
}

/// `count` distinct cards drawn from the standard deck, order randomized.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut deck = full_deck_vec();
        let n = deck.len();
        for i in 0..count.min(n) {
            let j = rng.random_range(i..n);
            deck.swap(i, j);
        }
        deck.truncate(count.min(n));
        deck
    })
}

pub fn unique_cards_up_to(max_count: usize) -> impl Strategy<Value = Vec<Card>> {
    (1..=max_count.max(1)).prop_flat_map(unique_cards)
}

pub fn hand() -> impl Strategy<Value = Vec<Card>> {
    unique_cards_up_to(13)
}

/// A card of `excluded_suit`'s complement, i.e. a hand guaranteed void in
/// `excluded_suit`.
pub fn hand_without_suit(excluded_suit: Suit) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut deck: Vec<Card> = full_deck_vec()
            .into_iter()
            .filter(|c| c.suit != excluded_suit)
            .collect();
        let n = deck.len();
        let count = rng.random_range(1..=n.min(13));
        for i in 0..count {
            let j = rng.random_range(i..n);
            deck.swap(i, j);
        }
        deck.truncate(count);
        deck
    })
}

pub fn two_distinct_cards() -> impl Strategy<Value = (Card, Card)> {
    unique_cards(2).prop_map(|v| (v[0], v[1]))
}
