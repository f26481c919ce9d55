use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::errors::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

/// Trump designation for a round. `NoTrumps` means no suit automatically beats an
/// off-lead card; any of the four suit variants marks that suit as trump.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Trump {
    NoTrumps,
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Trump {
    pub fn suit(self) -> Option<Suit> {
        match self {
            Trump::NoTrumps => None,
            Trump::Clubs => Some(Suit::Clubs),
            Trump::Diamonds => Some(Suit::Diamonds),
            Trump::Hearts => Some(Suit::Hearts),
            Trump::Spades => Some(Suit::Spades),
        }
    }

    pub fn from_suit(suit: Suit) -> Trump {
        match suit {
            Suit::Clubs => Trump::Clubs,
            Suit::Diamonds => Trump::Diamonds,
            Suit::Hearts => Trump::Hearts,
            Suit::Spades => Trump::Spades,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

// Ord/Eq on Card is only for stable sorting: suit order C<D<H<S then rank order.
// Not used for trick resolution; use card_beats for that.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

fn rank_char(rank: Rank) -> char {
    match rank {
        Rank::Two => '2',
        Rank::Three => '3',
        Rank::Four => '4',
        Rank::Five => '5',
        Rank::Six => '6',
        Rank::Seven => '7',
        Rank::Eight => '8',
        Rank::Nine => '9',
        Rank::Ten => 'T',
        Rank::Jack => 'J',
        Rank::Queen => 'Q',
        Rank::King => 'K',
        Rank::Ace => 'A',
    }
}

fn suit_char(suit: Suit) -> char {
    match suit {
        Suit::Clubs => 'C',
        Suit::Diamonds => 'D',
        Suit::Hearts => 'H',
        Suit::Spades => 'S',
    }
}

fn rank_from_char(c: char) -> Option<Rank> {
    Some(match c {
        '2' => Rank::Two,
        '3' => Rank::Three,
        '4' => Rank::Four,
        '5' => Rank::Five,
        '6' => Rank::Six,
        '7' => Rank::Seven,
        '8' => Rank::Eight,
        '9' => Rank::Nine,
        'T' => Rank::Ten,
        'J' => Rank::Jack,
        'Q' => Rank::Queen,
        'K' => Rank::King,
        'A' => Rank::Ace,
        _ => return None,
    })
}

fn suit_from_char(c: char) -> Option<Suit> {
    Some(match c {
        'C' => Suit::Clubs,
        'D' => Suit::Diamonds,
        'H' => Suit::Hearts,
        'S' => Suit::Spades,
        _ => return None,
    })
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", rank_char(self.rank), suit_char(self.suit))
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_card_str(s)
    }
}

/// Parses a rank token that is either a single rank char (`"A"`, `"T"`, ...)
/// or the two-digit spelling of ten (`"10"`), as the fixture form writes it.
fn rank_from_token(s: &str) -> Option<Rank> {
    if s == "10" {
        return Some(Rank::Ten);
    }
    if s.len() == 1 {
        return rank_from_char(s.chars().next().unwrap());
    }
    None
}

fn parse_card_str(s: &str) -> Result<Card, DomainError> {
    // Accept the canonical wire form "AS" as well as the fixture form "S-A"
    // (and its ten spelled out as "S-10", per the fixture convention).
    if let Some((suit_part, rank_part)) = s.split_once('-') {
        if suit_part.len() == 1 {
            let suit = suit_from_char(suit_part.chars().next().unwrap())
                .ok_or_else(|| DomainError::ParseCard(s.to_string()))?;
            let rank =
                rank_from_token(rank_part).ok_or_else(|| DomainError::ParseCard(s.to_string()))?;
            return Ok(Card { suit, rank });
        }
        return Err(DomainError::ParseCard(s.to_string()));
    }

    if s.len() != 2 {
        return Err(DomainError::ParseCard(s.to_string()));
    }
    let mut chars = s.chars();
    let rank_ch = chars.next().unwrap();
    let suit_ch = chars.next().unwrap();
    let rank = rank_from_char(rank_ch).ok_or_else(|| DomainError::ParseCard(s.to_string()))?;
    let suit = suit_from_char(suit_ch).ok_or_else(|| DomainError::ParseCard(s.to_string()))?;
    Ok(Card { suit, rank })
}

impl Card {
    /// Parses the distilled test-fixture form `{SUIT_LETTER}-{RANK}` (e.g. `S-A`), in
    /// addition to the canonical wire form accepted by `FromStr`.
    pub fn from_fixture_str(s: &str) -> Result<Card, DomainError> {
        parse_card_str(s)
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_card_str(&s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for &suit in &ALL_SUITS {
        for &rank in &ALL_RANKS {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// True iff `a` beats `b` when both were played into a trick led in suit `lead`
/// under the given trump. Assumes `a` and `b` are distinct cards played into the
/// same trick (so this is never asked to break a tie).
pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Trump) -> bool {
    let trump_suit = trump.suit();
    let a_trump = trump_suit == Some(a.suit);
    let b_trump = trump_suit == Some(b.suit);
    if a_trump && !b_trump {
        return true;
    }
    if b_trump && !a_trump {
        return false;
    }
    if a_trump && b_trump {
        return a.rank > b.rank;
    }

    let a_follows = a.suit == lead;
    let b_follows = b.suit == lead;
    if a_follows && !b_follows {
        return true;
    }
    if b_follows && !a_follows {
        return false;
    }
    if a_follows && b_follows {
        return a.rank > b.rank;
    }
    false
}

#[cfg(test)]
pub fn parse_cards(tokens: &[&str]) -> Vec<Card> {
    tokens
        .iter()
        .map(|s| Card::from_str(s).expect("valid card token"))
        .collect()
}
