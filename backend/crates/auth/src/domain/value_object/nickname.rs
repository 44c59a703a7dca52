//! Nickname Value Object
//!
//! Display name given to a profile at registration, e.g. `SwiftPanda42`.

use derive_more::Display;
use rand::Rng;
use serde::Serialize;

const ADJECTIVES: &[&str] = &[
    "Happy", "Brave", "Smart", "Kind", "Calm", "Wise", "Swift", "Bright", "Gentle", "Bold", "Cute",
    "Cool", "Fun", "Lively", "Quiet", "Energetic", "Creative", "Playful", "Serious", "Optimistic",
];

const NOUNS: &[&str] = &[
    "Panda", "Tiger", "Eagle", "Dolphin", "Fox", "Wolf", "Bear", "Lion", "Hawk", "Whale", "Rabbit",
    "Elephant", "Giraffe", "Monkey", "Penguin", "Hedgehog", "Squirrel", "Dino", "Parrot",
    "Hamster",
];

/// Exclusive upper bound of the numeric suffix
const SUFFIX_BOUND: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display)]
#[serde(transparent)]
pub struct Nickname(String);

impl Nickname {
    /// `<Adjective><Noun><0-99>`
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
        let noun = NOUNS[rng.random_range(0..NOUNS.len())];
        let number = rng.random_range(0..SUFFIX_BOUND);

        Self(format!("{adjective}{noun}{number}"))
    }

    pub fn from_db(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
