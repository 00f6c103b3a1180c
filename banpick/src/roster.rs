use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One pickable character of the game's roster.
///
/// The name is the identity key throughout the draft; two characters with
/// the same name are the same character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub tier: Option<Tier>,
    /// Display artwork, passed through to front ends untouched.
    #[serde(default)]
    pub image_url: String,
}

/// The battle role of a [character](Character).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Attacker,
    Defender,
    Supporter,
    #[serde(rename = "All-Rounder")]
    AllRounder,
    Speedster,
}

/// Static strength grade of a [character](Character), best first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // pad() keeps width specifiers working in table layouts
        f.pad(self.as_str())
    }
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Attacker,
        Role::Defender,
        Role::Supporter,
        Role::AllRounder,
        Role::Speedster,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Attacker => "Attacker",
            Role::Defender => "Defender",
            Role::Supporter => "Supporter",
            Role::AllRounder => "All-Rounder",
            Role::Speedster => "Speedster",
        }
    }
}

/// The error type for the [`FromStr`] instances of [`Role`] and [`Tier`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownVariant {
    pub input: String,
    pub expected: &'static str,
}

impl std::error::Error for UnknownVariant {}

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not one of {}", self.input, self.expected)
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Attacker" => Ok(Role::Attacker),
            "Defender" => Ok(Role::Defender),
            "Supporter" => Ok(Role::Supporter),
            "All-Rounder" => Ok(Role::AllRounder),
            "Speedster" => Ok(Role::Speedster),
            _ => Err(UnknownVariant {
                input: s.to_string(),
                expected: "Attacker, Defender, Supporter, All-Rounder, Speedster",
            }),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
        })
    }
}

impl FromStr for Tier {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(Tier::S),
            "A" => Ok(Tier::A),
            "B" => Ok(Tier::B),
            "C" => Ok(Tier::C),
            _ => Err(UnknownVariant {
                input: s.to_string(),
                expected: "S, A, B, C",
            }),
        }
    }
}

/// The immutable character snapshot a draft session runs against.
///
/// Loaded once per session from the external collaborator; the core never
/// mutates it. Iteration yields characters in load order, which is also the
/// display order front ends fall back to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    /// Builds a roster, keeping load order. If a name appears more than
    /// once, the later record replaces the earlier one in place.
    pub fn new(characters: impl IntoIterator<Item = Character>) -> Self {
        let mut deduped: Vec<Character> = Vec::new();
        for character in characters {
            if let Some(existing) = deduped.iter_mut().find(|c| c.name == character.name) {
                *existing = character;
            } else {
                deduped.push(character);
            }
        }
        Self {
            characters: deduped,
        }
    }

    // Rosters hold a few dozen entries, so lookup is a plain scan.
    pub fn get(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn tier_of(&self, name: &str) -> Option<Tier> {
        self.get(name).and_then(|c| c.tier)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Character> {
        self.characters.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.characters.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl FromIterator<Character> for Roster {
    fn from_iter<I: IntoIterator<Item = Character>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Character;
    type IntoIter = std::slice::Iter<'a, Character>;

    fn into_iter(self) -> Self::IntoIter {
        self.characters.iter()
    }
}
