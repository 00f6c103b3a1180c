use crate::{Character, CounterEntry, Role, Side, Tier, BANS_PER_SIDE, PICKS_TOTAL};

/// A partially played draft: 16 distinct character names, a first picker,
/// and how many of the 17 mutating operations (3 + 3 bans, the first pick
/// commit, 10 picks) to replay.
#[derive(Clone, Debug)]
pub struct DraftScript {
    pub names: Vec<String>,
    pub first_picker: Side,
    pub stop_after: usize,
}

impl quickcheck::Arbitrary for DraftScript {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // The index prefix keeps the names distinct no matter what the
        // generator appends.
        let names = (0..2 * BANS_PER_SIDE + PICKS_TOTAL)
            .map(|i| format!("c{}-{}", i, u8::arbitrary(g)))
            .collect();
        DraftScript {
            names,
            first_picker: Side::arbitrary(g),
            stop_after: usize::arbitrary(g) % (2 * BANS_PER_SIDE + PICKS_TOTAL + 2),
        }
    }
}

impl quickcheck::Arbitrary for Side {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Side::Ally, Side::Enemy]).unwrap()
    }
}

impl quickcheck::Arbitrary for Role {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Role::ALL).unwrap()
    }
}

impl quickcheck::Arbitrary for Tier {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Tier::S, Tier::A, Tier::B, Tier::C]).unwrap()
    }
}

impl quickcheck::Arbitrary for Character {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Character {
            name: String::arbitrary(g),
            role: Role::arbitrary(g),
            tier: Option::<Tier>::arbitrary(g),
            image_url: String::new(),
        }
    }
}

impl quickcheck::Arbitrary for CounterEntry {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        CounterEntry {
            attacker: String::arbitrary(g),
            defender: String::arbitrary(g),
            value: u8::arbitrary(g) % 101,
        }
    }
}
