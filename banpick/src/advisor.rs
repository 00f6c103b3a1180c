use crate::{CounterTable, Roster, Tier};

/// A scored candidate produced by [`Advisor::recommend`].
#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub name: String,
    pub score: f64,
}

/// Ranks pick candidates by how well they answer the opponent's picks.
///
/// Purely functional over the counter table snapshot (and, when tier
/// bonuses are enabled, the roster snapshot); it never touches draft state.
#[derive(Clone, Debug)]
pub struct Advisor<'a> {
    counters: &'a CounterTable,
    // When present, tiers contribute a flat bonus on top of the average.
    tiers: Option<&'a Roster>,
}

fn tier_bonus(tier: Tier) -> f64 {
    match tier {
        Tier::S => 3.0,
        Tier::A => 1.0,
        Tier::B => -1.0,
        Tier::C => -3.0,
    }
}

impl<'a> Advisor<'a> {
    pub fn new(counters: &'a CounterTable) -> Self {
        Self {
            counters,
            tiers: None,
        }
    }

    /// Like [`new`](Self::new), but adds a static tier bonus to each scored
    /// candidate: S +3, A +1, B −1, C −3, untiered or unknown +0.
    pub fn with_tier_bonus(counters: &'a CounterTable, roster: &'a Roster) -> Self {
        Self {
            counters,
            tiers: Some(roster),
        }
    }

    /// Scores every candidate in `pool` against `opponent_picks` and
    /// returns them best first.
    ///
    /// A candidate's score is the mean counter value against each opponent
    /// pick (50 for pairs without an entry), plus the tier bonus when
    /// enabled. With no opponent picks there is nothing to rank on: every
    /// candidate scores 0 and the pool order is kept as given. Equal scores
    /// are ordered by ascending name; callers should not rely on tie order
    /// beyond it being deterministic.
    pub fn recommend(&self, opponent_picks: &[String], pool: &[String]) -> Vec<Recommendation> {
        if opponent_picks.is_empty() {
            return pool
                .iter()
                .map(|name| Recommendation {
                    name: name.clone(),
                    score: 0.0,
                })
                .collect();
        }

        let mut recommendations: Vec<Recommendation> = pool
            .iter()
            .map(|name| {
                let total: f64 = opponent_picks
                    .iter()
                    .map(|opponent| f64::from(self.counters.value(name, opponent)))
                    .sum();
                let mut score = total / opponent_picks.len() as f64;
                if let Some(roster) = self.tiers {
                    if let Some(tier) = roster.tier_of(name) {
                        score += tier_bonus(tier);
                    }
                }
                Recommendation {
                    name: name.clone(),
                    score,
                }
            })
            .collect();

        recommendations.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.name.cmp(&b.name))
        });
        recommendations
    }
}
