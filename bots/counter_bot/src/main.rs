use banpick::{Advisor, Character, CounterEntry, CounterTable, Roster, Side, Tier};
use banpick_bot_utils::Bot;
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    CounterBot {
        rng,
        knowledge: None,
    }
    .run()
}

struct DraftKnowledge {
    roster: Roster,
    counters: CounterTable,
}

/// Bans the biggest all-round threat, picks the advisor's favorite against
/// the opponent's team so far.
struct CounterBot {
    rng: StdRng,
    knowledge: Option<DraftKnowledge>,
}

fn tier_rank(tier: Option<Tier>) -> u8 {
    match tier {
        Some(Tier::S) => 0,
        Some(Tier::A) => 1,
        Some(Tier::B) => 2,
        Some(Tier::C) => 3,
        None => 4,
    }
}

impl CounterBot {
    fn knowledge(&self) -> &DraftKnowledge {
        self.knowledge
            .as_ref()
            .expect("NewDraft arrives before any choice request")
    }

    /// Mean counter value of a character into the rest of the roster: how
    /// much of the pool it threatens.
    fn threat_score(&self, name: &str) -> f64 {
        let knowledge = self.knowledge();
        let mut total = 0.0;
        let mut count = 0;
        for other in knowledge.roster.names().filter(|other| *other != name) {
            total += f64::from(knowledge.counters.value(name, other));
            count += 1;
        }
        if count == 0 {
            0.0
        } else {
            total / f64::from(count)
        }
    }

    fn most_threatening(&mut self, available: &[String]) -> String {
        // Collect every candidate tied for the top score, then let the rng
        // break the tie.
        let mut top_choices: Vec<&String> = Vec::new();
        let mut top_score = f64::NEG_INFINITY;
        for name in available {
            let score = self.threat_score(name);
            match score.total_cmp(&top_score) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    top_choices.push(name);
                }
                std::cmp::Ordering::Greater => {
                    top_choices = vec![name];
                    top_score = score;
                }
            }
        }
        top_choices
            .choose(&mut self.rng)
            .expect("the judge always offers at least one character")
            .to_string()
    }
}

impl Bot for CounterBot {
    fn new_draft(&mut self, _side: Side, roster: Vec<Character>, counters: Vec<CounterEntry>) {
        self.knowledge = Some(DraftKnowledge {
            roster: Roster::new(roster),
            counters: CounterTable::new(counters),
        });
    }

    fn choose_ban(
        &mut self,
        available: Vec<String>,
        _own_bans: Vec<String>,
        _opponent_bans: Vec<String>,
    ) -> String {
        self.most_threatening(&available)
    }

    fn choose_pick(
        &mut self,
        available: Vec<String>,
        _own_picks: Vec<String>,
        opponent_picks: Vec<String>,
    ) -> String {
        let knowledge = self.knowledge();
        if opponent_picks.is_empty() {
            // Nothing to counter yet: take the best-tiered character.
            let mut candidates = available;
            candidates.sort_by_key(|name| (tier_rank(knowledge.roster.tier_of(name)), name.clone()));
            return candidates
                .into_iter()
                .next()
                .expect("the judge always offers at least one character");
        }
        let advisor = Advisor::with_tier_bonus(&knowledge.counters, &knowledge.roster);
        let recommendations = advisor.recommend(&opponent_picks, &available);
        recommendations
            .first()
            .expect("the judge always offers at least one character")
            .name
            .clone()
    }
}
