use banpick::{Character, CounterEntry, Side};
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

    RandomBot { rng }.run()
}

struct RandomBot {
    rng: StdRng,
}

impl Bot for RandomBot {
    fn new_draft(&mut self, _side: Side, _roster: Vec<Character>, _counters: Vec<CounterEntry>) {}

    fn choose_ban(
        &mut self,
        available: Vec<String>,
        _own_bans: Vec<String>,
        _opponent_bans: Vec<String>,
    ) -> String {
        available.choose(&mut self.rng).unwrap().clone()
    }

    fn choose_pick(
        &mut self,
        available: Vec<String>,
        _own_picks: Vec<String>,
        _opponent_picks: Vec<String>,
    ) -> String {
        available.choose(&mut self.rng).unwrap().clone()
    }
}
