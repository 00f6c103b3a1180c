use std::path::PathBuf;

use banpick::{render_session, Side};
use clap::Parser;
use itertools::Itertools;
use judge::{run_draft, DraftData, DraftOutcome, FirstPickPolicy, Player, Recorder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the ally side's bot executable
    ally_bot: PathBuf,

    /// Path to the enemy side's bot executable
    enemy_bot: PathBuf,

    /// Path to the roster JSON snapshot
    #[arg(long, default_value = "data/roster.json")]
    roster: PathBuf,

    /// Path to the counter table JSON snapshot
    #[arg(long, default_value = "data/counters.json")]
    counters: PathBuf,

    /// How many drafts to run
    #[arg(short, long, default_value_t = 1)]
    num_drafts: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Which side makes the first pick
    #[arg(short, long, value_enum, default_value = "random")]
    first_pick: FirstPickPolicy,

    /// Stop as soon as one bot makes an illegal choice
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_choice: bool,

    /// Record the drafts' interactions as JSON files into this directory
    #[arg(short, long)]
    record_drafts_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct Tally {
    completed: usize,
    edge_sum: f64,
    illegal_choices: [usize; 2],
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_drafts_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let data = DraftData::load(&args.roster, &args.counters)?;

    let mut ally = Player::spawn(Side::Ally, &args.ally_bot)?;
    let mut enemy = Player::spawn(Side::Enemy, &args.enemy_bot)?;
    let player_names = [ally.name.clone(), enemy.name.clone()];

    let mut tally = Tally::default();
    let mut last_completed = None;
    for draft_idx in 0..args.num_drafts {
        match run_draft(
            &mut rng,
            &mut ally,
            &mut enemy,
            &data,
            args.first_pick,
            &mut recorder,
        )? {
            DraftOutcome::Completed {
                session,
                paper_edge,
            } => {
                debug!(draft_idx, paper_edge);
                tally.completed += 1;
                tally.edge_sum += paper_edge;
                last_completed = Some(session);
            }
            DraftOutcome::IllegalChoiceBySide { side, err } => {
                let player_idx = match side {
                    Side::Ally => 0,
                    Side::Enemy => 1,
                };
                info!(
                    player = player_names[player_idx],
                    draft_idx, "Illegal choice by bot"
                );
                let mut err_dyn = &err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    info!("{}", err_dyn);
                    err_dyn = src_err;
                }
                info!("{}", err_dyn);
                tally.illegal_choices[player_idx] += 1;
                if args.stop_on_illegal_choice {
                    break;
                }
            }
        }
    }

    ally.bye()?;
    enemy.bye()?;

    if let Some(session) = &last_completed {
        eprintln!("{}", render_session(session));
        eprintln!(
            "Ally team:  {}\nEnemy team: {}",
            session.picks(Side::Ally).iter().join(", "),
            session.picks(Side::Enemy).iter().join(", "),
        );
    }
    let mean_edge = if tally.completed > 0 {
        tally.edge_sum / tally.completed as f64
    } else {
        0.0
    };
    eprintln!(
        "End result:\n- {} drafts completed, mean paper edge {:+.2} for the ally side\n- {} illegal choices by {}\n- {} illegal choices by {}",
        tally.completed,
        mean_edge,
        tally.illegal_choices[0],
        player_names[0],
        tally.illegal_choices[1],
        player_names[1],
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
