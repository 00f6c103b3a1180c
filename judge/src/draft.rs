use std::collections::HashSet;

use banpick::{Advisor, DraftSession, Okay, Phase, Request, Selection, Side};
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::data::DraftData;
use crate::error::IllegalChoice;
use crate::player::Player;
use crate::recording::Recorder;

/// How the first picker is decided once the ban phases end.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum FirstPickPolicy {
    Ally,
    Enemy,
    Random,
}

impl FirstPickPolicy {
    fn resolve(self, rng: &mut StdRng) -> Side {
        match self {
            FirstPickPolicy::Ally => Side::Ally,
            FirstPickPolicy::Enemy => Side::Enemy,
            FirstPickPolicy::Random => {
                if rng.gen::<bool>() {
                    Side::Ally
                } else {
                    Side::Enemy
                }
            }
        }
    }
}

/// Summarizes the outcome of one draft.
pub enum DraftOutcome {
    Completed {
        session: DraftSession,
        /// Mean advisor score of the ally team against the enemy team,
        /// minus the reverse. Positive: the ally team counters better on
        /// paper.
        paper_edge: f64,
    },
    IllegalChoiceBySide {
        side: Side,
        err: IllegalChoice,
    },
}

/// Walks one full draft between the two bots. Returns an error only on
/// communication failure, not when a bot makes an illegal choice.
pub fn run_draft(
    rng: &mut StdRng,
    ally: &mut Player,
    enemy: &mut Player,
    data: &DraftData,
    first_pick: FirstPickPolicy,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<DraftOutcome> {
    let mut session = DraftSession::new();
    // Bots always draft from the full pool; the owned-characters filter is
    // an interactive-front-end concern.
    let no_owned = HashSet::new();

    for player in [&mut *ally, &mut *enemy] {
        let _: Okay = player.perform_request(
            recorder,
            &Request::NewDraft {
                side: player.side,
                roster: data.characters.clone(),
                counters: data.counter_entries.clone(),
            },
        )?;
    }

    loop {
        match session.phase() {
            Phase::Complete => break,
            Phase::AskFirstPick => {
                let side = first_pick.resolve(rng);
                debug!(first_picker = %side);
                session
                    .commit_first_pick(side)
                    .expect("the session is at the decision point");
            }
            phase => {
                let side = session
                    .current_side()
                    .expect("ban and pick phases always have an acting side");
                // The pool keeps banned characters visible while banning;
                // only offer the bots what `select` would actually accept.
                let available: Vec<String> = session
                    .available_pool(&data.roster, &no_owned)
                    .iter()
                    .filter(|c| !session.is_recorded(&c.name))
                    .map(|c| c.name.clone())
                    .collect();
                let req = if phase == Phase::Pick {
                    Request::ChoosePick {
                        available: available.clone(),
                        own_picks: session.picks(side).to_vec(),
                        opponent_picks: session.picks(side.other()).to_vec(),
                    }
                } else {
                    Request::ChooseBan {
                        available: available.clone(),
                        own_bans: session.bans(side).to_vec(),
                        opponent_bans: session.bans(side.other()).to_vec(),
                    }
                };
                let player = match side {
                    Side::Ally => &mut *ally,
                    Side::Enemy => &mut *enemy,
                };
                let Selection(name) = player.perform_request(recorder, &req)?;
                if !available.contains(&name) {
                    return Ok(DraftOutcome::IllegalChoiceBySide {
                        side,
                        err: IllegalChoice::NotAvailable { name },
                    });
                }
                if let Err(err) = session.select(&name) {
                    return Ok(DraftOutcome::IllegalChoiceBySide {
                        side,
                        err: IllegalChoice::RejectedBySequencer { name, err },
                    });
                }
            }
        }
    }

    if let Some(rec) = recorder {
        rec.write_draft_recording()?;
    }

    let paper_edge = paper_edge(&session, data);
    Ok(DraftOutcome::Completed {
        session,
        paper_edge,
    })
}

fn paper_edge(session: &DraftSession, data: &DraftData) -> f64 {
    let advisor = Advisor::new(&data.counters);
    let mean_score = |own: &[String], opponents: &[String]| -> f64 {
        let recs = advisor.recommend(opponents, own);
        recs.iter().map(|r| r.score).sum::<f64>() / recs.len() as f64
    };
    mean_score(session.picks(Side::Ally), session.picks(Side::Enemy))
        - mean_score(session.picks(Side::Enemy), session.picks(Side::Ally))
}

#[cfg(test)]
mod tests {
    use banpick::{CounterEntry, CounterTable, Roster};

    use super::*;

    #[test]
    fn paper_edge_reflects_the_counter_table() {
        let mut session = DraftSession::new();
        for name in ["b1", "b2", "b3", "b4", "b5", "b6"] {
            session.select(name).unwrap();
        }
        session.commit_first_pick(Side::Ally).unwrap();
        // Ally ends with a1..a5, enemy with e1..e5.
        for name in ["a1", "e1", "e2", "a2", "a3", "e3", "e4", "a4", "a5", "e5"] {
            session.select(name).unwrap();
        }
        assert_eq!(session.phase(), Phase::Complete);

        let entries = vec![CounterEntry {
            attacker: "a1".to_string(),
            defender: "e1".to_string(),
            value: 100,
        }];
        let data = DraftData {
            characters: Vec::new(),
            counter_entries: entries.clone(),
            roster: Roster::default(),
            counters: CounterTable::new(entries),
        };
        // One 100-valued entry among otherwise neutral pairs: the ally mean
        // rises by (100 - 50) / (5 * 5).
        let edge = paper_edge(&session, &data);
        assert!((edge - 2.0).abs() < 1e-9, "edge = {}", edge);
    }
}
