use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use banpick::{Character, CounterEntry, CounterTable, Roster, BANS_PER_SIDE, PICKS_TOTAL};

/// The read-only snapshots a draft runs against, loaded before any session
/// state exists.
///
/// The raw vectors are kept alongside the built lookup structures because
/// `NewDraft` ships them to the bots verbatim.
pub struct DraftData {
    pub characters: Vec<Character>,
    pub counter_entries: Vec<CounterEntry>,
    pub roster: Roster,
    pub counters: CounterTable,
}

impl DraftData {
    /// Loads and validates both snapshots. Malformed snapshots fail here,
    /// at the load boundary, never inside the draft core.
    pub fn load(roster_path: &Path, counters_path: &Path) -> anyhow::Result<Self> {
        let characters: Vec<Character> = read_json(roster_path).with_context(|| {
            format!(
                "Failed to load the roster snapshot from '{}'",
                roster_path.display()
            )
        })?;
        let counter_entries: Vec<CounterEntry> = read_json(counters_path).with_context(|| {
            format!(
                "Failed to load the counter snapshot from '{}'",
                counters_path.display()
            )
        })?;

        let roster = Roster::new(characters.iter().cloned());
        let needed = 2 * BANS_PER_SIDE + PICKS_TOTAL;
        if roster.len() < needed {
            anyhow::bail!(
                "A full draft uses {} distinct characters, but the roster only has {}",
                needed,
                roster.len()
            );
        }
        let counters = CounterTable::new(counter_entries.iter().cloned());

        Ok(Self {
            characters,
            counter_entries,
            roster,
            counters,
        })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
