use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The effectiveness value used when no entry exists for an ordered pair.
pub const NEUTRAL_VALUE: u8 = 50;

/// A directed matchup record: how favorably `attacker` matches into
/// `defender`, on a 0–100 scale.
///
/// The pair is ordered; `(A, B)` and `(B, A)` are independent entries and
/// are not required to sum to 100 even though the editing workflow usually
/// keeps them that way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterEntry {
    pub attacker: String,
    pub defender: String,
    pub value: u8,
}

/// Lookup table over [`CounterEntry`] records, built once per session.
///
/// A missing pair is a valid state, not an error: it reads as
/// [`NEUTRAL_VALUE`].
#[derive(Clone, Debug, Default)]
pub struct CounterTable {
    // attacker -> defender -> value
    values: HashMap<String, HashMap<String, u8>>,
    len: usize,
}

impl CounterTable {
    /// Builds the table. When the same ordered pair appears more than once,
    /// the later entry wins.
    pub fn new(entries: impl IntoIterator<Item = CounterEntry>) -> Self {
        let mut values: HashMap<String, HashMap<String, u8>> = HashMap::new();
        for entry in entries {
            values
                .entry(entry.attacker)
                .or_default()
                .insert(entry.defender, entry.value);
        }
        let len = values.values().map(HashMap::len).sum();
        Self { values, len }
    }

    /// The effectiveness of `attacker` against `defender`, neutral when the
    /// pair has no entry.
    pub fn value(&self, attacker: &str, defender: &str) -> u8 {
        self.values
            .get(attacker)
            .and_then(|row| row.get(defender))
            .copied()
            .unwrap_or(NEUTRAL_VALUE)
    }

    /// Number of distinct ordered pairs with an entry.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl FromIterator<CounterEntry> for CounterTable {
    fn from_iter<I: IntoIterator<Item = CounterEntry>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(attacker: &str, defender: &str, value: u8) -> CounterEntry {
        CounterEntry {
            attacker: attacker.to_string(),
            defender: defender.to_string(),
            value,
        }
    }

    #[test]
    fn missing_pair_is_neutral() {
        let table = CounterTable::new([entry("Pikachu", "Snorlax", 70)]);
        assert_eq!(table.value("Pikachu", "Snorlax"), 70);
        assert_eq!(table.value("Snorlax", "Pikachu"), NEUTRAL_VALUE);
        assert_eq!(table.value("Eevee", "Snorlax"), NEUTRAL_VALUE);
    }

    #[test]
    fn directed_pairs_are_independent() {
        let table = CounterTable::new([entry("A", "B", 80), entry("B", "A", 35)]);
        assert_eq!(table.value("A", "B"), 80);
        assert_eq!(table.value("B", "A"), 35);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn later_duplicate_wins() {
        let table = CounterTable::new([entry("A", "B", 80), entry("A", "B", 20)]);
        assert_eq!(table.value("A", "B"), 20);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn snapshot_field_names() {
        let entry: CounterEntry =
            serde_json::from_str(r#"{"attacker": "Pikachu", "defender": "Snorlax", "value": 70}"#)
                .unwrap();
        assert_eq!(entry.attacker, "Pikachu");
        assert_eq!(entry.defender, "Snorlax");
        assert_eq!(entry.value, 70);
    }
}
