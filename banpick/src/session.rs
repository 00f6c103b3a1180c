use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Character, InvalidPhaseTransition, InvalidSelection, Role, Roster};

pub const BANS_PER_SIDE: usize = 3;
pub const PICKS_PER_SIDE: usize = 5;
pub const PICKS_TOTAL: usize = 2 * PICKS_PER_SIDE;

/// One of the two competing teams, from the perspective of the human user.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Ally => f.write_str("ally"),
            Side::Enemy => f.write_str("enemy"),
        }
    }
}

/// The stage of the draft currently collecting selections.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    AllyBans,
    EnemyBans,
    AskFirstPick,
    Pick,
    Complete,
}

impl Phase {
    /// How many selections the phase collects before it transitions.
    fn num_turns(self) -> usize {
        match self {
            Phase::AllyBans | Phase::EnemyBans => BANS_PER_SIDE,
            Phase::Pick => PICKS_TOTAL,
            Phase::AskFirstPick | Phase::Complete => 0,
        }
    }
}

/// The side acting at each pick position, given who picks first.
///
/// The single opening pick is followed by alternating double picks, with a
/// single pick closing the draft (1-2-2-2-2-1).
pub fn pick_order(first_picker: Side) -> [Side; PICKS_TOTAL] {
    let other = first_picker.other();
    [
        first_picker,
        other,
        other,
        first_picker,
        first_picker,
        other,
        other,
        first_picker,
        first_picker,
        other,
    ]
}

/// Transient view filters applied to the available pool.
///
/// Filters narrow what is offered, never what is recorded, and are cleared
/// by [`DraftSession::reset`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolFilters {
    /// Keep only characters of this role; `None` shows every role.
    pub role: Option<Role>,
    /// Case-insensitive name substring.
    pub search: String,
    /// Keep only characters in the externally supplied owned set. With an
    /// empty owned set this excludes everything; front ends should disable
    /// the toggle when no owned list is available.
    pub owned_only: bool,
}

impl PoolFilters {
    fn matches(&self, character: &Character, owned: &HashSet<String>) -> bool {
        if let Some(role) = self.role {
            if character.role != role {
                return false;
            }
        }
        if !self.search.is_empty()
            && !character
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }
        if self.owned_only && !owned.contains(&character.name) {
            return false;
        }
        true
    }
}

// Everything undo has to bring back. View filters are deliberately not part
// of a snapshot: they are not draft state.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot {
    phase: Phase,
    turn_idx: usize,
    first_picker: Option<Side>,
    ally_bans: Vec<String>,
    enemy_bans: Vec<String>,
    ally_picks: Vec<String>,
    enemy_picks: Vec<String>,
}

/// The state of one draft, owned by the sequencer.
///
/// A session walks `AllyBans` → `EnemyBans` → `AskFirstPick` → `Pick` →
/// `Complete` and is mutated only through [`select`](Self::select),
/// [`commit_first_pick`](Self::commit_first_pick),
/// [`undo`](Self::undo) and [`reset`](Self::reset). A rejected operation
/// leaves the session exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftSession {
    phase: Phase,
    turn_idx: usize,
    first_picker: Option<Side>,
    ally_bans: Vec<String>,
    enemy_bans: Vec<String>,
    ally_picks: Vec<String>,
    enemy_picks: Vec<String>,
    filters: PoolFilters,
    history: Vec<Snapshot>,
}

impl DraftSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::AllyBans,
            turn_idx: 0,
            first_picker: None,
            ally_bans: Vec::new(),
            enemy_bans: Vec::new(),
            ally_picks: Vec::new(),
            enemy_picks: Vec::new(),
            filters: PoolFilters::default(),
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Position within the current phase's turn order.
    pub fn turn_index(&self) -> usize {
        self.turn_idx
    }

    /// Which side opens the pick phase. `None` until committed; immutable
    /// afterwards (short of `undo`/`reset`).
    pub fn first_picker(&self) -> Option<Side> {
        self.first_picker
    }

    pub fn bans(&self, side: Side) -> &[String] {
        match side {
            Side::Ally => &self.ally_bans,
            Side::Enemy => &self.enemy_bans,
        }
    }

    pub fn picks(&self, side: Side) -> &[String] {
        match side {
            Side::Ally => &self.ally_picks,
            Side::Enemy => &self.enemy_picks,
        }
    }

    pub fn filters(&self) -> &PoolFilters {
        &self.filters
    }

    pub fn set_role_filter(&mut self, role: Option<Role>) {
        self.filters.role = role;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
    }

    pub fn set_owned_only(&mut self, owned_only: bool) {
        self.filters.owned_only = owned_only;
    }

    /// The side whose turn it is, derived from phase and turn index alone.
    /// `None` while waiting for the first pick decision and once complete.
    pub fn current_side(&self) -> Option<Side> {
        match self.phase {
            Phase::AllyBans => Some(Side::Ally),
            Phase::EnemyBans => Some(Side::Enemy),
            Phase::AskFirstPick | Phase::Complete => None,
            Phase::Pick => self
                .first_picker
                .map(|first| pick_order(first)[self.turn_idx]),
        }
    }

    /// Whether the character is already in any of the four lists.
    pub fn is_recorded(&self, name: &str) -> bool {
        self.ally_bans.iter().any(|n| n == name)
            || self.enemy_bans.iter().any(|n| n == name)
            || self.ally_picks.iter().any(|n| n == name)
            || self.enemy_picks.iter().any(|n| n == name)
    }

    /// The characters currently eligible for selection, in roster order.
    ///
    /// Picked characters are always excluded. Banned characters are only
    /// excluded during the pick phase; while a ban phase is running they
    /// stay visible (an attempt to ban one twice is rejected by
    /// [`select`](Self::select) instead). View filters narrow the result
    /// further; `owned` is the externally supplied owned-character set.
    pub fn available_pool<'r>(
        &self,
        roster: &'r Roster,
        owned: &HashSet<String>,
    ) -> Vec<&'r Character> {
        let exclude_bans = self.phase == Phase::Pick;
        roster
            .iter()
            .filter(|c| {
                let picked = self.ally_picks.contains(&c.name) || self.enemy_picks.contains(&c.name);
                let banned = exclude_bans
                    && (self.ally_bans.contains(&c.name) || self.enemy_bans.contains(&c.name));
                !picked && !banned && self.filters.matches(c, owned)
            })
            .collect()
    }

    /// Records a ban or pick for the side whose turn it is, then advances
    /// the turn (and the phase, when the turn order is exhausted).
    ///
    /// Once the draft is complete this is an idempotent no-op. A character
    /// that is already recorded anywhere, or a call while no side is
    /// acting, is rejected without touching the session.
    pub fn select(&mut self, name: &str) -> Result<(), InvalidSelection> {
        if self.phase == Phase::Complete {
            return Ok(());
        }
        let side = self
            .current_side()
            .ok_or(InvalidSelection::NoActiveSide { phase: self.phase })?;
        if self.is_recorded(name) {
            return Err(InvalidSelection::AlreadyRecorded {
                name: name.to_string(),
            });
        }

        self.push_snapshot();
        let list = match self.phase {
            Phase::AllyBans => &mut self.ally_bans,
            Phase::EnemyBans => &mut self.enemy_bans,
            Phase::Pick => match side {
                Side::Ally => &mut self.ally_picks,
                Side::Enemy => &mut self.enemy_picks,
            },
            // Ruled out above: Complete returns early, AskFirstPick has no side.
            Phase::AskFirstPick | Phase::Complete => unreachable!(),
        };
        list.push(name.to_string());
        self.advance();
        Ok(())
    }

    /// Decides which side opens the pick phase. Legal only while the
    /// session is waiting for exactly this decision.
    pub fn commit_first_pick(&mut self, side: Side) -> Result<(), InvalidPhaseTransition> {
        if self.phase != Phase::AskFirstPick {
            return Err(InvalidPhaseTransition {
                phase: self.phase,
                attempted_first_picker: side,
            });
        }
        self.push_snapshot();
        self.first_picker = Some(side);
        self.phase = Phase::Pick;
        self.turn_idx = 0;
        Ok(())
    }

    /// Restores the state before the most recent `select` or
    /// `commit_first_pick`. Returns whether anything was undone; with no
    /// history this is a no-op.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.phase = snapshot.phase;
                self.turn_idx = snapshot.turn_idx;
                self.first_picker = snapshot.first_picker;
                self.ally_bans = snapshot.ally_bans;
                self.enemy_bans = snapshot.enemy_bans;
                self.ally_picks = snapshot.ally_picks;
                self.enemy_picks = snapshot.enemy_picks;
                true
            }
            None => false,
        }
    }

    /// Returns the session to the canonical initial state, clearing the
    /// selection lists, the history and the view filters.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn push_snapshot(&mut self) {
        self.history.push(Snapshot {
            phase: self.phase,
            turn_idx: self.turn_idx,
            first_picker: self.first_picker,
            ally_bans: self.ally_bans.clone(),
            enemy_bans: self.enemy_bans.clone(),
            ally_picks: self.ally_picks.clone(),
            enemy_picks: self.enemy_picks.clone(),
        });
    }

    fn advance(&mut self) {
        self.turn_idx += 1;
        if self.turn_idx >= self.phase.num_turns() {
            self.turn_idx = 0;
            self.phase = match self.phase {
                Phase::AllyBans => Phase::EnemyBans,
                Phase::EnemyBans => Phase::AskFirstPick,
                Phase::Pick => Phase::Complete,
                Phase::AskFirstPick | Phase::Complete => unreachable!(),
            };
        }
    }
}

impl Default for DraftSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::DraftScript;
    use crate::Character;

    fn character(name: &str, role: Role) -> Character {
        Character {
            name: name.to_string(),
            role,
            tier: None,
            image_url: String::new(),
        }
    }

    fn small_roster() -> Roster {
        Roster::new([
            character("Aurora", Role::Speedster),
            character("Brick", Role::Defender),
            character("Cinder", Role::Attacker),
            character("Drift", Role::Supporter),
            character("Ember", Role::AllRounder),
        ])
    }

    fn no_owned() -> HashSet<String> {
        HashSet::new()
    }

    // Replays the first `script.stop_after` mutating operations of a full
    // draft: 3 + 3 bans, the first pick commit, 10 picks.
    fn replay(script: &DraftScript) -> DraftSession {
        let mut session = DraftSession::new();
        for op in 0..script.stop_after {
            if op == 2 * BANS_PER_SIDE {
                session.commit_first_pick(script.first_picker).unwrap();
            } else {
                let name_idx = if op < 2 * BANS_PER_SIDE { op } else { op - 1 };
                session.select(&script.names[name_idx]).unwrap();
            }
        }
        session
    }

    #[test]
    fn ban_phases_in_call_order() {
        let mut session = DraftSession::new();
        assert_eq!(session.phase(), Phase::AllyBans);
        assert_eq!(session.current_side(), Some(Side::Ally));
        for name in ["Aurora", "Brick", "Cinder"] {
            session.select(name).unwrap();
        }
        assert_eq!(session.phase(), Phase::EnemyBans);
        assert_eq!(session.current_side(), Some(Side::Enemy));
        assert_eq!(session.bans(Side::Ally), &["Aurora", "Brick", "Cinder"]);
        assert!(session.bans(Side::Enemy).is_empty());
    }

    #[test]
    fn first_pick_decision_point() {
        let mut session = DraftSession::new();
        for name in ["a1", "a2", "a3", "e1", "e2", "e3"] {
            session.select(name).unwrap();
        }
        assert_eq!(session.phase(), Phase::AskFirstPick);
        assert_eq!(session.current_side(), None);
        // No selection is accepted at the decision point
        assert_eq!(
            session.select("p1"),
            Err(InvalidSelection::NoActiveSide {
                phase: Phase::AskFirstPick
            })
        );

        session.commit_first_pick(Side::Enemy).unwrap();
        assert_eq!(session.phase(), Phase::Pick);
        assert_eq!(session.turn_index(), 0);
        assert_eq!(session.first_picker(), Some(Side::Enemy));
        assert_eq!(session.current_side(), Some(Side::Enemy));
    }

    #[test]
    fn pick_attribution_follows_snake_order() {
        let mut session = DraftSession::new();
        for name in ["a1", "a2", "a3", "e1", "e2", "e3"] {
            session.select(name).unwrap();
        }
        session.commit_first_pick(Side::Enemy).unwrap();

        let mut attributed = Vec::new();
        for i in 0..PICKS_TOTAL {
            attributed.push(session.current_side().unwrap());
            session.select(&format!("p{}", i)).unwrap();
        }
        use Side::{Ally, Enemy};
        assert_eq!(
            attributed,
            [Enemy, Ally, Ally, Enemy, Enemy, Ally, Ally, Enemy, Enemy, Ally]
        );
        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(session.current_side(), None);
        assert_eq!(session.picks(Side::Enemy), &["p0", "p3", "p4", "p7", "p8"]);
        assert_eq!(session.picks(Side::Ally), &["p1", "p2", "p5", "p6", "p9"]);

        // Selecting after completion is an accepted no-op
        let completed = session.clone();
        assert_eq!(session.select("extra"), Ok(()));
        assert_eq!(session, completed);
    }

    #[test]
    fn pick_order_round_trip() {
        use Side::{Ally, Enemy};
        assert_eq!(
            pick_order(Ally),
            [Ally, Enemy, Enemy, Ally, Ally, Enemy, Enemy, Ally, Ally, Enemy]
        );
        assert_eq!(
            pick_order(Enemy),
            [Enemy, Ally, Ally, Enemy, Enemy, Ally, Ally, Enemy, Enemy, Ally]
        );
    }

    #[test]
    fn duplicate_selection_is_rejected_unchanged() {
        let mut session = DraftSession::new();
        session.select("Aurora").unwrap();
        let before = session.clone();
        assert_eq!(
            session.select("Aurora"),
            Err(InvalidSelection::AlreadyRecorded {
                name: "Aurora".to_string()
            })
        );
        assert_eq!(session, before);
    }

    #[test]
    fn commit_first_pick_outside_decision_point() {
        let mut session = DraftSession::new();
        let err = session.commit_first_pick(Side::Ally).unwrap_err();
        assert_eq!(
            err,
            InvalidPhaseTransition {
                phase: Phase::AllyBans,
                attempted_first_picker: Side::Ally,
            }
        );
        assert_eq!(session.first_picker(), None);
        assert_eq!(session.phase(), Phase::AllyBans);
    }

    #[test]
    fn undo_restores_across_the_phase_boundary() {
        let mut session = DraftSession::new();
        for name in ["a1", "a2", "a3", "e1", "e2", "e3"] {
            session.select(name).unwrap();
        }
        let at_decision = session.clone();
        session.commit_first_pick(Side::Ally).unwrap();
        assert!(session.undo());
        assert_eq!(session, at_decision);
        assert_eq!(session.first_picker(), None);
    }

    #[test]
    fn undo_with_empty_history_is_a_noop() {
        let mut session = DraftSession::new();
        assert!(!session.undo());
        assert_eq!(session, DraftSession::new());
    }

    #[test]
    fn reset_clears_selections_and_filters() {
        let mut session = DraftSession::new();
        session.select("Aurora").unwrap();
        session.set_role_filter(Some(Role::Defender));
        session.set_search("au");
        session.set_owned_only(true);
        session.reset();
        assert_eq!(session, DraftSession::new());
        assert_eq!(session.filters(), &PoolFilters::default());
    }

    #[test]
    fn bans_stay_visible_until_the_pick_phase() {
        let roster = small_roster();
        let mut session = DraftSession::new();
        session.select("Aurora").unwrap();
        session.select("Brick").unwrap();
        session.select("Cinder").unwrap();

        // Enemy is banning: every character is still offered, including the
        // three the ally side banned.
        let pool: Vec<_> = session
            .available_pool(&roster, &no_owned())
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(pool, ["Aurora", "Brick", "Cinder", "Drift", "Ember"]);
        // Double-banning is still rejected, by either side.
        assert_eq!(
            session.select("Aurora"),
            Err(InvalidSelection::AlreadyRecorded {
                name: "Aurora".to_string()
            })
        );
        assert!(session.bans(Side::Enemy).is_empty());
    }

    #[test]
    fn pick_pool_excludes_bans_and_picks() {
        let roster = small_roster();
        let mut session = DraftSession::new();
        for name in ["Aurora", "x1", "x2", "x3", "x4", "x5"] {
            session.select(name).unwrap();
        }
        session.commit_first_pick(Side::Ally).unwrap();
        session.select("Brick").unwrap();

        let pool: Vec<_> = session
            .available_pool(&roster, &no_owned())
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(pool, ["Cinder", "Drift", "Ember"]);
    }

    #[test]
    fn filters_narrow_the_pool() {
        let roster = small_roster();
        let mut session = DraftSession::new();

        session.set_role_filter(Some(Role::Defender));
        let pool = session.available_pool(&roster, &no_owned());
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].name, "Brick");

        session.set_role_filter(None);
        session.set_search("RI");
        let pool: Vec<_> = session
            .available_pool(&roster, &no_owned())
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(pool, ["Brick", "Drift"]);

        session.set_search("");
        session.set_owned_only(true);
        let owned: HashSet<String> = ["Ember".to_string()].into_iter().collect();
        let pool = session.available_pool(&roster, &owned);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].name, "Ember");

        // No owned list supplied: the toggle excludes everything.
        assert!(session.available_pool(&roster, &no_owned()).is_empty());
    }

    quickcheck! {
        fn each_character_is_in_at_most_one_list(script: DraftScript) -> bool {
            let session = replay(&script);
            let mut seen = HashSet::new();
            for side in [Side::Ally, Side::Enemy] {
                for name in session.bans(side).iter().chain(session.picks(side)) {
                    if !seen.insert(name.clone()) {
                        return false;
                    }
                }
            }
            true
        }
    }

    quickcheck! {
        fn list_lengths_stay_bounded(script: DraftScript) -> bool {
            let session = replay(&script);
            session.bans(Side::Ally).len() <= BANS_PER_SIDE
                && session.bans(Side::Enemy).len() <= BANS_PER_SIDE
                && session.picks(Side::Ally).len() <= PICKS_PER_SIDE
                && session.picks(Side::Enemy).len() <= PICKS_PER_SIDE
        }
    }

    quickcheck! {
        fn turn_index_stays_in_bounds(script: DraftScript) -> bool {
            let session = replay(&script);
            match session.phase() {
                Phase::AskFirstPick | Phase::Complete => session.turn_index() == 0,
                phase => session.turn_index() < phase.num_turns(),
            }
        }
    }

    quickcheck! {
        fn phase_is_determined_by_progress(script: DraftScript) -> bool {
            let session = replay(&script);
            let expected = match script.stop_after {
                0..=2 => Phase::AllyBans,
                3..=5 => Phase::EnemyBans,
                6 => Phase::AskFirstPick,
                7..=16 => Phase::Pick,
                _ => Phase::Complete,
            };
            session.phase() == expected
        }
    }

    quickcheck! {
        fn undo_restores_the_previous_snapshot(script: DraftScript) -> bool {
            let mut session = replay(&script);
            let before = session.clone();
            // Apply whichever mutation is legal next, then take it back.
            match session.phase() {
                Phase::AskFirstPick => session.commit_first_pick(script.first_picker).unwrap(),
                Phase::Complete => return true,
                _ => session.select("one-more").unwrap(),
            }
            session.undo() && session == before
        }
    }

    quickcheck! {
        fn reset_always_yields_the_initial_state(script: DraftScript) -> bool {
            let mut session = replay(&script);
            session.set_search("leftover");
            session.reset();
            session == DraftSession::new()
        }
    }

}
