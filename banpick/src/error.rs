use crate::{Phase, Side};

/// Why a `select` call was rejected. The session is left untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidSelection {
    /// The character is already in one of the four ban/pick lists.
    AlreadyRecorded { name: String },
    /// No side is currently acting (the session is waiting for the first
    /// pick decision).
    NoActiveSide { phase: Phase },
}

impl std::error::Error for InvalidSelection {}

impl std::fmt::Display for InvalidSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidSelection::AlreadyRecorded { name } => {
                write!(f, "'{}' has already been banned or picked", name)
            }
            InvalidSelection::NoActiveSide { phase } => {
                write!(f, "No side is acting during the {:?} phase", phase)
            }
        }
    }
}

/// `commit_first_pick` was called while the session was not waiting for the
/// first pick decision. Rejected without side effects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidPhaseTransition {
    pub phase: Phase,
    pub attempted_first_picker: Side,
}

impl std::error::Error for InvalidPhaseTransition {}

impl std::fmt::Display for InvalidPhaseTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cannot commit {} as first picker during the {:?} phase",
            self.attempted_first_picker, self.phase
        )
    }
}
