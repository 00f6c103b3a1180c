use banpick::InvalidSelection;

/// Error type for one bot choice.
#[derive(Debug)]
pub enum IllegalChoice {
    /// The bot answered with a name that was not in the offered pool.
    NotAvailable { name: String },
    /// The name passed the pool check but the sequencer still refused it.
    RejectedBySequencer { name: String, err: InvalidSelection },
}

impl std::error::Error for IllegalChoice {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalChoice::RejectedBySequencer { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalChoice::NotAvailable { name } => write!(
                f,
                "Chose '{}', which is not among the offered characters",
                name
            ),
            IllegalChoice::RejectedBySequencer { name, .. } => {
                write!(f, "The draft sequencer rejected the choice of '{}'", name)
            }
        }
    }
}
