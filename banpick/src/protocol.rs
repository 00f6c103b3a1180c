use serde::{Deserialize, Serialize};

use crate::{Character, CounterEntry, Side};

/// Request for a bot to do something.
///
/// Sent by the judge as one line of JSON on the bot's stdin; the bot
/// answers with one line of JSON on its stdout.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new draft.
    ///
    /// Carries the full roster and counter snapshots so bots need no file
    /// access of their own. The response should be an [`Okay`].
    NewDraft {
        side: Side,
        roster: Vec<Character>,
        counters: Vec<CounterEntry>,
    },
    /// Request to ban one character.
    ///
    /// `available` lists exactly the names the sequencer will accept; the
    /// response should be a [`Selection`] naming one of them.
    ChooseBan {
        available: Vec<String>,
        own_bans: Vec<String>,
        opponent_bans: Vec<String>,
    },
    /// Request to pick one character, answered with a [`Selection`].
    ChoosePick {
        available: Vec<String>,
        own_picks: Vec<String>,
        opponent_picks: Vec<String>,
    },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

/// The character a bot chose to ban or pick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Selection(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_externally_tagged() {
        let req = Request::ChooseBan {
            available: vec!["Aurora".to_string()],
            own_bans: vec![],
            opponent_bans: vec!["Brick".to_string()],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""type":"ChooseBan""#), "{}", json);

        let round_tripped: Request = serde_json::from_str(&json).unwrap();
        match round_tripped {
            Request::ChooseBan { available, .. } => assert_eq!(available, ["Aurora"]),
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn side_uses_external_spelling() {
        assert_eq!(serde_json::to_string(&Side::Ally).unwrap(), "\"ALLY\"");
        assert_eq!(
            serde_json::from_str::<Side>("\"ENEMY\"").unwrap(),
            Side::Enemy
        );
    }
}
