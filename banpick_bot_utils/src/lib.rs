use banpick::{Character, CounterEntry, Okay, Request, Selection, Side};

/// A trait to simplify writing draft bots.
///
/// `choose_ban` and `choose_pick` must answer with one of the names in
/// `available`; the judge rejects anything else as an illegal choice.
pub trait Bot {
    fn new_draft(&mut self, side: Side, roster: Vec<Character>, counters: Vec<CounterEntry>);
    fn choose_ban(
        &mut self,
        available: Vec<String>,
        own_bans: Vec<String>,
        opponent_bans: Vec<String>,
    ) -> String;
    fn choose_pick(
        &mut self,
        available: Vec<String>,
        own_picks: Vec<String>,
        opponent_picks: Vec<String>,
    ) -> String;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewDraft {
                    side,
                    roster,
                    counters,
                } => {
                    self.new_draft(side, roster, counters);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::ChooseBan {
                    available,
                    own_bans,
                    opponent_bans,
                } => serde_json::to_writer(
                    &mut stdout,
                    &Selection(self.choose_ban(available, own_bans, opponent_bans)),
                )?,
                Request::ChoosePick {
                    available,
                    own_picks,
                    opponent_picks,
                } => serde_json::to_writer(
                    &mut stdout,
                    &Selection(self.choose_pick(available, own_picks, opponent_picks)),
                )?,
                Request::Bye => break Ok(()),
            }
            use std::io::Write;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}
