use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collects the judge↔bot exchanges of one draft and writes them out as a
/// numbered JSON file per draft.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    exchanges: Vec<Exchange>,
}

#[derive(Serialize, Deserialize)]
pub struct Exchange {
    pub bot: String,
    pub request: Value,
    pub response: Value,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            exchanges: Vec::new(),
        })
    }

    pub fn store_exchange(&mut self, bot: &str, request: Value, response: Value) {
        self.exchanges.push(Exchange {
            bot: String::from(bot),
            request,
            response,
        });
    }

    pub fn write_draft_recording(&mut self) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("draft_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(filepath)?);
        serde_json::to_writer_pretty(writer, &std::mem::take(&mut self.exchanges))?;
        self.num += 1;
        Ok(())
    }
}
