use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{ChildStdin, ChildStdout, Command, Stdio};

use banpick::{Request, Side};
use tracing::trace;

use crate::recording::Recorder;

/// A bot subprocess attached to one side of the draft, speaking
/// line-delimited JSON over its stdin/stdout.
pub struct Player {
    pub name: String,
    pub side: Side,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl Player {
    pub fn spawn(side: Side, executable_path: &Path) -> anyhow::Result<Self> {
        let name = executable_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| executable_path.display().to_string());
        let child_proc = Command::new(executable_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        Ok(Self {
            name: format!("{} ({})", name, side),
            side,
            stdin: child_proc.stdin.expect("Could not access stdin"),
            stdout: BufReader::new(child_proc.stdout.expect("Could not access stdout")),
            buf: String::new(),
        })
    }

    pub fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        recorder: &mut Option<Recorder>,
        req: &Request,
    ) -> anyhow::Result<T> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = &self.name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.buf.clear();
        self.stdout.read_line(&mut self.buf)?;
        let serialized_response = self.buf.trim_end();
        let response = serde_json::from_str::<T>(serialized_response)?;
        trace!(name: "Received response", player = &self.name, response = %serialized_response);

        if let Some(recorder) = recorder {
            recorder.store_exchange(
                &self.name,
                serde_json::to_value(req)?,
                serde_json::from_str(serialized_response)?,
            );
        }
        Ok(response)
    }

    /// Tells the bot to shut down. No response is expected.
    pub fn bye(&mut self) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(&Request::Bye)?;
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        Ok(())
    }
}
