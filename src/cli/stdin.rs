//! Terminal stand-in for the speech engine
//!
//! Lines typed on stdin play the role of recognized speech. One reader is
//! shared by continuous listening, confirmation prompts and voice samples so
//! no line is consumed twice.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc::UnboundedSender;

use aimate_voice::voice::SpeechCapture;

pub struct StdinCapture {
    lines: tokio::sync::Mutex<Lines<BufReader<Stdin>>>,
    sink: Mutex<Option<UnboundedSender<String>>>,
}

impl StdinCapture {
    pub fn new() -> Self {
        Self {
            lines: tokio::sync::Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            sink: Mutex::new(None),
        }
    }

    /// Next line from stdin; `None` at end of input
    ///
    /// Cancel safe, so it can race against Ctrl-C in `select!`.
    pub async fn next_line(&self) -> Option<String> {
        let mut lines = self.lines.lock().await;
        match lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to read stdin: {}", e);
                None
            }
        }
    }

    /// Pass a line to the active listener; `false` when not listening
    pub fn hear(&self, line: String) -> bool {
        let sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        match sink.as_ref() {
            Some(tx) => tx.send(line).is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl SpeechCapture for StdinCapture {
    async fn start_continuous(&self, transcripts: UnboundedSender<String>) -> bool {
        *self.sink.lock().unwrap_or_else(|e| e.into_inner()) = Some(transcripts);
        true
    }

    async fn stop(&self) {
        self.sink.lock().unwrap_or_else(|e| e.into_inner()).take();
    }

    async fn record_once(&self, duration_secs: u32) -> Option<String> {
        println!("  Voice sample ({}s): type the sample and press Enter", duration_secs);
        self.next_line().await
    }
}
