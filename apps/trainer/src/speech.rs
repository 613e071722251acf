//! Best-effort speech output through the platform speech command.
//!
//! Fire-and-forget: a failure to find or start a speech program is logged
//! at debug level and otherwise ignored, and nothing here ever reaches the
//! session. A new utterance cancels the one still playing.

use std::io;
use std::process::{Child, Command, Stdio};

#[cfg(target_os = "macos")]
const PREFERRED_VOICES: &[&str] = &["Samantha", "Alex", "Karen", "Daniel"];

/// Speaks words aloud, one at a time.
pub struct Speaker {
    current: Option<Child>,
    #[cfg(target_os = "macos")]
    voice: Option<String>,
}

impl Speaker {
    pub fn new() -> Self {
        Self {
            current: None,
            #[cfg(target_os = "macos")]
            voice: preferred_voice(),
        }
    }

    /// Speak a word, cancelling any in-flight utterance first.
    pub fn speak(&mut self, word: &str) {
        self.cancel();
        match self.spawn(word) {
            Ok(child) => {
                tracing::debug!(word, "speech started");
                self.current = Some(child);
            }
            Err(err) => tracing::debug!(word, %err, "speech unavailable"),
        }
    }

    /// Stop the utterance still playing, if any.
    pub fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            child.kill().ok();
            child.wait().ok();
        }
    }

    #[cfg(target_os = "macos")]
    fn spawn(&self, word: &str) -> io::Result<Child> {
        let mut cmd = Command::new("say");
        cmd.args(["-r", "150"]);
        if let Some(voice) = &self.voice {
            cmd.args(["-v", voice]);
        }
        cmd.arg(word)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }

    #[cfg(target_os = "linux")]
    fn spawn(&self, word: &str) -> io::Result<Child> {
        let espeak = Command::new("espeak")
            .args(["-s", "140"])
            .arg(word)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match espeak {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Command::new("spd-say")
                .arg(word)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn(),
            other => other,
        }
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    fn spawn(&self, _word: &str) -> io::Result<Child> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "no speech backend on this platform",
        ))
    }
}

impl Default for Speaker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Speaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// First voice from the preference list that `say` knows about.
#[cfg(target_os = "macos")]
fn preferred_voice() -> Option<String> {
    let output = Command::new("say").args(["-v", "?"]).output().ok()?;
    let listing = String::from_utf8_lossy(&output.stdout);
    for preferred in PREFERRED_VOICES {
        if listing
            .lines()
            .any(|line| line.split_whitespace().next() == Some(preferred))
        {
            return Some(preferred.to_string());
        }
    }
    None
}
