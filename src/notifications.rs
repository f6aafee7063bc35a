//! Alert support for an expired countdown.
//! The bell works everywhere; the desktop banner is macOS only.

use std::io::{self, Write};
#[cfg(target_os = "macos")]
use std::process::Command;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default pause between bell rings while an alert is sounding
pub const DEFAULT_ALERT_REPEAT_MS: u64 = 2000;

/// A best-effort alert that keeps going until stopped. Failures are swallowed.
pub trait AlertPlayer {
    fn play_looping(&mut self, label: &str);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

/// Alert used when alerts are disabled
#[derive(Debug, Default)]
pub struct SilentAlert {
    playing: bool,
}

impl AlertPlayer for SilentAlert {
    fn play_looping(&mut self, _label: &str) {
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

struct BellLoop {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// Rings the terminal bell on a background thread until stopped
pub struct TerminalBell {
    repeat: Duration,
    running: Option<BellLoop>,
}

impl TerminalBell {
    pub fn new(repeat: Duration) -> Self {
        Self {
            repeat,
            running: None,
        }
    }
}

impl AlertPlayer for TerminalBell {
    fn play_looping(&mut self, label: &str) {
        if self.running.is_some() {
            return;
        }

        notify_timer_finished(label);

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let repeat = self.repeat;
        let spawned = thread::Builder::new()
            .name("onetask-alert".to_string())
            .spawn(move || loop {
                ring_bell();
                match stop_rx.recv_timeout(repeat) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    // Stop requested or the player went away
                    _ => break,
                }
            });

        match spawned {
            Ok(handle) => self.running = Some(BellLoop { stop_tx, handle }),
            Err(e) => tracing::warn!(error = %e, "could not start alert thread"),
        }
    }

    fn stop(&mut self) {
        if let Some(bell) = self.running.take() {
            let _ = bell.stop_tx.send(());
            let _ = bell.handle.join();
        }
    }

    fn is_playing(&self) -> bool {
        self.running.is_some()
    }
}

impl Drop for TerminalBell {
    fn drop(&mut self) {
        self.stop();
    }
}

fn ring_bell() {
    let mut out = io::stdout();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}

/// Send a desktop notification when a countdown reaches zero
pub fn notify_timer_finished(task_text: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "⏰ {}" with title "OneTask - Time's up""#,
            task_text.replace('"', "\\\"")
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = task_text;
    }
}
