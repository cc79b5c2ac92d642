//! Busy indicator shown while a submission is in flight.

use std::io::Write;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const INTERVAL: Duration = Duration::from_millis(80);

/// Elapsed time is only shown once a request has taken this long.
const SHOW_ELAPSED_AFTER: Duration = Duration::from_secs(2);

/// A stderr spinner running on its own task. Start it when a request goes
/// out, [`Spinner::stop`] it when the reply (or failure) comes back.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: watch::Sender<bool>,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let message = message.to_string();
        let started = Instant::now();

        let handle = tokio::spawn(async move {
            let mut i = 0;
            loop {
                let line = frame_line(i, &message, started.elapsed());
                eprint!("\x1b[2K\r{line}");
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    _ = cancel_rx.changed() => break,
                }
                i += 1;
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self {
            handle,
            cancel: cancel_tx,
        }
    }

    /// Stop the spinner and clear its line.
    pub async fn stop(self) {
        let _ = self.cancel.send(true);
        let _ = self.handle.await;
    }
}

fn frame_line(i: usize, message: &str, elapsed: Duration) -> String {
    let frame = FRAMES[i % FRAMES.len()];
    if elapsed >= SHOW_ELAPSED_AFTER {
        format!("{frame} {message} ({}s)", elapsed.as_secs())
    } else {
        format!("{frame} {message}")
    }
}
