//! Command dispatch
//!
//! Spawns the configured shell command detached, exporting the event
//! payload as environment variables. Dispatch is fire-and-forget: failures
//! are logged and swallowed, the pipeline keeps processing.

use crate::detector::ClassifiedEvent;
use crate::executor::Dispatch;
use serde_json::Value;
use std::process::{Command, Stdio};
use tracing::{error, info};

/// Spawning dispatcher for `command` leaves
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Environment exported to the spawned command
    fn payload_env(event: &ClassifiedEvent) -> Vec<(&'static str, String)> {
        let d = &event.payload;
        vec![
            ("GESTURE_DX", d.dx.to_string()),
            ("GESTURE_DY", d.dy.to_string()),
            ("GESTURE_DX_RAW", d.dx_raw.to_string()),
            ("GESTURE_DY_RAW", d.dy_raw.to_string()),
            ("GESTURE_ZOOM", d.zoom.to_string()),
            ("GESTURE_ROTATION", d.rotation.to_string()),
        ]
    }
}

impl Dispatch for CommandDispatcher {
    fn dispatch(&mut self, action: &Value, event: &ClassifiedEvent) {
        let Some(command) = action.as_str() else {
            error!(path = %event.path, ?action, "configured action is not a command string");
            return;
        };

        info!(path = %event.path, command, "dispatching");

        let spawned = Command::new("sh")
            .arg("-c")
            .arg(command)
            .envs(Self::payload_env(event))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                // Reap in the background; the pipeline never waits
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => {
                error!(path = %event.path, command, error = %e, "failed to spawn command");
            }
        }
    }
}
