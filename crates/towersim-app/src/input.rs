//! Command input: one JSON command per line.
//!
//! ```text
//! {"type": "SpawnRandomAircraft"}
//! {"type": "SpawnAircraft", "model": "Concorde"}
//! {"type": "ReportAirline", "airline": "AF"}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::BufRead;

use tracing::warn;

use towersim_core::commands::SimCommand;

use crate::state::AppState;

/// Parse one input line. `Ok(None)` for blank and comment lines.
pub fn parse_command_line(line: &str) -> Result<Option<SimCommand>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Forward commands read from `reader` until EOF, a read error or a stopped
/// game loop. Malformed lines are logged and skipped. Returns the number of
/// commands forwarded.
pub fn forward_commands(reader: impl BufRead, state: &AppState) -> usize {
    let mut forwarded = 0;
    for (number, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(%err, "stopped reading input");
                break;
            }
        };
        match parse_command_line(&line) {
            Ok(Some(command)) => {
                if let Err(err) = state.send(command) {
                    warn!(%err, "game loop is gone");
                    break;
                }
                forwarded += 1;
            }
            Ok(None) => {}
            Err(err) => warn!(line = number + 1, %err, "ignoring malformed command"),
        }
    }
    forwarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};

    use towersim_core::enums::AircraftModel;

    use crate::state::GameLoopCommand;

    #[test]
    fn test_parse_spawn_with_model() {
        let command = parse_command_line(r#" {"type": "SpawnAircraft", "model": "B707"} "#)
            .unwrap()
            .unwrap();
        assert!(matches!(
            command,
            SimCommand::SpawnAircraft {
                model: AircraftModel::B707
            }
        ));
    }

    #[test]
    fn test_blank_and_comment_lines_skipped() {
        assert!(parse_command_line("").unwrap().is_none());
        assert!(parse_command_line("   ").unwrap().is_none());
        assert!(parse_command_line("# spawn later").unwrap().is_none());
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(parse_command_line(r#"{"type": "Takeoff"}"#).is_err());
        assert!(parse_command_line("spawn").is_err());
    }

    #[test]
    fn test_forward_skips_bad_lines() {
        let (tx, rx) = mpsc::channel();
        let state = AppState {
            command_tx: tx,
            latest_snapshot: Arc::new(Mutex::new(None)),
        };
        let input = Cursor::new(
            "{\"type\": \"Pause\"}\nnot json\n\n{\"type\": \"ReportCrashes\"}\n",
        );

        assert_eq!(forward_commands(input, &state), 2);
        let received: Vec<_> = rx.try_iter().collect();
        assert!(matches!(received[0], GameLoopCommand::Sim(SimCommand::Pause)));
        assert!(matches!(
            received[1],
            GameLoopCommand::Sim(SimCommand::ReportCrashes)
        ));
    }
}
