use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{DomainError, RawGame};
use crate::ports::GameLogParser;

/// Default executable of the external log parser.
pub const DEFAULT_PARSER_COMMAND: &str = "twilight-log-parser";

/// Runs the external log parser as a child process.
///
/// Invoked as `<program> <args...> <log path>`. Standard output must be a JSON
/// object describing the game, or empty / `null` when the log holds no
/// playable state yet.
pub struct CommandLogParser {
    program: PathBuf,
    args: Vec<OsString>,
}

impl CommandLogParser {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Interpret the parser's standard output.
    fn interpret(stdout: &[u8]) -> Result<Option<RawGame>, DomainError> {
        let text = String::from_utf8_lossy(stdout);
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(text)
            .map_err(|e| DomainError::Parser(format!("Log parser produced invalid JSON: {}", e)))?;

        match value {
            Value::Null => Ok(None),
            Value::Object(_) => Ok(Some(RawGame::decode(&value))),
            other => Err(DomainError::Parser(format!(
                "Log parser produced unexpected output: {}",
                other
            ))),
        }
    }
}

impl Default for CommandLogParser {
    fn default() -> Self {
        Self::new(DEFAULT_PARSER_COMMAND)
    }
}

impl GameLogParser for CommandLogParser {
    fn parse_game_log(&self, path: &Path) -> Result<Option<RawGame>, DomainError> {
        debug!(program = ?self.program, path = ?path, "Running log parser");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| {
                DomainError::Parser(format!(
                    "Failed to run log parser {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, stderr = %stderr, "Log parser failed");
            let message = if stderr.is_empty() {
                format!("Log parser exited with {}", output.status)
            } else {
                stderr
            };
            return Err(DomainError::Parser(message));
        }

        Self::interpret(&output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_absence() {
        assert_eq!(CommandLogParser::interpret(b"").unwrap(), None);
        assert_eq!(CommandLogParser::interpret(b"  null\n").unwrap(), None);
    }

    #[test]
    fn test_interpret_game() {
        let game = CommandLogParser::interpret(br#"{"current_play": {"turn": 2}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(game.current_play.unwrap().turn, Some(2));
    }

    #[test]
    fn test_interpret_garbage_is_error() {
        assert!(matches!(
            CommandLogParser::interpret(b"Traceback (most recent call last)"),
            Err(DomainError::Parser(_))
        ));
        assert!(matches!(
            CommandLogParser::interpret(b"[1, 2]"),
            Err(DomainError::Parser(_))
        ));
    }

    #[test]
    fn test_missing_program_is_error() {
        let parser = CommandLogParser::new("/nonexistent/twilight-log-parser");
        let err = parser.parse_game_log(Path::new("game.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to run log parser"));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_command_with_log_path() {
        // The log path arrives as $0 of the inline script.
        let parser = CommandLogParser::new("sh").with_args([
            "-c",
            r#"printf '{"current_play": {"possible_draw_cards": ["%s"]}}' "$(basename "$0")""#,
        ]);
        let game = parser
            .parse_game_log(Path::new("/logs/game1.txt"))
            .unwrap()
            .unwrap();
        assert_eq!(
            game.current_play.unwrap().possible_draw_cards,
            Some(vec!["game1.txt".to_string()])
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_reports_stderr() {
        let parser = CommandLogParser::new("sh").with_args(["-c", "echo 'bad log' >&2; exit 3"]);
        let err = parser.parse_game_log(Path::new("game.txt")).unwrap_err();
        assert_eq!(err.to_string(), "bad log");
    }
}
