//! Line-oriented optimizer shell.

use console::style;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::Display;
use crate::error::{PilotError, Result};
use crate::session::Session;
use crate::transform::{OptimizationMode, OutputFormat};

const HELP: &str = "\
Type a prompt and press enter to optimize it.
Start a prompt with '::' to submit text that begins with ':'.
  :mode <MODE>|none   select the optimization mode
  :format <FORMAT>    select the output format
  :history            list recent optimizations
  :recall <N>         restore entry N from history
  :clear              clear history
  :reset              clear input and output
  :show               show the current input and output
  :help               show this help
  :quit               leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Submit(String),
    Mode(Option<OptimizationMode>),
    Format(OutputFormat),
    History,
    /// Zero-based history index.
    Recall(usize),
    Clear,
    Reset,
    Show,
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Self::Empty);
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if trimmed.starts_with("::") {
            let escaped = line.trim_start().strip_prefix(':').unwrap_or(line);
            return Ok(Self::Submit(escaped.to_string()));
        }
        let Some(rest) = trimmed.strip_prefix(':') else {
            return Ok(Self::Submit(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "mode" if arg.eq_ignore_ascii_case("none") => Ok(Self::Mode(None)),
            "mode" => arg
                .parse()
                .map(|m| Self::Mode(Some(m)))
                .map_err(|_| PilotError::UnknownMode(arg.to_string())),
            "format" => arg
                .parse()
                .map(Self::Format)
                .map_err(|_| PilotError::UnknownFormat(arg.to_string())),
            "history" => Ok(Self::History),
            "recall" => match arg.parse::<usize>() {
                Ok(n) if n > 0 => Ok(Self::Recall(n - 1)),
                _ => Err(PilotError::Other(format!(
                    "':recall' expects a history number, got '{}'",
                    arg
                ))),
            },
            "clear" => Ok(Self::Clear),
            "reset" => Ok(Self::Reset),
            "show" => Ok(Self::Show),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(PilotError::Other(format!(
                "Unknown command ':{}'. Type :help for a list.",
                other
            ))),
        }
    }
}

/// Drives a [`Session`] from lines read off `reader`.
pub struct InteractiveShell<'a> {
    session: Session,
    display: &'a Display,
}

impl<'a> InteractiveShell<'a> {
    pub fn new(session: Session, display: &'a Display) -> Self {
        Self { session, display }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, reader: R) -> Result<()> {
        self.display.print_header("Prompt Optimizer");
        self.display
            .print_session_state(self.session.mode(), self.session.format());
        println!("{}", style("Type :help for commands.").dim());

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let command = match ShellCommand::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    self.display.print_error(&e.to_string());
                    continue;
                }
            };
            if command == ShellCommand::Quit {
                break;
            }
            if let Err(e) = self.handle(command).await {
                if e.is_refusal() {
                    self.display.print_warning(&e.to_string());
                } else {
                    self.display.print_error(&e.to_string());
                }
            }
        }
        Ok(())
    }

    pub async fn handle(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Submit(text) => {
                self.session.set_input(text);
                self.session.ensure_ready()?;
                let spinner = self.display.create_spinner("Optimizing...");
                let result = self.session.submit().await.map(str::to_string);
                spinner.finish_and_clear();
                self.display.print_optimized(&result?, self.session.format());
            }
            ShellCommand::Mode(mode) => {
                self.session.set_mode(mode);
                self.display
                    .print_session_state(self.session.mode(), self.session.format());
            }
            ShellCommand::Format(format) => {
                self.session.set_format(format);
                self.display
                    .print_session_state(self.session.mode(), self.session.format());
            }
            ShellCommand::History => self.display.print_history(self.session.history()),
            ShellCommand::Recall(index) => {
                self.session.recall(index)?;
                self.show_buffers();
            }
            ShellCommand::Clear => {
                self.session.clear_history();
                self.display.print_success("History cleared.");
            }
            ShellCommand::Reset => {
                self.session.reset();
                self.display.print_success("Input and output cleared.");
            }
            ShellCommand::Show => self.show_buffers(),
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Quit | ShellCommand::Empty => {}
        }
        Ok(())
    }

    fn show_buffers(&self) {
        println!("{} {}", style("Input:").bold(), self.session.input());
        if !self.session.output().is_empty() {
            self.display
                .print_optimized(self.session.output(), self.session.format());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::AppConfig;
    use crate::transform::Optimizer;

    #[test]
    fn test_parse_submit_keeps_text() {
        assert_eq!(
            ShellCommand::parse("  make a site  ").unwrap(),
            ShellCommand::Submit("  make a site  ".to_string())
        );
        assert_eq!(ShellCommand::parse("   ").unwrap(), ShellCommand::Empty);
    }

    #[test]
    fn test_parse_double_colon_submits() {
        assert_eq!(
            ShellCommand::parse("::mode is a word").unwrap(),
            ShellCommand::Submit(":mode is a word".to_string())
        );
        assert_eq!(
            ShellCommand::parse("  :::x").unwrap(),
            ShellCommand::Submit("::x".to_string())
        );
    }

    #[test]
    fn test_parse_mode_and_format() {
        assert_eq!(
            ShellCommand::parse(":mode simplify").unwrap(),
            ShellCommand::Mode(Some(OptimizationMode::Simplify))
        );
        assert_eq!(
            ShellCommand::parse(":mode none").unwrap(),
            ShellCommand::Mode(None)
        );
        assert_eq!(
            ShellCommand::parse(":format Bulleted List").unwrap(),
            ShellCommand::Format(OutputFormat::BulletedList)
        );
        assert!(matches!(
            ShellCommand::parse(":mode poetic"),
            Err(PilotError::UnknownMode(_))
        ));
        assert!(matches!(
            ShellCommand::parse(":format yaml"),
            Err(PilotError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_parse_recall_is_one_based() {
        assert_eq!(
            ShellCommand::parse(":recall 1").unwrap(),
            ShellCommand::Recall(0)
        );
        assert!(ShellCommand::parse(":recall 0").is_err());
        assert!(ShellCommand::parse(":recall x").is_err());
        assert!(ShellCommand::parse(":bogus").is_err());
    }

    #[tokio::test]
    async fn test_run_processes_script() {
        let config = AppConfig::default();
        let session = Session::new(Arc::new(Optimizer::instant()), &config);
        let display = Display::new();
        let mut shell = InteractiveShell::new(session, &display);

        let script = "\
no mode yet
:mode shorten
:format json
first prompt
:mode clarify
second prompt
:recall 2
:quit
ignored after quit
";
        shell.run(script.as_bytes()).await.unwrap();

        let session = shell.session();
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.input(), "first prompt");
        assert_eq!(session.output(), "{\n  \"content\": \"first prompt\"\n}");
        assert_eq!(session.mode(), Some(OptimizationMode::Clarify));
    }
}
