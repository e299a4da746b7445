//! Optimizer session: the state behind the prompt form.
//!
//! - `Session`: input/output buffers, selected mode and format, submit gating
//! - `History`, `HistoryEntry`: recent invocations, most recent first

mod history;

pub use history::{History, HistoryEntry};

use std::sync::Arc;

use tracing::debug;

use crate::agent::Agent;
use crate::config::AppConfig;
use crate::error::{PilotError, Result};
use crate::transform::{OptimizationMode, Optimizer, OutputFormat};

pub struct Session {
    optimizer: Arc<Optimizer>,
    input: String,
    output: String,
    mode: Option<OptimizationMode>,
    format: OutputFormat,
    require_mode: bool,
    history: History,
}

impl Session {
    pub fn new(optimizer: Arc<Optimizer>, config: &AppConfig) -> Self {
        Self {
            optimizer,
            input: String::new(),
            output: String::new(),
            mode: None,
            format: config.session.default_format,
            require_mode: config.session.require_mode,
            history: History::new(config.history.max_entries),
        }
    }

    pub fn with_defaults(mut self, mode: Option<OptimizationMode>, format: OutputFormat) -> Self {
        self.mode = mode;
        self.format = format;
        self
    }

    /// Take the starting mode and format from an agent preset.
    ///
    /// The current format is kept when the agent does not name one.
    pub fn apply_agent(&mut self, agent: &Agent) {
        let (mode, format) = agent.session_defaults();
        debug!(agent = %agent.id, ?mode, ?format, "Applying agent defaults");
        self.mode = mode;
        if let Some(format) = format {
            self.format = format;
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn mode(&self) -> Option<OptimizationMode> {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Option<OptimizationMode>) {
        self.mode = mode;
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_loading(&self) -> bool {
        self.optimizer.is_pending()
    }

    /// Whether `submit` would pass its precondition checks.
    pub fn can_submit(&self) -> bool {
        self.ensure_ready().is_ok()
    }

    /// Fail with the first precondition `submit` would refuse on.
    pub fn ensure_ready(&self) -> Result<()> {
        if self.input.trim().is_empty() {
            return Err(PilotError::EmptyInput);
        }
        if self.require_mode && self.mode.is_none() {
            return Err(PilotError::ModeRequired);
        }
        if self.optimizer.is_pending() {
            return Err(PilotError::RequestInFlight);
        }
        Ok(())
    }

    /// Optimize the current input and record it in history.
    pub async fn submit(&mut self) -> Result<&str> {
        self.ensure_ready()?;

        let output = self
            .optimizer
            .run(&self.input, self.mode, self.format)
            .await?;

        self.history.push(HistoryEntry {
            input: self.input.clone(),
            output: output.clone(),
            mode: self.mode,
        });
        self.output = output;
        Ok(&self.output)
    }

    pub async fn submit_text(&mut self, text: impl Into<String>) -> Result<&str> {
        self.input = text.into();
        self.submit().await
    }

    /// Clear input and output; history is kept.
    pub fn reset(&mut self) {
        self.input.clear();
        self.output.clear();
    }

    /// Restore input and output from a history entry.
    pub fn recall(&mut self, index: usize) -> Result<&HistoryEntry> {
        let entry = self.history.get(index).ok_or(PilotError::HistoryIndex {
            index,
            len: self.history.len(),
        })?;
        self.input = entry.input.clone();
        self.output = entry.output.clone();
        Ok(entry)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::seed_agents;

    fn session(require_mode: bool) -> Session {
        let mut config = AppConfig::default();
        config.session.require_mode = require_mode;
        Session::new(Arc::new(Optimizer::instant()), &config)
    }

    #[tokio::test]
    async fn test_refuses_blank_input() {
        let mut s = session(false);
        assert!(matches!(
            s.submit_text("   \n\t").await,
            Err(PilotError::EmptyInput)
        ));
        assert!(s.history().is_empty());
    }

    #[tokio::test]
    async fn test_refuses_missing_mode() {
        let mut s = session(true);
        assert!(matches!(
            s.submit_text("text").await,
            Err(PilotError::ModeRequired)
        ));
        assert!(!s.can_submit());

        s.set_mode(Some(OptimizationMode::Expand));
        assert!(s.can_submit());
        assert!(s.submit().await.is_ok());
    }

    #[tokio::test]
    async fn test_submit_records_history() {
        let mut s = session(true).with_defaults(Some(OptimizationMode::Shorten), OutputFormat::Table);

        let out = s.submit_text("short prompt").await.unwrap().to_string();
        assert_eq!(out, "| Content |\n|----------|\n| short prompt |");
        assert_eq!(s.output(), out);

        let entry = s.history().get(0).unwrap();
        assert_eq!(entry.input, "short prompt");
        assert_eq!(entry.output, out);
        assert_eq!(entry.mode, Some(OptimizationMode::Shorten));
    }

    #[tokio::test]
    async fn test_history_keeps_ten_most_recent() {
        let mut s = session(false);
        for i in 0..11 {
            s.submit_text(format!("prompt {}", i)).await.unwrap();
        }

        let inputs: Vec<_> = s.history().iter().map(|e| e.input.as_str()).collect();
        let expected: Vec<String> = (1..11).rev().map(|i| format!("prompt {}", i)).collect();
        assert_eq!(inputs, expected);
    }

    #[tokio::test]
    async fn test_reset_and_recall() {
        let mut s = session(false);
        s.submit_text("first").await.unwrap();
        s.submit_text("second").await.unwrap();

        s.reset();
        assert_eq!(s.input(), "");
        assert_eq!(s.output(), "");
        assert_eq!(s.history().len(), 2);

        s.recall(1).unwrap();
        assert_eq!(s.input(), "first");
        assert_eq!(s.output(), "first");

        assert!(matches!(
            s.recall(5),
            Err(PilotError::HistoryIndex { index: 5, len: 2 })
        ));

        s.clear_history();
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_apply_agent_defaults() {
        let agents = seed_agents();
        let mut s = session(true);

        s.apply_agent(&agents[0]);
        assert_eq!(s.mode(), Some(OptimizationMode::RewritePerfectly));
        assert_eq!(s.format(), OutputFormat::PlainText);

        s.apply_agent(&agents[1]);
        assert_eq!(s.mode(), Some(OptimizationMode::Clarify));
    }

    #[test]
    fn test_apply_agent_keeps_configured_format() {
        let mut config = AppConfig::default();
        config.session.default_format = OutputFormat::Markdown;
        let mut s = Session::new(Arc::new(Optimizer::instant()), &config);
        assert_eq!(s.format(), OutputFormat::Markdown);

        let prompt_eng = &seed_agents()[1];
        s.apply_agent(prompt_eng);
        assert_eq!(s.mode(), Some(OptimizationMode::Clarify));
        assert_eq!(s.format(), OutputFormat::Markdown);

        let mut json_agent = prompt_eng.clone();
        json_agent.output_format = "JSON".into();
        s.apply_agent(&json_agent);
        assert_eq!(s.mode(), None);
        assert_eq!(s.format(), OutputFormat::Json);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_session_sees_pending_request() {
        let optimizer = Arc::new(Optimizer::default());
        let config = AppConfig::default();
        let mut first = Session::new(optimizer.clone(), &config)
            .with_defaults(Some(OptimizationMode::Clarify), OutputFormat::PlainText);
        let mut second = Session::new(optimizer, &config)
            .with_defaults(Some(OptimizationMode::Clarify), OutputFormat::PlainText);
        second.set_input("waiting");

        let (a, b) = tokio::join!(first.submit_text("running"), async {
            let loading = second.is_loading();
            (loading, second.submit().await.map(str::to_string))
        });

        assert!(a.is_ok());
        assert!(b.0);
        assert!(matches!(b.1, Err(PilotError::RequestInFlight)));
    }
}
