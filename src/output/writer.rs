use std::io::{self, Write};

use serde::Serialize;

use crate::agent::Agent;
use crate::cli::OutputMode;
use crate::settings::{PROVIDERS, ProviderSettings, mask_key};
use crate::transform::{OptimizationMode, OutputFormat};

/// Emits JSON documents for `--output json`; text output goes through `Display`.
pub struct OutputWriter {
    mode: OutputMode,
}

impl OutputWriter {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn is_text(&self) -> bool {
        self.mode == OutputMode::Text
    }

    pub fn emit_optimized(&self, result: &OptimizeOutput) {
        self.write_json(result);
    }

    pub fn emit_agent(&self, agent: &Agent) {
        self.write_json(agent);
    }

    pub fn emit_agents(&self, agents: &[Agent]) {
        self.write_json(&agents);
    }

    /// API keys are masked.
    pub fn emit_providers(&self, settings: &ProviderSettings) {
        let providers: Vec<ProviderOutput> = PROVIDERS
            .iter()
            .map(|p| ProviderOutput {
                id: p.id.as_str(),
                name: p.name,
                active: settings.is_active(p.id),
                model: settings.selected_model(p.id).to_string(),
                api_key: mask_key(settings.api_key(p.id)),
            })
            .collect();
        self.write_json(&providers);
    }

    pub fn emit_message(&self, message: &str) {
        match self.mode {
            OutputMode::Text => println!("{}", message),
            OutputMode::Json => self.write_json(&MessageOutput {
                message: message.to_string(),
            }),
        }
    }

    pub fn emit_value<T: Serialize>(&self, value: &T) {
        self.write_json(value);
    }

    fn write_json<T: Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{}", json);
            let _ = stdout.flush();
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OptimizeOutput {
    pub input: String,
    pub output: String,
    pub mode: Option<OptimizationMode>,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ProviderOutput {
    id: &'static str,
    name: &'static str,
    active: bool,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct MessageOutput {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimize_output_shape() {
        let result = OptimizeOutput {
            input: "hi".into(),
            output: "# Optimized Output\n\nhi".into(),
            mode: Some(OptimizationMode::Clarify),
            format: OutputFormat::Markdown,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "CLARIFY");
        assert_eq!(json["format"], "Markdown");
    }

    #[test]
    fn test_writer_mode() {
        assert!(OutputWriter::new(OutputMode::Text).is_text());
        assert!(!OutputWriter::new(OutputMode::Json).is_text());
    }
}
