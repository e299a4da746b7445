use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::agent::Agent;
use crate::session::History;
use crate::settings::{PROVIDERS, ProviderSettings, mask_key};
use crate::transform::{OptimizationMode, OutputFormat};
use crate::utils::{preview, truncate_chars};

/// Characters of the input shown per history row.
const HISTORY_PREVIEW_CHARS: usize = 50;

pub struct Display;

impl Display {
    pub fn new() -> Self {
        Self
    }

    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", style(text).bold().cyan());
        println!("{}", style("═".repeat(60)).dim());
        println!();
    }

    pub fn print_optimized(&self, output: &str, format: OutputFormat) {
        println!(
            "{} {}",
            style("$ OUTPUT.PROMPT").green().bold(),
            style(format!("({})", format)).dim()
        );
        println!("{}", output);
    }

    pub fn print_session_state(&self, mode: Option<OptimizationMode>, format: OutputFormat) {
        let mode = mode.map(|m| m.label()).unwrap_or("none");
        println!(
            "Mode: {}  Format: {}",
            style(mode).red().bold(),
            style(format).magenta()
        );
    }

    pub fn print_history(&self, history: &History) {
        if history.is_empty() {
            println!("{}", style("No recent optimizations.").dim());
            return;
        }

        println!("{}", style("Recent Optimizations").bold());
        for (i, entry) in history.iter().enumerate() {
            let mode = entry.mode.map(|m| m.label()).unwrap_or("-");
            println!(
                "  {:>2}. {:<18} {}",
                i + 1,
                style(mode).dim(),
                preview(&entry.input, HISTORY_PREVIEW_CHARS)
            );
        }
    }

    pub fn print_agents_table(&self, agents: &[Agent]) {
        if agents.is_empty() {
            println!("{}", style("No agents.").dim());
            return;
        }

        println!(
            "{:<3} {:<15} {:<26} {:<20} {:<18}",
            "",
            style("ID").bold(),
            style("Name").bold(),
            style("Provider").bold(),
            style("Format").bold()
        );
        println!("{}", style("─".repeat(84)).dim());

        for agent in agents {
            let marker = if agent.is_active {
                style("●").green().bold()
            } else {
                style("○").dim()
            };
            println!(
                "{:<3} {:<15} {:<26} {:<20} {:<18}",
                marker,
                agent.id,
                truncate_chars(&agent.name, 24),
                truncate_chars(&agent.api_provider, 18),
                agent.output_format
            );
        }
    }

    pub fn print_agent_detail(&self, agent: &Agent) {
        self.print_header(&format!("Agent: {}", agent.name));

        let status = if agent.is_active {
            style("active").green()
        } else {
            style("inactive").dim()
        };
        println!("ID:            {}", agent.id);
        println!("Status:        {}", status);
        println!("Description:   {}", agent.description);
        println!("Provider:      {}", agent.api_provider);
        println!("Model:         {}", agent.model);
        println!("Output Format: {}", agent.output_format);
        if !agent.placeholder.is_empty() {
            println!("Placeholder:   {}", style(&agent.placeholder).dim());
        }
        println!();
        println!("{}", style("System Prompt:").bold());
        println!("{}", agent.system_prompt);
    }

    pub fn print_providers(&self, settings: &ProviderSettings) {
        for provider in PROVIDERS.iter() {
            let enabled = settings.is_active(provider.id);
            let toggle = if enabled {
                style("on ").green().bold()
            } else {
                style("off").dim()
            };
            println!(
                "[{}] {} {}",
                toggle,
                style(provider.name).bold(),
                style(format!("({})", provider.id)).dim()
            );
            if enabled {
                println!("      Model:   {}", settings.selected_model(provider.id));
                if provider.requires_api_key {
                    println!("      API key: {}", mask_key(settings.api_key(provider.id)));
                }
            }
        }
    }

    pub fn print_labels<'a>(&self, title: &str, labels: impl IntoIterator<Item = &'a str>) {
        println!("{}", style(title).bold());
        for label in labels {
            println!("  {}", label);
        }
    }

    pub fn print_success(&self, message: &str) {
        println!("{} {}", style("✓").green().bold(), message);
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red().bold(), message);
    }

    pub fn print_warning(&self, message: &str) {
        println!("{} {}", style("!").yellow().bold(), message);
    }

    pub fn print_info(&self, message: &str) {
        println!("{} {}", style("→").cyan(), message);
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("static template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        pb
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
