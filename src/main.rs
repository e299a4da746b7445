use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use prompt_pilot::agent::{AGENT_PROVIDERS, AgentDraft, AgentStore};
use prompt_pilot::cli::{
    AgentAction, AgentFields, Cli, Commands, ConfigAction, Display, InteractiveShell, OutputMode,
    ProviderAction,
};
use prompt_pilot::config::{AppConfig, DataPaths};
use prompt_pilot::error::{PilotError, Result};
use prompt_pilot::output::{OptimizeOutput, OutputWriter};
use prompt_pilot::session::Session;
use prompt_pilot::settings::{ProviderId, ProviderSettings};
use prompt_pilot::storage::LocalStore;
use prompt_pilot::transform::{OptimizationMode, Optimizer, OutputFormat};

/// Context for command output handling.
struct OutputContext<'a> {
    display: &'a Display,
    writer: &'a OutputWriter,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Display::new().print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("prompt_pilot=debug")
    } else {
        EnvFilter::new("prompt_pilot=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let display = Display::new();
    let writer = OutputWriter::new(cli.output);
    let out = OutputContext {
        display: &display,
        writer: &writer,
    };
    let paths = DataPaths::new(
        cli.data_dir
            .unwrap_or_else(|| PathBuf::from(DataPaths::DEFAULT_DIR)),
    );

    match cli.command {
        Commands::Init => cmd_init(&out, &paths).await,
        Commands::Optimize {
            text,
            mode,
            format,
            agent,
            no_delay,
        } => cmd_optimize(&out, &paths, text, mode, format, agent, no_delay).await,
        Commands::Shell { agent } => cmd_shell(&out, &paths, agent).await,
        Commands::Agents { action } => cmd_agents(&out, &paths, action).await,
        Commands::Providers { action } => cmd_providers(&out, &paths, action).await,
        Commands::Modes => {
            cmd_labels(&out, "Modes", OptimizationMode::ALL.iter().map(|m| m.label()));
            Ok(())
        }
        Commands::Formats => {
            cmd_labels(&out, "Formats", OutputFormat::ALL.iter().map(|f| f.label()));
            Ok(())
        }
        Commands::Config { action } => cmd_config(&out, &paths, action).await,
    }
}

fn ensure_initialized(paths: &DataPaths) -> Result<()> {
    if !paths.is_initialized() {
        return Err(PilotError::NotInitialized);
    }
    Ok(())
}

async fn open_store(paths: &DataPaths) -> Result<LocalStore> {
    let store = LocalStore::new(&paths.store_dir);
    store.init().await?;
    Ok(store)
}

async fn cmd_init(out: &OutputContext<'_>, paths: &DataPaths) -> Result<()> {
    if paths.is_initialized() {
        if out.writer.is_text() {
            out.display
                .print_warning("prompt-pilot is already initialized here.");
        }
        return Ok(());
    }

    paths.ensure_dirs().await?;
    AppConfig::default().save(&paths.root).await?;

    let store = open_store(paths).await?;
    AgentStore::load(store.clone()).await?.save().await?;
    ProviderSettings::load(&store).await?.save(&store).await?;

    if out.writer.is_text() {
        out.display.print_success("Initialized prompt-pilot.");
        out.display
            .print_info(&format!("Configuration: {}", paths.config_file.display()));
        out.display
            .print_info(&format!("Store: {}", paths.store_dir.display()));
    } else {
        out.writer.emit_message("Initialized prompt-pilot");
    }

    Ok(())
}

/// Session configured from `--agent`, or the active agent when none is given.
async fn build_session(
    paths: &DataPaths,
    config: &AppConfig,
    optimizer: Optimizer,
    agent_id: Option<String>,
) -> Result<Session> {
    let agents = AgentStore::load(LocalStore::new(&paths.store_dir)).await?;
    let mut session = Session::new(Arc::new(optimizer), config);

    let agent = match agent_id.as_deref() {
        Some(id) => Some(agents.get(id)?),
        None => agents.active(),
    };
    if let Some(agent) = agent {
        session.apply_agent(agent);
    }
    Ok(session)
}

async fn cmd_optimize(
    out: &OutputContext<'_>,
    paths: &DataPaths,
    text: String,
    mode: Option<OptimizationMode>,
    format: Option<OutputFormat>,
    agent: Option<String>,
    no_delay: bool,
) -> Result<()> {
    let config = AppConfig::load(&paths.root).await?;
    let optimizer = if no_delay {
        Optimizer::instant()
    } else {
        Optimizer::new(config.optimizer.delay())
    };

    let mut session = build_session(paths, &config, optimizer, agent).await?;
    if let Some(mode) = mode {
        session.set_mode(Some(mode));
    }
    if let Some(format) = format {
        session.set_format(format);
    }
    session.set_input(text);
    session.ensure_ready()?;

    let spinner = if out.writer.is_text() && !no_delay {
        Some(out.display.create_spinner("Optimizing prompt..."))
    } else {
        None
    };

    let result = session.submit().await.map(str::to_string);

    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    let output = result?;

    match out.writer.mode() {
        OutputMode::Text => out.display.print_optimized(&output, session.format()),
        OutputMode::Json => out.writer.emit_optimized(&OptimizeOutput {
            input: session.input().to_string(),
            output,
            mode: session.mode(),
            format: session.format(),
        }),
    }

    Ok(())
}

async fn cmd_shell(out: &OutputContext<'_>, paths: &DataPaths, agent: Option<String>) -> Result<()> {
    let config = AppConfig::load(&paths.root).await?;
    let optimizer = Optimizer::new(config.optimizer.delay());
    let session = build_session(paths, &config, optimizer, agent).await?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    InteractiveShell::new(session, out.display).run(stdin).await
}

async fn cmd_agents(out: &OutputContext<'_>, paths: &DataPaths, action: AgentAction) -> Result<()> {
    ensure_initialized(paths)?;
    let mut agents = AgentStore::load(open_store(paths).await?).await?;

    match action {
        AgentAction::List => match out.writer.mode() {
            OutputMode::Text => {
                out.display.print_header("Agents");
                out.display.print_agents_table(agents.list());
            }
            OutputMode::Json => out.writer.emit_agents(agents.list()),
        },
        AgentAction::Show { id } => {
            let agent = agents.get(&id)?;
            match out.writer.mode() {
                OutputMode::Text => out.display.print_agent_detail(agent),
                OutputMode::Json => out.writer.emit_agent(agent),
            }
        }
        AgentAction::Create { fields } => {
            let draft = merge_fields(AgentDraft::default(), fields)?;
            let agent = agents.create(draft).await?;
            match out.writer.mode() {
                OutputMode::Text => out
                    .display
                    .print_success(&format!("Created agent {} ({})", agent.name, agent.id)),
                OutputMode::Json => out.writer.emit_agent(&agent),
            }
        }
        AgentAction::Edit { id, fields } => {
            let draft = merge_fields(agents.get(&id)?.to_draft(), fields)?;
            let agent = agents.edit(&id, draft).await?;
            match out.writer.mode() {
                OutputMode::Text => out
                    .display
                    .print_success(&format!("Updated agent {}", agent.id)),
                OutputMode::Json => out.writer.emit_agent(agent),
            }
        }
        AgentAction::Delete { id } => {
            let removed = agents.delete(&id).await?;
            match out.writer.mode() {
                OutputMode::Text => out
                    .display
                    .print_success(&format!("Deleted agent {}", removed.name)),
                OutputMode::Json => out.writer.emit_agent(&removed),
            }
        }
        AgentAction::Select { id } => {
            let agent = agents.select(&id).await?;
            match out.writer.mode() {
                OutputMode::Text => out
                    .display
                    .print_success(&format!("Active agent: {}", agent.name)),
                OutputMode::Json => out.writer.emit_agent(agent),
            }
        }
    }

    Ok(())
}

/// Overlay the flags that were given onto `draft`.
fn merge_fields(mut draft: AgentDraft, fields: AgentFields) -> Result<AgentDraft> {
    if let Some(name) = fields.name {
        draft.name = name;
    }
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if let Some(provider) = fields.provider {
        // Switching provider without naming a model picks that provider's first model.
        if fields.model.is_none()
            && let Some((_, models)) = AGENT_PROVIDERS.iter().find(|(name, _)| *name == provider)
        {
            draft.model = models[0].to_string();
        }
        draft.api_provider = provider;
    }
    if let Some(model) = fields.model {
        draft.model = model;
    }
    if let Some(format) = fields.format {
        draft.output_format = format_label(&format)?;
    }
    if let Some(placeholder) = fields.placeholder {
        draft.placeholder = placeholder;
    }
    if let Some(system_prompt) = fields.system_prompt {
        draft.system_prompt = system_prompt;
    }
    Ok(draft)
}

/// Canonical label for an agent's output format: a format, or a mode title.
fn format_label(input: &str) -> Result<String> {
    if let Ok(format) = input.parse::<OutputFormat>() {
        return Ok(format.label().to_string());
    }
    input
        .parse::<OptimizationMode>()
        .map(|mode| mode.title().to_string())
        .map_err(|_| PilotError::UnknownFormat(input.to_string()))
}

async fn cmd_providers(
    out: &OutputContext<'_>,
    paths: &DataPaths,
    action: ProviderAction,
) -> Result<()> {
    ensure_initialized(paths)?;
    let store = open_store(paths).await?;
    let mut settings = ProviderSettings::load(&store).await?;

    let message = match action {
        ProviderAction::List => {
            match out.writer.mode() {
                OutputMode::Text => {
                    out.display.print_header("Providers");
                    out.display.print_providers(&settings);
                }
                OutputMode::Json => out.writer.emit_providers(&settings),
            }
            return Ok(());
        }
        ProviderAction::Toggle { provider } => {
            let id = parse_provider(&provider)?;
            let enabled = settings.toggle(id);
            format!(
                "{} {}",
                id.info().name,
                if enabled { "enabled" } else { "disabled" }
            )
        }
        ProviderAction::SetKey { provider, key } => {
            let id = parse_provider(&provider)?;
            settings.set_api_key(id, key);
            format!("API key saved for {}", id.info().name)
        }
        ProviderAction::SetModel { provider, model } => {
            let id = parse_provider(&provider)?;
            settings.select_model(id, &model)?;
            format!("Default model for {}: {}", id.info().name, model)
        }
    };

    settings.save(&store).await?;
    match out.writer.mode() {
        OutputMode::Text => out.display.print_success(&message),
        OutputMode::Json => out.writer.emit_message(&message),
    }
    Ok(())
}

fn parse_provider(input: &str) -> Result<ProviderId> {
    input
        .parse()
        .map_err(|_| PilotError::UnknownProvider(input.to_string()))
}

fn cmd_labels<'a>(out: &OutputContext<'_>, title: &str, labels: impl Iterator<Item = &'a str>) {
    match out.writer.mode() {
        OutputMode::Text => out.display.print_labels(title, labels),
        OutputMode::Json => out.writer.emit_value(&labels.collect::<Vec<_>>()),
    }
}

async fn cmd_config(out: &OutputContext<'_>, paths: &DataPaths, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = AppConfig::load(&paths.root).await?;
            match out.writer.mode() {
                OutputMode::Text => {
                    let content = toml::to_string_pretty(&config)
                        .map_err(|e| PilotError::Config(e.to_string()))?;
                    println!("{}", content);
                }
                OutputMode::Json => {
                    let json = serde_json::to_string_pretty(&config)?;
                    println!("{}", json);
                }
            }
        }
        ConfigAction::Reset => {
            ensure_initialized(paths)?;
            AppConfig::default().save(&paths.root).await?;
            if out.writer.is_text() {
                out.display
                    .print_success("Configuration reset to defaults.");
            }
        }
    }

    Ok(())
}
