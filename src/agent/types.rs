use serde::{Deserialize, Serialize};

use crate::error::{PilotError, Result};
use crate::transform::{OptimizationMode, OutputFormat};

/// Providers and models offered when creating an agent preset.
pub const AGENT_PROVIDERS: &[(&str, &[&str])] = &[
    (
        "Google AI (Gemini)",
        &[
            "Gemini 2.5 Flash Preview (05-20)",
            "Gemini 2.5 Pro Preview (05-06)",
            "Gemini 2.5 Flash Preview (04-17)",
        ],
    ),
    (
        "OpenRouter",
        &[
            "deepseek/deepseek-r1-0528-qwen3-8b",
            "google/gemini-2.5-flash-preview-05-20",
            "deepseek/deepseek-r1-0528",
        ],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
    pub api_provider: String,
    pub model: String,
    pub output_format: String,
    #[serde(default)]
    pub placeholder: String,
    pub system_prompt: String,
}

impl Agent {
    pub fn from_draft(id: impl Into<String>, draft: AgentDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            description: draft.description,
            is_active: false,
            api_provider: draft.api_provider,
            model: draft.model,
            output_format: draft.output_format,
            placeholder: draft.placeholder,
            system_prompt: draft.system_prompt,
        }
    }

    /// Replace every editable field, keeping `id` and `is_active`.
    pub fn apply(&mut self, draft: AgentDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.api_provider = draft.api_provider;
        self.model = draft.model;
        self.output_format = draft.output_format;
        self.placeholder = draft.placeholder;
        self.system_prompt = draft.system_prompt;
    }

    pub fn to_draft(&self) -> AgentDraft {
        AgentDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            api_provider: self.api_provider.clone(),
            model: self.model.clone(),
            output_format: self.output_format.clone(),
            placeholder: self.placeholder.clone(),
            system_prompt: self.system_prompt.clone(),
        }
    }

    /// Mode and format a session starts with when this agent is active.
    ///
    /// Older presets store a mode title ("Rewrite Perfectly", "Clarify") in
    /// `output_format`; those select the mode and leave the format to the
    /// session. `None` means the agent does not set that field.
    pub fn session_defaults(&self) -> (Option<OptimizationMode>, Option<OutputFormat>) {
        if let Ok(format) = self.output_format.parse::<OutputFormat>() {
            return (None, Some(format));
        }
        (self.output_format.parse::<OptimizationMode>().ok(), None)
    }
}

/// Editable fields of an agent, as submitted from the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDraft {
    pub name: String,
    pub description: String,
    pub api_provider: String,
    pub model: String,
    pub output_format: String,
    pub placeholder: String,
    pub system_prompt: String,
}

impl AgentDraft {
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>, model: impl Into<String>) -> Self {
        self.api_provider = provider.into();
        self.model = model.into();
        self
    }

    pub fn with_output_format(mut self, output_format: impl Into<String>) -> Self {
        self.output_format = output_format.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Name and system prompt are the only required fields.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.system_prompt.trim().is_empty() {
            missing.push("system prompt");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PilotError::Validation(format!(
                "required field(s) missing: {}",
                missing.join(", ")
            )))
        }
    }
}

impl Default for AgentDraft {
    fn default() -> Self {
        let (provider, models) = AGENT_PROVIDERS[0];
        Self {
            name: String::new(),
            description: String::new(),
            api_provider: provider.to_string(),
            model: models[0].to_string(),
            output_format: OutputFormat::default().label().to_string(),
            placeholder: String::new(),
            system_prompt: String::new(),
        }
    }
}

/// Presets used when nothing has been saved yet.
pub fn seed_agents() -> Vec<Agent> {
    vec![
        Agent {
            id: "1".to_string(),
            name: "Frontend Design & HTML".to_string(),
            description: "Helps craft beautiful, functional websites with clean code".to_string(),
            is_active: false,
            api_provider: "Google AI (Gemini)".to_string(),
            model: "Gemini 2.5 Flash Preview (05-20)".to_string(),
            output_format: OptimizationMode::RewritePerfectly.title().to_string(),
            placeholder: "How can I improve my website design?".to_string(),
            system_prompt: "You are an expert frontend developer...".to_string(),
        },
        Agent {
            id: "2".to_string(),
            name: "Prompt Eng".to_string(),
            description: "An AI agent specialized in crafting effective prompts".to_string(),
            is_active: true,
            api_provider: "OpenRouter".to_string(),
            model: "deepseek/deepseek-r1-0528-qwen3-8b".to_string(),
            output_format: OptimizationMode::Clarify.title().to_string(),
            placeholder: "Enter your prompt here...".to_string(),
            system_prompt: "You are a prompt engineering expert...".to_string(),
        },
    ]
}
