use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PilotError, Result};
use crate::storage::LocalStore;

pub const PROVIDER_SETTINGS_KEY: &str = "providerSettings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Gemini,
    OpenRouter,
    Anthropic,
    OpenAi,
}

/// Static description of a provider and the models it offers.
#[derive(Debug)]
pub struct ProviderInfo {
    pub id: ProviderId,
    pub name: &'static str,
    pub models: &'static [&'static str],
    pub requires_api_key: bool,
}

pub static PROVIDERS: [ProviderInfo; 4] = [
    ProviderInfo {
        id: ProviderId::Gemini,
        name: "Google Gemini",
        models: &[
            "gemini-2.5-flash-preview-05-20",
            "gemini-2.5-pro-preview-05-06",
            "gemini-2.5-flash-preview-04-17",
            "gemini-pro",
            "gemini-pro-vision",
        ],
        requires_api_key: true,
    },
    ProviderInfo {
        id: ProviderId::OpenRouter,
        name: "OpenRouter",
        models: &[
            "deepseek/deepseek-r1-0528-qwen3-8b",
            "google/gemini-2.5-flash-preview-05-20",
            "deepseek/deepseek-r1-0528",
            "openai/gpt-4-turbo",
            "openai/gpt-4",
            "openai/gpt-3.5-turbo",
            "anthropic/claude-3-opus",
            "anthropic/claude-3-sonnet",
            "anthropic/claude-2",
            "meta/llama-2-70b-chat",
            "google/gemini-pro",
            "mistral/mistral-large",
            "mistral/mistral-medium",
        ],
        requires_api_key: true,
    },
    ProviderInfo {
        id: ProviderId::Anthropic,
        name: "Anthropic",
        models: &[
            "claude-3-opus",
            "claude-3-sonnet",
            "claude-2.1",
            "claude-2.0",
            "claude-instant",
        ],
        requires_api_key: true,
    },
    ProviderInfo {
        id: ProviderId::OpenAi,
        name: "OpenAI",
        models: &[
            "gpt-4-turbo",
            "gpt-4",
            "gpt-3.5-turbo",
            "gpt-3.5-turbo-16k",
            "dall-e-3",
            "dall-e-2",
        ],
        requires_api_key: true,
    },
];

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenRouter => "openrouter",
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
        }
    }

    pub fn info(&self) -> &'static ProviderInfo {
        match self {
            Self::Gemini => &PROVIDERS[0],
            Self::OpenRouter => &PROVIDERS[1],
            Self::Anthropic => &PROVIDERS[2],
            Self::OpenAi => &PROVIDERS[3],
        }
    }

    pub fn default_model(&self) -> &'static str {
        self.info().models[0]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        PROVIDERS
            .iter()
            .find(|p| p.id.as_str() == needle || p.name.to_lowercase() == needle)
            .map(|p| p.id)
            .ok_or_else(|| format!("Invalid provider: {}", s))
    }
}

/// Per-provider toggles, API keys and default models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    pub active_providers: BTreeMap<ProviderId, bool>,
    pub api_keys: BTreeMap<ProviderId, String>,
    pub selected_models: BTreeMap<ProviderId, String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        let ids = PROVIDERS.iter().map(|p| p.id);
        Self {
            active_providers: ids.clone().map(|id| (id, false)).collect(),
            api_keys: ids.clone().map(|id| (id, String::new())).collect(),
            selected_models: ids.map(|id| (id, id.default_model().to_string())).collect(),
        }
    }
}

impl ProviderSettings {
    pub async fn load(store: &LocalStore) -> Result<Self> {
        Ok(store
            .get::<Self>(PROVIDER_SETTINGS_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn save(&self, store: &LocalStore) -> Result<()> {
        store.set(PROVIDER_SETTINGS_KEY, self).await?;
        info!("Saved provider settings");
        Ok(())
    }

    pub fn is_active(&self, provider: ProviderId) -> bool {
        self.active_providers.get(&provider).copied().unwrap_or(false)
    }

    /// Flip the provider's toggle and return the new state.
    pub fn toggle(&mut self, provider: ProviderId) -> bool {
        let active = self.active_providers.entry(provider).or_insert(false);
        *active = !*active;
        *active
    }

    pub fn api_key(&self, provider: ProviderId) -> &str {
        self.api_keys.get(&provider).map(String::as_str).unwrap_or("")
    }

    pub fn set_api_key(&mut self, provider: ProviderId, key: impl Into<String>) {
        self.api_keys.insert(provider, key.into());
    }

    pub fn selected_model(&self, provider: ProviderId) -> &str {
        self.selected_models
            .get(&provider)
            .map(String::as_str)
            .unwrap_or_else(|| provider.default_model())
    }

    pub fn select_model(&mut self, provider: ProviderId, model: &str) -> Result<()> {
        if !provider.info().models.contains(&model) {
            return Err(PilotError::UnknownModel {
                provider: provider.to_string(),
                model: model.to_string(),
            });
        }
        self.selected_models.insert(provider, model.to_string());
        Ok(())
    }
}

/// Show only the last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count == 0 {
        return String::from("(not set)");
    }
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}
