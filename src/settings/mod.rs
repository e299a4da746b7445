//! Provider settings: catalog, toggles, API keys and default models.

mod provider;

pub use provider::{
    PROVIDER_SETTINGS_KEY, PROVIDERS, ProviderId, ProviderInfo, ProviderSettings, mask_key,
};
