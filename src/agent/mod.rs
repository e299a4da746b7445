//! Agent presets.
//!
//! - `Agent`, `AgentDraft`: preset metadata and its editable form
//! - `AgentStore`: CRUD over the saved list with exclusive selection

mod store;
mod types;

pub use store::{AGENTS_KEY, AgentStore};
pub use types::{AGENT_PROVIDERS, Agent, AgentDraft, seed_agents};
