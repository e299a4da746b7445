use chrono::Utc;
use tracing::{debug, info};

use super::{Agent, AgentDraft, seed_agents};
use crate::error::{PilotError, Result};
use crate::storage::LocalStore;

pub const AGENTS_KEY: &str = "agents";

/// Agent presets held in memory and mirrored to the local store on every change.
pub struct AgentStore {
    store: LocalStore,
    agents: Vec<Agent>,
}

impl AgentStore {
    /// Load saved agents, falling back to the seed presets.
    pub async fn load(store: LocalStore) -> Result<Self> {
        let agents = match store.get::<Vec<Agent>>(AGENTS_KEY).await? {
            Some(agents) => agents,
            None => {
                debug!("No saved agents, using seed presets");
                seed_agents()
            }
        };
        Ok(Self { store, agents })
    }

    pub fn list(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get(&self, id: &str) -> Result<&Agent> {
        self.agents
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| PilotError::AgentNotFound(id.to_string()))
    }

    pub fn active(&self) -> Option<&Agent> {
        self.agents.iter().find(|a| a.is_active)
    }

    pub async fn create(&mut self, draft: AgentDraft) -> Result<Agent> {
        draft.validate()?;
        let agent = Agent::from_draft(self.next_id(), draft);
        let mut agents = self.agents.clone();
        agents.push(agent.clone());
        self.commit(agents).await?;
        info!(id = %agent.id, name = %agent.name, "Created agent");
        Ok(agent)
    }

    pub async fn edit(&mut self, id: &str, draft: AgentDraft) -> Result<&Agent> {
        draft.validate()?;
        let index = self.position(id)?;
        let mut agents = self.agents.clone();
        agents[index].apply(draft);
        self.commit(agents).await?;
        info!(id, "Updated agent");
        Ok(&self.agents[index])
    }

    pub async fn delete(&mut self, id: &str) -> Result<Agent> {
        let index = self.position(id)?;
        let mut agents = self.agents.clone();
        let removed = agents.remove(index);
        self.commit(agents).await?;
        info!(id, name = %removed.name, "Deleted agent");
        Ok(removed)
    }

    /// Make `id` the only active agent.
    pub async fn select(&mut self, id: &str) -> Result<&Agent> {
        let index = self.position(id)?;
        let mut agents = self.agents.clone();
        for (i, agent) in agents.iter_mut().enumerate() {
            agent.is_active = i == index;
        }
        self.commit(agents).await?;
        info!(id, "Selected agent");
        Ok(&self.agents[index])
    }

    pub async fn save(&self) -> Result<()> {
        self.store.set(AGENTS_KEY, &self.agents).await
    }

    /// Persist `agents`, then adopt them. A failed write leaves the list unchanged.
    async fn commit(&mut self, agents: Vec<Agent>) -> Result<()> {
        self.store.set(AGENTS_KEY, &agents).await?;
        self.agents = agents;
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.agents
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| PilotError::AgentNotFound(id.to_string()))
    }

    /// Millisecond timestamp, bumped past any id already taken.
    fn next_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.agents.iter().any(|a| a.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}
