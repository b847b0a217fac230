//! Agent - A field operator who physically collects samples
//!
//! Agent is an Entity (has identity).
//! The identity is issued by an external identity provider; this system
//! never generates agent ids itself, it only records them.

/// Unique identifier for an Agent, as issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank identifiers are never valid references
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Agent - the sole party allowed to advance the samples assigned to it
#[derive(Debug, Clone)]
pub struct Agent {
    /// Unique identifier (Entity identity)
    id: AgentId,
    /// Display name
    name: String,
    /// Contact email
    email: String,
}

impl Agent {
    /// Create a new Agent
    pub fn new(id: AgentId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl PartialEq for Agent {
    fn eq(&self, other: &Self) -> bool {
        // Entity equality: same ID = same entity
        self.id == other.id
    }
}

impl Eq for Agent {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_creation() {
        let agent = Agent::new(
            AgentId::new("user_2fKkXqV6mJ8bN7pL9cR3aW4sY5z"),
            "Test Agent",
            "agent-test@example.com",
        );

        assert_eq!(agent.id().as_str(), "user_2fKkXqV6mJ8bN7pL9cR3aW4sY5z");
        assert_eq!(agent.name(), "Test Agent");
        assert_eq!(agent.email(), "agent-test@example.com");
    }

    #[test]
    fn test_entity_equality() {
        let agent1 = Agent::new(AgentId::new("a-001"), "Agent A", "a@example.com");
        let agent2 = Agent::new(AgentId::new("a-001"), "Renamed", "other@example.com");

        // Same ID = same entity (even if other fields differ)
        assert_eq!(agent1, agent2);
    }

    #[test]
    fn test_blank_id() {
        assert!(AgentId::new("").is_blank());
        assert!(AgentId::new("   ").is_blank());
        assert!(!AgentId::new("a-001").is_blank());
    }
}
