//! Agent profile registry.
//!
//! The orchestration layer names its automation agents inside issue and
//! comment text. This module holds the read-only table of known agents and
//! the two lookups the formatter relies on: exact-name resolution for issue
//! delegates, and first-match substring detection for comment bodies.
//!
//! The registry is built once at startup and shared by reference; there is
//! no runtime mutation.

// ============================================================================
// AgentProfile
// ============================================================================

/// A single agent identity: display attributes plus the embed color used
/// when the agent is attributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentProfile {
    /// Lowercase snake-case identifier, matched case-sensitively.
    pub name: &'static str,
    pub emoji: &'static str,
    pub role: &'static str,
    /// 24-bit RGB color applied to embeds attributed to this agent.
    pub color: u32,
    pub description: &'static str,
}

/// The built-in agent roster, in detection precedence order.
const DEFAULT_PROFILES: &[AgentProfile] = &[
    AgentProfile {
        name: "the_didact",
        emoji: "🔍",
        role: "Research & Intelligence",
        color: 0x3498DB,
        description: "Web scraping, documentation, competitive analysis",
    },
    AgentProfile {
        name: "hollowed_eyes",
        emoji: "⚙️",
        role: "Implementation & Code",
        color: 0x2ECC71,
        description: "Development, GitHub operations, MCP integration",
    },
    AgentProfile {
        name: "loveless",
        emoji: "🛡️",
        role: "QA & Security",
        color: 0xE74C3C,
        description: "Testing, security analysis, cross-browser validation",
    },
    AgentProfile {
        name: "zhadyz",
        emoji: "🚀",
        role: "DevOps & Releases",
        color: 0x9B59B6,
        description: "CI/CD, deployments, cleanup operations",
    },
    AgentProfile {
        name: "the_architect",
        emoji: "🏗️",
        role: "System Architecture",
        color: 0x34495E,
        description: "Design patterns, technical decisions, scalability",
    },
    AgentProfile {
        name: "the_librarian",
        emoji: "📚",
        role: "Requirements & Clarification",
        color: 0x16A085,
        description: "Stakeholder communication, spec expansion",
    },
    AgentProfile {
        name: "the_oracle",
        emoji: "🔮",
        role: "Strategic Validation",
        color: 0xF39C12,
        description: "Decision validation, failure analysis, risk assessment",
    },
    AgentProfile {
        name: "the_sentinel",
        emoji: "⚡",
        role: "CI/CD Pipelines",
        color: 0xE67E22,
        description: "GitHub Actions, automation, build processes",
    },
    AgentProfile {
        name: "the_curator",
        emoji: "🧹",
        role: "Repository Maintenance",
        color: 0x95A5A6,
        description: "Code cleanup, dependency updates, housekeeping",
    },
    AgentProfile {
        name: "the_scribe",
        emoji: "✍️",
        role: "Documentation",
        color: 0x3498DB,
        description: "Technical writing, API docs, README maintenance",
    },
    AgentProfile {
        name: "the_analyst",
        emoji: "📊",
        role: "Data & Analytics",
        color: 0x1ABC9C,
        description: "Performance metrics, business intelligence",
    },
    AgentProfile {
        name: "cinna",
        emoji: "🎨",
        role: "Design & UI/UX",
        color: 0xE91E63,
        description: "Design systems, user experience, visual design",
    },
    AgentProfile {
        name: "the_cartographer",
        emoji: "🗺️",
        role: "Deployment & Infrastructure",
        color: 0x607D8B,
        description: "Infrastructure planning, deployment strategies",
    },
];

// ============================================================================
// AgentRegistry
// ============================================================================

/// Immutable lookup table of agent profiles.
///
/// Iteration order is declaration order, which is also the precedence order
/// for [`AgentRegistry::detect`].
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    profiles: Vec<AgentProfile>,
}

impl AgentRegistry {
    /// Build a registry from an explicit profile list.
    pub fn new(profiles: Vec<AgentProfile>) -> Self {
        Self { profiles }
    }

    /// Build the registry with the built-in agent roster.
    pub fn with_default_profiles() -> Self {
        Self::new(DEFAULT_PROFILES.to_vec())
    }

    /// Resolve a profile by exact name.
    pub fn get(&self, name: &str) -> Option<&AgentProfile> {
        self.profiles.iter().find(|profile| profile.name == name)
    }

    /// Return the first profile whose name occurs as a substring of `text`.
    ///
    /// The scan is case-sensitive: agent names are lowercase identifiers and
    /// a capitalized mention is deliberately not a match.
    pub fn detect(&self, text: &str) -> Option<&AgentProfile> {
        self.profiles
            .iter()
            .find(|profile| text.contains(profile.name))
    }

    /// Render the attribution block for `name`.
    ///
    /// Registered agents render with their role and description; an
    /// unregistered name falls back to a bare robot line so that delegate
    /// assignments outside the roster still surface.
    pub fn info_block(&self, name: &str) -> String {
        match self.get(name) {
            Some(profile) => format!(
                "{} **{}**\n> *{}* - {}",
                profile.emoji, profile.name, profile.role, profile.description
            ),
            None => format!("🤖 **{name}**"),
        }
    }

    /// Iterate the profiles in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::with_default_profiles()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
