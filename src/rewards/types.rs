use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mentor {
    pub name: String,
    /// Whether the mentor opted in to receive reward money
    pub accepts_reward: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    /// Whether sponsorship money was actually received for this project
    #[serde(default = "default_eligible")]
    pub eligible: bool,
    pub mentors: Vec<Mentor>,
}

fn default_eligible() -> bool {
    true
}

/// Which projects to show when listing the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Eligible,
    Ineligible,
    Participating,
    All,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Eligible => write!(f, "eligible"),
            ProjectStatus::Ineligible => write!(f, "ineligible"),
            ProjectStatus::Participating => write!(f, "participating"),
            ProjectStatus::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eligible" => Ok(ProjectStatus::Eligible),
            "ineligible" => Ok(ProjectStatus::Ineligible),
            "participating" => Ok(ProjectStatus::Participating),
            "all" => Ok(ProjectStatus::All),
            other => Err(format!("unknown project status: {}", other)),
        }
    }
}

impl Mentor {
    pub fn new(name: impl Into<String>, accepts_reward: bool) -> Self {
        Self {
            name: name.into(),
            accepts_reward,
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>, mentors: Vec<Mentor>) -> Self {
        Self {
            name: name.into(),
            eligible: true,
            mentors,
        }
    }

    pub fn ineligible(mut self) -> Self {
        self.eligible = false;
        self
    }

    /// Mentors of this project that accept the reward, in roster order
    pub fn reward_recipients(&self) -> impl Iterator<Item = &Mentor> {
        self.mentors.iter().filter(|m| m.accepts_reward)
    }

    /// An eligible project with at least one reward-accepting mentor
    pub fn is_participating(&self) -> bool {
        self.eligible && self.mentors.iter().any(|m| m.accepts_reward)
    }

    pub fn matches(&self, status: ProjectStatus) -> bool {
        match status {
            ProjectStatus::Eligible => self.eligible,
            ProjectStatus::Ineligible => !self.eligible,
            ProjectStatus::Participating => self.is_participating(),
            ProjectStatus::All => true,
        }
    }
}
