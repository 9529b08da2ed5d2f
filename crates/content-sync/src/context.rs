use std::fmt;
use std::str::FromStr;

/// The target environment for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    /// Prod runs route every variant through the review workflow step
    /// before publication.
    pub fn requires_review(self) -> bool {
        matches!(self, Self::Prod)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dev => write!(f, "dev"),
            Self::Prod => write!(f, "prod"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown environment: {0} (expected \"dev\" or \"prod\")")]
pub struct ParseEnvironmentError(String);

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => Err(ParseEnvironmentError(other.to_owned())),
        }
    }
}

/// Everything a run needs to know about its target, resolved once per
/// invocation by the caller and passed explicitly. There is no global
/// configuration to mutate mid-run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub environment: Environment,
    pub project_id: String,
    pub content_type: String,
}

impl RunContext {
    pub fn new(
        environment: Environment,
        project_id: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            project_id: project_id.into(),
            content_type: content_type.into(),
        }
    }
}
