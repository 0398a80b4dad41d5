use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JiraError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("JIRA returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to decode JIRA payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{what} not found: expected exactly one match, found {found}")]
    Cardinality { what: &'static str, found: usize },
    #[error("ID is incorrectly formatted. Expected format is `{expected}`")]
    MalformedId { expected: &'static str },
    #[error("Unable to determine context from field ID. Are there multiple contexts defined?")]
    AmbiguousContext,
    #[error("{resource} {id} was not readable after {attempts} attempts")]
    NotYetConsistent {
        resource: &'static str,
        id: String,
        attempts: u32,
    },
    #[error("No remote option matches desired option `{value}`")]
    UnmatchedOption { value: String },
    #[error("Remote option {id} is matched by more than one desired option")]
    DuplicateMatch { id: String },
    #[error("Invalid options manifest: {0}")]
    InvalidManifest(String),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<JiraError>,
    },
}

impl JiraError {
    /// The innermost error, with every `context` wrapper removed.
    pub fn root(&self) -> &JiraError {
        match self {
            JiraError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, JiraError>;

/// Attaches a human-readable description of the failed step.
pub trait ErrorContext<T> {
    fn context(self, context: &str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<JiraError>,
{
    fn context(self, context: &str) -> Result<T> {
        self.map_err(|err| JiraError::Context {
            context: context.to_string(),
            source: Box::new(err.into()),
        })
    }
}
