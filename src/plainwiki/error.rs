use thiserror::Error;

#[derive(Error, Debug)]
pub enum WikiError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Invalid title: {0:?}")]
    InvalidTitle(String),

    #[error("Title is required")]
    EmptyTitle,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Indexer stopped")]
    IndexerStopped,

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WikiError>;
