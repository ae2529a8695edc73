use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("cannot allocate a {width}x{height} canvas")]
    InvalidCanvas { width: u32, height: u32 },
    #[error("failed to read style config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid style config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid tap script: {0}")]
    InvalidScript(String),
    #[error("failed to lay out label: {0}")]
    Label(String),
    #[error("failed to encode png: {0}")]
    Png(String),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("window setup failed: {0}")]
    Window(String),
}

pub type Result<T> = std::result::Result<T, ToggleError>;
