use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl From<taffy::TaffyError> for Error {
    fn from(err: taffy::TaffyError) -> Self {
        Error::Layout(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
