use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid JSON in {input} document: {message}")]
    InvalidJson { input: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub fn invalid_json(input: impl Into<String>, message: impl ToString) -> Self {
        Error::InvalidJson {
            input: input.into(),
            message: message.to_string(),
        }
    }
}
