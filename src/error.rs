use crate::core::request::ResponseKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistError {
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),

    #[error("API Error {status}: {message}")]
    Api {
        status: u16,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unable to extract {0} code from the response.")]
    Extraction(ResponseKind),

    #[error("{0}")]
    MissingInput(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl AssistError {
    /// True for every failure that came from talking to the completion service.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AssistError::Upstream(_) | AssistError::Api { .. } | AssistError::MalformedResponse(_)
        )
    }

    /// The string shown in place of the expected output.
    pub fn to_display(&self) -> String {
        format!("Error: {self}")
    }
}

pub type Result<T> = std::result::Result<T, AssistError>;
