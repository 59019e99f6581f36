use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Load(String),

    #[error("{0}")]
    Mutation(String),

    #[error("{0}")]
    Validation(String),

    #[error("A save is already in progress")]
    SubmitInFlight,

    #[error("No form is open")]
    EditorClosed,

    #[error("Invalid username or password")]
    Unauthorized,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn is_load(&self) -> bool {
        matches!(self, AppError::Load(_))
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self, AppError::Mutation(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
