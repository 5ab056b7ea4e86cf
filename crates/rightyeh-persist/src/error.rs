use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PersistError {
    #[error("User not found")]
    UserNotFound(u64),

    #[error("Email already exists")]
    EmailExists(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;
