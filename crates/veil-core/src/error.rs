use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid custom pattern {id}: {reason}")]
    InvalidCustomPattern { id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
