use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransEditError {
    #[error("Empty key path")]
    EmptyKeyPath,
    #[error("Path not found: {0}")]
    PathNotFound(String),
    #[error("Not an object: {0}")]
    NotAnObject(String),
    #[error("Interrupted")]
    Interrupted,
}
