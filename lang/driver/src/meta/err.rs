use super::pack::ModuleName;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetaError {
    #[error("module not found: {0}")]
    UnresolvedModule(ModuleName),
    #[error("not a fado module: {0}")]
    NotAModule(ModuleName),
    #[error("malformed interface for {0}: {1}")]
    MalformedInterface(ModuleName, String),
}

pub type Result<T> = std::result::Result<T, MetaError>;
