use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("{0}")]
    CodegenError(#[from] crate::codegen::err::CodegenError),
    #[error("{0}")]
    MetaError(#[from] crate::meta::err::MetaError),
}

pub type Result<T> = std::result::Result<T, BuildError>;
