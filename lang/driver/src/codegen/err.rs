use std::{io, path::PathBuf, process::ExitStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Failed to create output directory: {0}")]
    OutDirError(io::Error),
    #[error("Failed to read source file {path}: {source}")]
    SrcReadError { path: PathBuf, source: io::Error },
    #[error("Failed to resolve search path entry {path}: {source}")]
    SearchPathError { path: PathBuf, source: io::Error },
    #[error("Failed to run {tool}: {source}")]
    ToolSpawn { tool: String, source: io::Error },
    #[error("Failed to pump diagnostics of {tool}: {source}")]
    DiagnosticPump { tool: String, source: io::Error },
    #[error("Failed to wait for {tool}: {source}")]
    ToolWait { tool: String, source: io::Error },
    #[error("{tool} terminated with {status}\n{diagnostics}")]
    ToolFailure { tool: String, status: ExitStatus, diagnostics: String },
}

pub type Result<T> = std::result::Result<T, CodegenError>;
