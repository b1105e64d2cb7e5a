//! Native compilation of a package's generated sources.
//!
//! The code generator leaves one native source per module behind; this stage
//! builds the external compiler's command line from the search path, the
//! output directory and that source list, runs it, and mirrors its stderr.
//! Stdout is never consulted for control decisions; the exit status is.

use super::err::{CodegenError, Result};
use sculptor::ShaSnap;
use std::{
    io::{Read, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

/// The external native compiler command prefix.
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self { program: "cc".to_string(), args: Vec::new() }
    }
}

/// One package worth of generated native sources.
pub struct NativePackage {
    pub name: String,
    /// generated sources, one per module, named after the module
    pub srcs: Vec<PathBuf>,
    /// directories of previously compiled units, searched for headers
    pub search_path: Vec<PathBuf>,
    pub out_dir: PathBuf,
}

impl NativePackage {
    /// Compile the package: a single toolchain invocation that drops one
    /// object per source into the output directory. Answers with the object
    /// paths the toolchain was asked to produce.
    pub fn compile(&self, toolchain: &Toolchain) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.out_dir).map_err(CodegenError::OutDirError)?;

        let mut cmd = Command::new(&toolchain.program);
        // objects land next to the other units of the package
        cmd.current_dir(&self.out_dir);
        cmd.args(&toolchain.args);
        for dir in &self.search_path {
            let dir = dir.canonicalize().map_err(|e| CodegenError::SearchPathError {
                path: dir.clone(),
                source: e,
            })?;
            cmd.arg("-I").arg(dir);
        }
        cmd.arg("-c");
        let mut objects = Vec::new();
        for src in &self.srcs {
            let src = src.canonicalize().map_err(|e| CodegenError::SrcReadError {
                path: src.clone(),
                source: e,
            })?;
            objects.push(self.out_dir.join(src.with_extension("o").file_name().unwrap()));
            cmd.arg(src);
        }
        run_tool(&toolchain.program, cmd)?;
        Ok(objects)
    }

    /// Fingerprint of the package: a sha snapshot over its source texts, the
    /// value module interfaces record so later builds can tell whether a
    /// dependency moved underneath them.
    pub fn fingerprint(&self) -> Result<String> {
        let mut text = String::new();
        for src in &self.srcs {
            text += &std::fs::read_to_string(src).map_err(|e| CodegenError::SrcReadError {
                path: src.clone(),
                source: e,
            })?;
        }
        Ok(text.snap())
    }
}

/// Run one external tool to completion, mirroring its stderr onto ours
/// byte-for-byte while keeping a copy for the failure report.
fn run_tool(tool: &str, mut cmd: Command) -> Result<()> {
    log::info!("running: {:?}", cmd);
    cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::piped());
    let mut child = cmd
        .spawn()
        .map_err(|e| CodegenError::ToolSpawn { tool: tool.to_string(), source: e })?;
    let mut diagnostics = Vec::new();
    if let Some(mut stderr) = child.stderr.take() {
        let mut host = std::io::stderr();
        let mut buf = [0u8; 4096];
        loop {
            let n = stderr.read(&mut buf).map_err(|e| CodegenError::DiagnosticPump {
                tool: tool.to_string(),
                source: e,
            })?;
            if n == 0 {
                break;
            }
            host.write_all(&buf[..n]).map_err(|e| CodegenError::DiagnosticPump {
                tool: tool.to_string(),
                source: e,
            })?;
            diagnostics.extend_from_slice(&buf[..n]);
        }
    }
    let status = child
        .wait()
        .map_err(|e| CodegenError::ToolWait { tool: tool.to_string(), source: e })?;
    if !status.success() {
        return Err(CodegenError::ToolFailure {
            tool: tool.to_string(),
            status,
            diagnostics: String::from_utf8_lossy(&diagnostics).into_owned(),
        });
    }
    Ok(())
}
