//! Metadata queries against already-compiled units.
//!
//! A compiled unit is the native artifact of one module. Units produced by
//! the fado compiler carry an interface file beside the artifact, headed by a
//! recognizable marker; foreign units on the same search path do not, and
//! that absence is an answer rather than a failure.

use super::err::{MetaError, Result};
use derive_more::From;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Marker heading every fado interface file.
pub const INTERFACE_MAGIC: &str = "#!fado:1";
/// Extension of the native artifact of a compiled unit.
pub const UNIT_EXT: &str = "o";
/// Extension of the interface carried beside it.
pub const INTERFACE_EXT: &str = "fdi";

/// Dotted fully qualified module name, e.g. `data.list`.
#[derive(From, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(pub String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Artifact file name relative to a search root; module naming is flat,
    /// dots included.
    fn artifact(&self, ext: &str) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.0, ext))
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixity of an exported operator.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Fixity {
    Left,
    Right,
    None,
}

/// One exported operator/fixity declaration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OpDecl {
    pub symbol: String,
    pub fixity: Fixity,
    pub prec: u8,
}

impl fmt::Display for OpDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.fixity {
            | Fixity::Left => "infixl",
            | Fixity::Right => "infixr",
            | Fixity::None => "infix",
        };
        write!(f, "{} {} {}", kind, self.prec, self.symbol)
    }
}

/// Module-level metadata a fado module carries in its interface.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ModuleMeta {
    pub module: String,
    pub fingerprint: String,
    #[serde(default)]
    pub ops: Vec<OpDecl>,
}

/// Resolution of fully qualified names to loaded compiled units.
pub trait UnitLoader {
    /// An unresolvable name is a failure; a resolvable unit that turns out
    /// not to be a fado module is not.
    fn load(&self, name: &ModuleName) -> Result<CompiledUnit>;
}

/// A compiled unit located on disk: the native artifact plus the raw text of
/// the interface sitting beside it, when there is one.
#[derive(Debug, Clone)]
pub struct CompiledUnit {
    pub name: ModuleName,
    pub object: PathBuf,
    pub interface: Option<String>,
}

impl CompiledUnit {
    /// Decode the module-level metadata.
    ///
    /// `None` means the unit exists but is not a fado module — no interface,
    /// or an interface without the marker. Callers that require a fado
    /// module turn that into [`MetaError::NotAModule`] themselves.
    pub fn meta(&self) -> Result<Option<ModuleMeta>> {
        let Some(interface) = &self.interface else {
            return Ok(None);
        };
        let Some(body) = interface.strip_prefix(INTERFACE_MAGIC) else {
            return Ok(None);
        };
        if !(body.is_empty() || body.starts_with(['\n', '\r'])) {
            return Ok(None);
        }
        let meta = toml::from_str(body)
            .map_err(|e| MetaError::MalformedInterface(self.name.clone(), e.to_string()))?;
        Ok(Some(meta))
    }
}

/// Search-path resolver over directories of compiled artifacts.
#[derive(Debug, Clone, Default)]
pub struct DirLoader {
    pub roots: Vec<PathBuf>,
}

impl DirLoader {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl UnitLoader for DirLoader {
    fn load(&self, name: &ModuleName) -> Result<CompiledUnit> {
        for root in &self.roots {
            let object = root.join(name.artifact(UNIT_EXT));
            if !object.is_file() {
                continue;
            }
            let interface = match std::fs::read_to_string(root.join(name.artifact(INTERFACE_EXT))) {
                | Ok(text) => Some(text),
                | Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                | Err(e) => return Err(MetaError::MalformedInterface(name.clone(), e.to_string())),
            };
            return Ok(CompiledUnit { name: name.clone(), object, interface });
        }
        Err(MetaError::UnresolvedModule(name.clone()))
    }
}

/// Exported operators of a module that has to be a fado module.
pub fn exported_operators(loader: &dyn UnitLoader, name: &ModuleName) -> Result<Vec<OpDecl>> {
    let unit = loader.load(name)?;
    match unit.meta()? {
        | Some(meta) => Ok(meta.ops),
        | None => Err(MetaError::NotAModule(name.clone())),
    }
}
