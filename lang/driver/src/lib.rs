//! A minimal build system for the fado language.
//!
//! The evaluation model lives in `fado-runtime`; this crate is the process
//! plumbing around it. It drives the external native toolchain over a
//! package's generated sources and answers reflective metadata queries
//! against already-compiled modules.

pub mod conf;
pub mod err;

/// invocation of the external native toolchain on generated sources
pub mod codegen {
    pub mod err;
    pub mod pack;

    #[cfg(test)]
    mod tests;
}

/// reflective queries against already-compiled module metadata
pub mod meta {
    pub mod err;
    pub mod pack;

    #[cfg(test)]
    mod tests;
}

pub use codegen::pack::{NativePackage, Toolchain};
pub use conf::Conf;
pub use err::*;
pub use meta::pack::{CompiledUnit, DirLoader, Fixity, ModuleMeta, ModuleName, OpDecl, UnitLoader};

use sculptor::{FileIO, ProjectInfo};
use std::path::PathBuf;

pub struct BuildSystem {
    /// configuration
    pub conf: Conf,
}

impl Default for BuildSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildSystem {
    pub fn new() -> Self {
        let path = Conf::config_dir().join("fado.toml");
        let file_conf = FileIO::new(path.clone());
        let conf = file_conf.load().unwrap_or_else(|_| {
            log::warn!("Using default configuration; suppose to find one at `{}`.", path.display());
            let conf: Conf = Default::default();
            file_conf.save(&conf).unwrap();
            conf
        });
        Self { conf }
    }

    /// A build system with an explicit configuration, bypassing the config
    /// file lookup.
    pub fn with_conf(conf: Conf) -> Self {
        Self { conf }
    }

    pub fn toolchain(&self) -> Toolchain {
        Toolchain { program: self.conf.toolchain.clone(), args: self.conf.toolchain_args.clone() }
    }

    pub fn loader(&self) -> DirLoader {
        DirLoader::new(self.conf.search_path.clone())
    }

    /// Hand a package's generated sources to the external toolchain; answers
    /// with the object files the toolchain was asked to produce.
    pub fn compile_package(&self, pack: &NativePackage) -> Result<Vec<PathBuf>> {
        let objects = pack.compile(&self.toolchain())?;
        log::info!("compiled package {} into {}", pack.name, pack.out_dir.display());
        Ok(objects)
    }

    /// Metadata of a compiled module. `None` means the unit exists on the
    /// search path but is not a fado module.
    pub fn module_meta(&self, name: &ModuleName) -> Result<Option<ModuleMeta>> {
        let unit = self.loader().load(name)?;
        Ok(unit.meta()?)
    }

    /// Exported operators of a module that has to be a fado module.
    pub fn exported_operators(&self, name: &ModuleName) -> Result<Vec<OpDecl>> {
        Ok(meta::pack::exported_operators(&self.loader(), name)?)
    }
}
