use clap::Parser;
use cli::{Cli, Commands};
use fado_driver::{BuildSystem, ModuleName, NativePackage};

mod cli;

fn main() -> Result<(), String> {
    env_logger::init();
    match Cli::parse().command {
        | Commands::Build { srcs, name, search, out_dir } => {
            let build_sys = BuildSystem::new();
            let pack = NativePackage { name, srcs, search_path: search, out_dir };
            let objects = build_sys.compile_package(&pack).map_err(|e| e.to_string())?;
            for obj in objects {
                println!("{}", obj.display());
            }
        }
        | Commands::Ops { module, search } => {
            let mut build_sys = BuildSystem::new();
            if !search.is_empty() {
                build_sys.conf.search_path = search;
            }
            let ops =
                build_sys.exported_operators(&ModuleName::new(module)).map_err(|e| e.to_string())?;
            for op in ops {
                println!("{}", op);
            }
        }
    }
    Ok(())
}
