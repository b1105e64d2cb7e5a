use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a package of generated native sources
    Build {
        /// Generated source files
        #[arg(value_name = "FILE")]
        srcs: Vec<PathBuf>,
        /// Name of the package
        #[arg(long)]
        name: String,
        /// Directories searched for compiled units
        #[arg(short = 'I', long)]
        search: Vec<PathBuf>,
        /// Output directory
        #[arg(short, long, default_value = "build")]
        out_dir: PathBuf,
    },
    /// Print the exported operators of a compiled module
    Ops {
        /// Fully qualified module name
        #[arg(value_name = "MODULE")]
        module: String,
        /// Directories searched for compiled units (defaults to configuration)
        #[arg(short = 'I', long)]
        search: Vec<PathBuf>,
    },
}
