use sculptor::{AppAuthor, impl_serde_str_toml};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conf {
    /// external native compiler the generated sources are handed to
    pub toolchain: String,
    /// extra arguments placed before the built command line
    pub toolchain_args: Vec<String>,
    /// directories searched for compiled units
    pub search_path: Vec<PathBuf>,
}

impl Default for Conf {
    fn default() -> Self {
        Self { toolchain: "cc".to_string(), toolchain_args: Vec::new(), search_path: Vec::new() }
    }
}

impl_serde_str_toml!(Conf);

impl AppAuthor for Conf {
    fn app_name() -> &'static str {
        "Fado"
    }

    fn author() -> &'static str {
        "FadoProject"
    }
}
