//! Subcommand implementations.

pub mod config;
pub mod generate;
pub mod types;

use std::path::Path;

use anyhow::Context;
use luashim_engine::{find_config, BindingConfig};

/// Load the configuration: an explicit path, else the nearest `luashim.toml`
/// above the current directory, else the built-in ImGui preset.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<BindingConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config(&std::env::current_dir()?),
    };

    match path {
        Some(path) => {
            log::info!("using config {}", path.display());
            BindingConfig::from_file(&path).with_context(|| format!("loading {}", path.display()))
        }
        None => {
            log::info!("no luashim.toml found; using the ImGui preset");
            Ok(BindingConfig::imgui())
        }
    }
}
