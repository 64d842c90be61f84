use std::path::PathBuf;

use anyhow::{Context, Result};

use atc_sched::EnvConfig;

mod generate;
mod run;

pub use generate::Generate;
pub use run::Run;

fn load_config(path: Option<&PathBuf>) -> Result<EnvConfig> {
    match path {
        Some(path) => EnvConfig::from_path(path).with_context(|| format!("cannot use config {}", path.display())),
        None => Ok(EnvConfig::default()),
    }
}
