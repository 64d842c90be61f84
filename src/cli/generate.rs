use std::{fs::File, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use atc_sched::Aircraft;
use atc_sched::generate::{entropy_seed, seeded_rng};

#[derive(Debug, Args)]
pub struct Generate {
    /// An optional seed to kickstart the arrival generation
    #[clap(short='s', long)]
    seed: Option<u64>,
    /// The number of arrival batches to sample
    #[clap(short='n', long, default_value="1")]
    nb_batches: u32,
    /// Path of a JSON environment config providing the arrival parameters
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Name of the file where to write the batches
    #[clap(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Batch {
    step_index: u32,
    aircraft: Vec<Aircraft>,
}

#[derive(Debug, Serialize)]
struct Arrivals {
    seed: u64,
    batches: Vec<Batch>,
}

impl Generate {

    pub fn generate(&self) -> Result<()> {
        let config = super::load_config(self.config.as_ref())?;
        let seed = self.seed.unwrap_or_else(entropy_seed);
        let mut rng = seeded_rng(seed);

        let batches = (0..self.nb_batches)
            .map(|i| i * config.spawn_interval)
            .map(|step_index| Batch { step_index, aircraft: config.arrivals.generate(step_index, &mut rng) })
            .collect();

        let arrivals = serde_json::to_string_pretty(&Arrivals { seed, batches })?;

        if let Some(output) = self.output.as_ref() {
            File::create(output)
                .and_then(|mut f| f.write_all(arrivals.as_bytes()))
                .with_context(|| format!("cannot write {}", output.display()))?;
        } else {
            println!("{arrivals}");
        }
        Ok(())
    }

}
