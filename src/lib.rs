use serde::Deserialize;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub mod binding;
pub mod bunch;
pub mod cavity;
pub mod element;
mod save;

use crate::bunch::{Bunch, PhaseSpace};
use crate::cavity::{cavity_pass, cavity_pass_par};
use crate::element::{CavityElement, ElementDescription};

// We use a type alias for f64/Float to easily support
// double and single precision.
#[cfg(feature = "dprec")]
pub type Float = f64;

#[cfg(not(feature = "dprec"))]
pub type Float = f32;

pub const PI: Float = std::f64::consts::PI as Float;
pub const TWO_PI: Float = 2.0 * std::f64::consts::PI as Float;
/// Speed of light in vacuum (m/s)
pub const C0: Float = 2.997_924_58e8 as Float;

#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    pub params: Params,
    pub element: ElementDescription,
    pub beam: Beam,
    pub setup: Setup,
    pub output: Output,
}

/// Run level parameters shared by every element of the lattice.
#[derive(Deserialize, Default)]
pub struct Params {
    #[serde(default)]
    pub energy: Float,
}

#[derive(Deserialize)]
pub struct Beam {
    pub n_prtl: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub mean: PhaseSpace,
    pub sigma: PhaseSpace,
}

#[derive(Deserialize)]
pub struct Setup {
    pub turns: u32,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

#[derive(Deserialize)]
pub struct Output {
    pub write_output: bool,
    pub output_interval: u32,
    pub stride: usize,
    #[serde(default = "default_outdir")]
    pub outdir: String,
}

fn default_outdir() -> String {
    "output".to_string()
}

impl Config {
    pub fn new() -> Result<Config> {
        Config::from_file("config.toml")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not open the {} file", path.display()))?;
        Config::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Config> {
        toml::from_str(contents).with_context(|| "Could not parse Config file")
    }

    fn check(&self) -> Result<()> {
        if self.beam.n_prtl == 0 {
            return Err(anyhow::Error::msg("The bunch must hold at least one particle"));
        }
        if self.beam.sigma.iter().any(|&s| s < 0.0) {
            return Err(anyhow::Error::msg("Beam sigmas must be non-negative"));
        }
        if self.output.output_interval == 0 {
            return Err(anyhow::Error::msg("output_interval must be positive"));
        }
        if self.output.stride == 0 {
            return Err(anyhow::Error::msg("stride must be positive"));
        }
        Ok(())
    }
}

/// Tracks a generated bunch through the configured cavity for `turns` passes
/// and returns the final bunch.
pub fn run(cfg: Config) -> Result<Bunch> {
    cfg.check()?;

    println!("initializing prtls");
    let mut bunch = Bunch::gaussian(
        cfg.beam.n_prtl,
        &cfg.beam.mean,
        &cfg.beam.sigma,
        cfg.beam.seed,
    );

    let elem = CavityElement::from_description(&cfg.element, cfg.params.energy)
        .context("Could not build the cavity element")?;
    let cav = elem
        .params(cfg.params.energy)
        .context("Could not resolve the cavity parameters")?;

    for t in 0..=cfg.setup.turns {
        if cfg.output.write_output {
            save::save_bunch(t, &cfg, &bunch)?;
        }
        if t == cfg.setup.turns {
            break;
        }
        if t % cfg.output.output_interval == 0 {
            println!("{} {}", t, bunch.n_alive());
        }
        if cfg.setup.parallel {
            cavity_pass_par(&mut bunch, &cav);
        } else {
            cavity_pass(&mut bunch, &cav);
        }
    }
    Ok(bunch)
}
