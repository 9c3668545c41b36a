use std::{fmt::Display, path::PathBuf, str::FromStr};

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use eplus_fmu::SimulatorParams;

/// A zone declaration `MODEL:ZONE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneDecl {
    /// The model file, which is also the key of the building
    pub model: String,
    pub zone: String,
}

impl FromStr for ZoneDecl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split at the last ':' so that model paths may contain one, e.g. `C:\models\office.idf:Core`
        match s.rsplit_once(':') {
            Some((model, zone)) if !model.is_empty() && !zone.is_empty() => Ok(Self {
                model: model.to_owned(),
                zone: zone.to_owned(),
            }),
            _ => Err(format!("expected MODEL:ZONE, got `{s}`")),
        }
    }
}

impl Display for ZoneDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.model, self.zone)
    }
}

/// Register thermal zones with their EnergyPlus buildings and print the result
#[derive(Debug, Parser)]
#[command(name = "eplus-check", version)]
pub struct CheckOptions {
    /// Weather file used by every building
    #[arg(long)]
    pub weather: Option<PathBuf>,

    /// EnergyPlus input data dictionary
    #[arg(long)]
    pub idd: Option<PathBuf>,

    /// EnergyPlus FMU shared library
    #[arg(long)]
    pub library: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Zones to register, in order. Each is split at its last `:`, so zone names cannot contain one.
    #[arg(value_name = "MODEL:ZONE", required = true)]
    pub zones: Vec<ZoneDecl>,
}

impl CheckOptions {
    /// Simulator parameters for the building of `model`
    pub fn params_for(&self, model: &str) -> SimulatorParams {
        SimulatorParams {
            idf: model.into(),
            weather: self.weather.clone(),
            idd: self.idd.clone(),
            library: self.library.clone(),
        }
    }
}
