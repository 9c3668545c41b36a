//! Command line checker for the zones of a Modelica model coupled to EnergyPlus.
//!
//! Every `MODEL:ZONE` declaration is registered in order, exactly as the coupling does during model
//! initialization. Buildings are not started; [`FileCheck`] only verifies that their input files exist.
#![deny(clippy::all)]

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::Table;
use eplus_fmu::{Instantiate, Registry, SimulatorParams, Zone};
use itertools::Itertools;

pub mod options;

#[derive(Debug, thiserror::Error)]
pub enum FileCheckError {
    #[error("File {0:?} does not exist")]
    Missing(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Stands in for starting EnergyPlus: checks that all files of a building exist.
///
/// The handle is the canonical path of the model file.
#[derive(Debug, Default)]
pub struct FileCheck;

impl Instantiate for FileCheck {
    type Handle = PathBuf;
    type Error = FileCheckError;

    fn instantiate(
        &mut self,
        model_key: &str,
        params: &SimulatorParams,
        first_zone: &Zone,
    ) -> Result<PathBuf, FileCheckError> {
        if let Some(missing) = params.paths().find(|path| !path.is_file()) {
            return Err(FileCheckError::Missing(missing.to_path_buf()));
        }
        log::debug!(
            "Building {model_key} checked, first zone {}",
            first_zone.name()
        );
        Ok(params.idf.canonicalize()?)
    }
}

/// Register all zones of `options` in declaration order.
pub fn check(options: &options::CheckOptions) -> anyhow::Result<Registry<FileCheck>> {
    let mut registry = Registry::new(FileCheck);
    for decl in &options.zones {
        let params = options.params_for(&decl.model);
        registry
            .register_zone(&decl.model, &decl.zone, &params)
            .with_context(|| format!("Registering zone {decl}"))?;
    }
    log::info!(
        "Registered {} zones in {} buildings",
        registry.buildings().iter().map(|b| b.num_zones()).sum::<usize>(),
        registry.len()
    );
    Ok(registry)
}

/// One row per zone, grouped by building
pub fn zone_table<I: Instantiate>(registry: &Registry<I>) -> Table {
    let mut table = Table::new();
    table.set_header(["Building", "Index", "Zone", "Inputs", "Outputs"]);
    for building in registry.buildings() {
        for zone in building.zones() {
            table.add_row([
                building.key().to_owned(),
                zone.index().map(|i| i.to_string()).unwrap_or_default(),
                zone.name().to_owned(),
                zone.input_names().iter().join(", "),
                zone.output_names().iter().join(", "),
            ]);
        }
    }
    table
}
