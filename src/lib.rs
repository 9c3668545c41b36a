//! The `eplus-fmu` crate keeps track of the EnergyPlus FMU instances ("buildings") that a Modelica model is
//! coupled to, and of the thermal zones each of them simulates.
//!
//! Every zone belongs to exactly one building, identified by the model file (`.idf`) it was built from. The first
//! zone registered for a model creates the building through an [`Instantiate`] implementation; later zones for
//! the same model are attached to it. Zone names must be unique within their building.
//!
//! ## Examples
//!
//! ```rust
//! use eplus_fmu::{Instantiate, Registry, SimulatorParams, Zone};
//!
//! /// Pretends to start EnergyPlus
//! struct DryRun;
//!
//! impl Instantiate for DryRun {
//!     type Handle = ();
//!     type Error = std::io::Error;
//!
//!     fn instantiate(&mut self, _: &str, _: &SimulatorParams, _: &Zone) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = Registry::new(DryRun);
//! let params = SimulatorParams::new("RefBldgSmallOffice.idf");
//!
//! let zone = registry.register_zone("RefBldgSmallOffice.idf", "Core_ZN", &params).unwrap();
//! assert_eq!(zone.index(), Some(1));
//! assert_eq!(zone.input_names(), ["Core_ZN_T"]);
//!
//! let zone = registry.register_zone("RefBldgSmallOffice.idf", "Perimeter_ZN_1", &params).unwrap();
//! assert_eq!(zone.index(), Some(2));
//!
//! // The same zone may not be coupled twice to one building
//! assert!(registry.register_zone("RefBldgSmallOffice.idf", "Core_ZN", &params).is_err());
//! ```
#![deny(clippy::all)]

use std::collections::TryReserveError;

pub mod building;
pub mod names;
pub mod params;
pub mod registry;
pub mod traits;
pub mod zone;

pub use building::{Building, BuildingId};
pub use names::{build_variable_names, VariableNames};
pub use params::SimulatorParams;
pub use registry::Registry;
pub use traits::Instantiate;
pub use zone::{ValueReference, Zone};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not enough memory to allocate {what}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    #[error(
        "Modelica model specifies zone {zone} twice for the FMU {model}. Each zone must only be specified once."
    )]
    DuplicateZone { zone: String, model: String },

    #[error("Error instantiating building {model}")]
    Instantiation {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Empty {0}")]
    EmptyName(&'static str),

    #[error("Name {0:?} contains a nul character")]
    NulInName(String),

    #[error("Unknown variable: {}", name)]
    UnknownVariable { name: String },

    #[error("Expected {expected} value references, found {found}")]
    ValueReferenceCount { expected: usize, found: usize },
}
