//! EnergyPlus building instances

use std::fmt::Display;

use crate::{names, zone::Zone, Error};

/// Index of a [`Building`] within its [`crate::Registry`].
///
/// Zones carry this as a lookup-only back-reference to the building that owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildingId(pub(crate) usize);

impl BuildingId {
    /// Position of the building in registration order, starting at 0.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Display for BuildingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One EnergyPlus FMU instance and the zones coupled to it.
///
/// `H` is the simulator handle produced by the [`crate::traits::Instantiate`] implementation in use.
#[derive(Debug)]
pub struct Building<H> {
    /// Model file the FMU was built from; unique within the registry
    key: String,
    zones: Vec<Zone>,
    simulator: Option<H>,
}

impl<H> Building<H> {
    /// Create a building around its first zone, which becomes zone 1. The simulator handle starts unset.
    pub(crate) fn new(id: BuildingId, key: &str, mut first_zone: Zone) -> Result<Self, Error> {
        let key = names::try_to_owned(key, "building key")?;
        let mut zones = Vec::new();
        zones.try_reserve(1).map_err(|source| Error::Allocation {
            what: "building zones",
            source,
        })?;
        first_zone.attach(id, 1);
        zones.push(first_zone);
        Ok(Self {
            key,
            zones,
            simulator: None,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Zones of this building in registration order; zone `i` has index `i + 1`.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Mutable access to the zones, e.g. to resolve their value references.
    ///
    /// Zones can be modified in place but not added or removed.
    pub fn zones_mut(&mut self) -> &mut [Zone] {
        &mut self.zones
    }

    pub fn num_zones(&self) -> usize {
        self.zones.len()
    }

    pub fn zone(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.name() == name)
    }

    pub fn zone_names(&self) -> impl Iterator<Item = &str> {
        self.zones.iter().map(Zone::name)
    }

    /// Returns `true` if no zone of this building is named `zone_name`.
    pub fn is_unique(&self, zone_name: &str) -> bool {
        !self.zones.iter().any(|zone| zone.name() == zone_name)
    }

    pub fn simulator(&self) -> Option<&H> {
        self.simulator.as_ref()
    }

    pub fn simulator_mut(&mut self) -> Option<&mut H> {
        self.simulator.as_mut()
    }

    pub fn set_simulator(&mut self, simulator: H) {
        self.simulator = Some(simulator);
    }

    pub fn take_simulator(&mut self) -> Option<H> {
        self.simulator.take()
    }

    /// Append `zone` as the next zone of this building and return its 1-based index.
    ///
    /// Fails without modifying the building if a zone of the same name is already attached.
    pub(crate) fn attach(&mut self, id: BuildingId, mut zone: Zone) -> Result<usize, Error> {
        if !self.is_unique(zone.name()) {
            return Err(Error::DuplicateZone {
                zone: zone.name().to_owned(),
                model: self.key.clone(),
            });
        }
        self.zones.try_reserve(1).map_err(|source| Error::Allocation {
            what: "building zones",
            source,
        })?;
        let index = self.zones.len() + 1;
        zone.attach(id, index);
        self.zones.push(zone);
        Ok(index)
    }
}
