//! The registry of building instances and the zone registration protocol.

use std::fmt::Debug;

use crate::{
    building::{Building, BuildingId},
    params::SimulatorParams,
    traits::Instantiate,
    zone::Zone,
    Error,
};

/// All buildings created during one coupling session, in creation order.
///
/// Buildings are keyed by their model file. A building is created through the [`Instantiate`] implementation the
/// first time a zone referencing its key is registered, and lives as long as the registry.
pub struct Registry<I: Instantiate> {
    instantiator: I,
    buildings: Vec<Building<I::Handle>>,
    /// Simulator handles unset by [`Registry::register_zone`], oldest first
    detached: Vec<(BuildingId, I::Handle)>,
}

impl<I> Debug for Registry<I>
where
    I: Instantiate + Debug,
    I::Handle: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("instantiator", &self.instantiator)
            .field("buildings", &self.buildings)
            .field("detached", &self.detached)
            .finish()
    }
}

impl<I: Instantiate> Registry<I> {
    pub fn new(instantiator: I) -> Self {
        Self {
            instantiator,
            buildings: Vec::new(),
            detached: Vec::new(),
        }
    }

    /// Register the zone `zone_name` for the building described by `model_key`.
    ///
    /// If no building with this key exists yet, one is created via [`Instantiate::instantiate`] with `params`,
    /// and the zone becomes its zone 1. Otherwise the zone is appended to the existing building and gets the next
    /// index.
    ///
    /// On return the simulator handle of the owning building is always unset; the FMU is bound again in a later
    /// phase, after all zones are known. A handle that was set is not dropped but moved aside, and can be
    /// reclaimed with [`Registry::take_detached`].
    ///
    /// # Errors
    /// - [`Error::DuplicateZone`] if the building already has a zone named `zone_name`.
    /// - [`Error::Instantiation`] if the building had to be created and the instantiator failed.
    /// - [`Error::Allocation`], [`Error::EmptyName`] or [`Error::NulInName`] from building the zone record.
    ///
    /// The registry is unchanged when an error is returned.
    pub fn register_zone(
        &mut self,
        model_key: &str,
        zone_name: &str,
        params: &SimulatorParams,
    ) -> Result<&Zone, Error> {
        log::info!("Initializing zone {zone_name} of {model_key}.");
        if model_key.is_empty() {
            return Err(Error::EmptyName("model key"));
        }
        let zone = Zone::new(zone_name)?;
        self.detached
            .try_reserve(1)
            .map_err(|source| Error::Allocation {
                what: "detached simulator",
                source,
            })?;

        let (id, index) = match self.position(model_key) {
            Some(id) => {
                let index = self.buildings[id.0].attach(id, zone)?;
                log::debug!("Attached zone {zone_name} to building {model_key} as zone {index}");
                (id, index)
            }
            None => (self.create_building(model_key, zone, params)?, 1),
        };

        let building = &mut self.buildings[id.0];
        if let Some(simulator) = building.take_simulator() {
            log::debug!("Detached simulator of building {id}");
            self.detached.push((id, simulator));
        }
        Ok(&building.zones()[index - 1])
    }

    /// Create a new building for `model_key` with `first_zone` as zone 1 and append it to the registry.
    fn create_building(
        &mut self,
        model_key: &str,
        first_zone: Zone,
        params: &SimulatorParams,
    ) -> Result<BuildingId, Error> {
        self.buildings
            .try_reserve(1)
            .map_err(|source| Error::Allocation {
                what: "building",
                source,
            })?;
        let id = BuildingId(self.buildings.len());
        let mut building = Building::new(id, model_key, first_zone)?;

        let handle = self
            .instantiator
            .instantiate(model_key, params, &building.zones()[0])
            .map_err(|source| Error::Instantiation {
                model: model_key.to_owned(),
                source: Box::new(source),
            })?;
        building.set_simulator(handle);

        log::debug!("Created building {id} for {model_key}");
        self.buildings.push(building);
        Ok(id)
    }

    fn position(&self, model_key: &str) -> Option<BuildingId> {
        self.buildings
            .iter()
            .position(|building| building.key() == model_key)
            .map(BuildingId)
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn buildings(&self) -> &[Building<I::Handle>] {
        &self.buildings
    }

    /// Mutable access to the buildings, for binding simulators and resolving value references.
    pub fn buildings_mut(&mut self) -> &mut [Building<I::Handle>] {
        &mut self.buildings
    }

    pub fn building(&self, model_key: &str) -> Option<&Building<I::Handle>> {
        self.position(model_key).map(|id| &self.buildings[id.0])
    }

    pub fn building_by_id(&self, id: BuildingId) -> Option<&Building<I::Handle>> {
        self.buildings.get(id.0)
    }

    pub fn zone(&self, model_key: &str, zone_name: &str) -> Option<&Zone> {
        self.building(model_key)?.zone(zone_name)
    }

    pub fn instantiator(&self) -> &I {
        &self.instantiator
    }

    /// Simulator handles unset by [`Registry::register_zone`] and not yet reclaimed, oldest first.
    pub fn detached(&self) -> impl Iterator<Item = (BuildingId, &I::Handle)> {
        self.detached.iter().map(|(id, simulator)| (*id, simulator))
    }

    /// Reclaim the most recently detached simulator handle of building `id`.
    pub fn take_detached(&mut self, id: BuildingId) -> Option<I::Handle> {
        let pos = self.detached.iter().rposition(|(owner, _)| *owner == id)?;
        Some(self.detached.remove(pos).1)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("cannot start {0}")]
    struct StartError(String);

    /// Hands out sequential handles and refuses models named `broken.idf`.
    #[derive(Debug, Default)]
    struct Counter {
        calls: Vec<(String, String)>,
    }

    impl Instantiate for Counter {
        type Handle = usize;
        type Error = StartError;

        fn instantiate(
            &mut self,
            model_key: &str,
            _params: &SimulatorParams,
            first_zone: &Zone,
        ) -> Result<usize, StartError> {
            if model_key == "broken.idf" {
                return Err(StartError(model_key.to_owned()));
            }
            assert_eq!(first_zone.index(), Some(1));
            self.calls
                .push((model_key.to_owned(), first_zone.name().to_owned()));
            Ok(self.calls.len())
        }
    }

    #[test_log::test]
    fn test_first_zone_creates_building() {
        let mut registry = Registry::new(Counter::default());
        assert!(registry.is_empty());

        let zone = registry
            .register_zone("model.idf", "Core", &SimulatorParams::new("model.idf"))
            .unwrap();
        assert_eq!(zone.index(), Some(1));
        assert_eq!(zone.owner(), Some(BuildingId(0)));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.instantiator().calls,
            [("model.idf".to_owned(), "Core".to_owned())]
        );
        let building = registry.building("model.idf").unwrap();
        assert_eq!(building.num_zones(), 1);
        assert_eq!(building.simulator(), None);
    }

    #[test_log::test]
    fn test_existing_building_not_reinstantiated() {
        let mut registry = Registry::new(Counter::default());
        let params = SimulatorParams::new("model.idf");
        registry.register_zone("model.idf", "North", &params).unwrap();
        registry.register_zone("model.idf", "South", &params).unwrap();

        assert_eq!(registry.instantiator().calls.len(), 1);
        assert_eq!(
            registry.zone("model.idf", "South").unwrap().index(),
            Some(2)
        );
        assert!(registry.zone("model.idf", "West").is_none());
        assert!(registry.zone("other.idf", "South").is_none());
    }

    #[test_log::test]
    fn test_handle_reset_after_registration() {
        let mut registry = Registry::new(Counter::default());
        let params = SimulatorParams::new("model.idf");
        registry.register_zone("model.idf", "North", &params).unwrap();

        registry.buildings_mut()[0].set_simulator(42);
        registry.register_zone("model.idf", "South", &params).unwrap();
        assert_eq!(registry.buildings()[0].simulator(), None);

        // The handle from instantiation, then the rebound one
        let id = BuildingId(0);
        assert_eq!(registry.detached().collect::<Vec<_>>(), [(id, &1), (id, &42)]);
        assert_eq!(registry.take_detached(id), Some(42));
        assert_eq!(registry.take_detached(id), Some(1));
        assert_eq!(registry.take_detached(id), None);
    }

    /// Counts how many simulators have been freed.
    #[derive(Debug)]
    struct Simulator(Rc<Cell<u32>>);

    impl Drop for Simulator {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[derive(Debug)]
    struct Starter(Rc<Cell<u32>>);

    impl Instantiate for Starter {
        type Handle = Simulator;
        type Error = StartError;

        fn instantiate(
            &mut self,
            _model_key: &str,
            _params: &SimulatorParams,
            _first_zone: &Zone,
        ) -> Result<Simulator, StartError> {
            Ok(Simulator(self.0.clone()))
        }
    }

    #[test_log::test]
    fn test_unset_simulator_is_not_freed() {
        let freed = Rc::new(Cell::new(0));
        let mut registry = Registry::new(Starter(freed.clone()));
        let params = SimulatorParams::new("a.idf");

        let owner = registry
            .register_zone("a.idf", "Core", &params)
            .unwrap()
            .owner()
            .unwrap();
        registry.register_zone("a.idf", "North", &params).unwrap();
        registry.register_zone("b.idf", "Core", &params).unwrap();
        assert_eq!(freed.get(), 0);
        assert!(registry.buildings().iter().all(|b| b.simulator().is_none()));
        assert_eq!(registry.detached().count(), 2);

        // Rebind for the next phase
        let simulator = registry.take_detached(owner).unwrap();
        registry.buildings_mut()[owner.get()].set_simulator(simulator);
        assert_eq!(freed.get(), 0);

        drop(registry);
        assert_eq!(freed.get(), 2);
    }

    #[test_log::test]
    fn test_failed_instantiation_leaves_registry_unchanged() {
        let mut registry = Registry::new(Counter::default());
        registry
            .register_zone("model.idf", "Core", &SimulatorParams::new("model.idf"))
            .unwrap();

        let err = registry
            .register_zone("broken.idf", "Core", &SimulatorParams::new("broken.idf"))
            .unwrap_err();
        assert!(matches!(&err, Error::Instantiation { model, .. } if model == "broken.idf"));
        assert_eq!(
            std::error::Error::source(&err).unwrap().to_string(),
            "cannot start broken.idf"
        );
        assert_eq!(registry.len(), 1);
        assert!(registry.building("broken.idf").is_none());
    }

    #[test]
    fn test_empty_names() {
        let mut registry = Registry::new(Counter::default());
        let params = SimulatorParams::new("model.idf");
        assert!(matches!(
            registry.register_zone("", "Core", &params),
            Err(Error::EmptyName("model key"))
        ));
        assert!(matches!(
            registry.register_zone("model.idf", "", &params),
            Err(Error::EmptyName("zone name"))
        ));
        assert!(registry.is_empty());
        assert!(registry.instantiator().calls.is_empty());
    }

    #[test]
    fn test_building_by_id() {
        let mut registry = Registry::new(Counter::default());
        let owner = registry
            .register_zone("a.idf", "Core", &SimulatorParams::new("a.idf"))
            .unwrap()
            .owner()
            .unwrap();
        assert_eq!(registry.building_by_id(owner).unwrap().key(), "a.idf");
        assert!(registry.building_by_id(BuildingId(1)).is_none());
    }
}
