use crate::{params::SimulatorParams, zone::Zone};

/// Starts the external simulator for a building.
///
/// The registry calls this exactly once per distinct model key, when the first zone referencing that key is
/// registered. The returned handle is stored in the new [`crate::Building`], whose key is the model key and whose
/// only zone is `first_zone`.
pub trait Instantiate {
    /// Opaque handle to the running simulator
    type Handle;

    /// The error returned when the simulator cannot be started
    type Error: std::error::Error + Send + Sync + 'static;

    /// Start the simulator for `model_key`. `first_zone` is already attached as zone 1.
    fn instantiate(
        &mut self,
        model_key: &str,
        params: &SimulatorParams,
        first_zone: &Zone,
    ) -> Result<Self::Handle, Self::Error>;
}
