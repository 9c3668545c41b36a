//! Thermal zone records

use crate::{
    building::BuildingId,
    names::{self, build_variable_names},
    Error,
};

/// The FMI value reference type used by EnergyPlus FMUs.
pub type ValueReference = u32;

/// Signals written to EnergyPlus for every zone: the zone air temperature.
pub const INPUT_SIGNALS: [&str; N_INPUTS] = ["T"];

/// Signals read back from EnergyPlus for every zone: convective sensible heat flow rate, air volume, floor area
/// and the sensible heat capacity multiplier.
pub const OUTPUT_SIGNALS: [&str; N_OUTPUTS] = ["QConSen_flow", "V", "AFlo", "mSenFac"];

pub const N_INPUTS: usize = 1;
pub const N_OUTPUTS: usize = 4;

/// A thermal zone coupled to exactly one building.
///
/// A zone is created detached by [`Zone::new`] and attached to its building by
/// [`crate::Registry::register_zone`], which assigns its [`index`](Zone::index) and [`owner`](Zone::owner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    name: String,
    input_names: Vec<String>,
    output_names: Vec<String>,
    /// Longest qualified name plus terminator, over inputs and outputs.
    max_name_len: usize,
    input_value_references: Option<Vec<ValueReference>>,
    output_value_references: Option<Vec<ValueReference>>,
    /// 1-based position within the owning building
    index: Option<usize>,
    owner: Option<BuildingId>,
}

impl Zone {
    /// Create a detached zone record named `name`, with its qualified input and output names built from
    /// [`INPUT_SIGNALS`] and [`OUTPUT_SIGNALS`]. Value references start unresolved.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.is_empty() {
            return Err(Error::EmptyName("zone name"));
        }
        let inputs = build_variable_names(name, &INPUT_SIGNALS)?;
        let outputs = build_variable_names(name, &OUTPUT_SIGNALS)?;

        Ok(Self {
            name: names::try_to_owned(name, "zone name")?,
            input_names: inputs.names,
            output_names: outputs.names,
            max_name_len: inputs.max_len.max(outputs.max_len),
            input_value_references: None,
            output_value_references: None,
            index: None,
            owner: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualified input names, in [`INPUT_SIGNALS`] order.
    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    /// Qualified output names, in [`OUTPUT_SIGNALS`] order.
    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    /// Buffer length (including the nul terminator) that fits any of the qualified names of this zone.
    pub fn max_name_len(&self) -> usize {
        self.max_name_len
    }

    /// 1-based position of this zone within its building, or `None` while detached.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The building this zone is attached to, or `None` while detached.
    pub fn owner(&self) -> Option<BuildingId> {
        self.owner
    }

    pub fn input_value_references(&self) -> Option<&[ValueReference]> {
        self.input_value_references.as_deref()
    }

    pub fn output_value_references(&self) -> Option<&[ValueReference]> {
        self.output_value_references.as_deref()
    }

    /// Whether both the input and the output value references have been resolved.
    pub fn is_resolved(&self) -> bool {
        self.input_value_references.is_some() && self.output_value_references.is_some()
    }

    /// Resolve the value references of all inputs and outputs by looking up their qualified names.
    ///
    /// Either all value references are set or, on error, none are changed.
    pub fn resolve_value_references<F>(&mut self, mut lookup: F) -> Result<(), Error>
    where
        F: FnMut(&str) -> Option<ValueReference>,
    {
        let mut resolve = |names: &[String]| -> Result<Vec<ValueReference>, Error> {
            names
                .iter()
                .map(|name| {
                    lookup(name.as_str()).ok_or_else(|| Error::UnknownVariable { name: name.clone() })
                })
                .collect()
        };
        let inputs = resolve(&self.input_names)?;
        let outputs = resolve(&self.output_names)?;
        log::debug!(
            "Resolved value references for zone {}: inputs {inputs:?}, outputs {outputs:?}",
            self.name
        );
        self.input_value_references = Some(inputs);
        self.output_value_references = Some(outputs);
        Ok(())
    }

    /// Set the value references directly, in [`INPUT_SIGNALS`] and [`OUTPUT_SIGNALS`] order.
    pub fn set_value_references(
        &mut self,
        inputs: &[ValueReference],
        outputs: &[ValueReference],
    ) -> Result<(), Error> {
        for (expected, found) in [(N_INPUTS, inputs.len()), (N_OUTPUTS, outputs.len())] {
            if expected != found {
                return Err(Error::ValueReferenceCount { expected, found });
            }
        }
        self.input_value_references = Some(inputs.to_vec());
        self.output_value_references = Some(outputs.to_vec());
        Ok(())
    }

    pub(crate) fn attach(&mut self, owner: BuildingId, index: usize) {
        self.owner = Some(owner);
        self.index = Some(index);
    }
}
