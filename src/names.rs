//! Construction of fully-qualified variable names.
//!
//! EnergyPlus addresses the signals of a zone by name. The name of each signal is the zone name joined to the
//! signal suffix with an underscore, e.g. `Room101_QConSen_flow`. The exact text matters: the FMU resolves
//! value references by looking these strings up in its model description.

use crate::Error;

/// Separator between the entity name and the signal suffix.
pub const SEPARATOR: char = '_';

/// The qualified names built for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableNames {
    /// One qualified name per suffix, in suffix order.
    pub names: Vec<String>,
    /// The buffer length needed to hold the longest name plus a C terminator.
    pub max_len: usize,
}

/// Build the qualified names `{entity}_{suffix}` for every entry of `suffixes`.
///
/// Besides the names, this returns the maximum buffer length (including the nul terminator) needed to hold any
/// one of them, so that callers handing the names across an FFI boundary can size storage uniformly.
///
/// # Errors
/// [`Error::EmptyName`] if `entity` or `suffixes` is empty, [`Error::NulInName`] if `entity` or a suffix contains
/// a nul character, [`Error::Allocation`] if the name buffers cannot be allocated.
pub fn build_variable_names(entity: &str, suffixes: &[&str]) -> Result<VariableNames, Error> {
    if entity.is_empty() {
        return Err(Error::EmptyName("entity name"));
    }
    if let Some(name) = std::iter::once(&entity)
        .chain(suffixes)
        .find(|name| name.contains('\0'))
    {
        return Err(Error::NulInName((*name).to_owned()));
    }
    let longest_suffix = suffixes
        .iter()
        .map(|suffix| suffix.len())
        .max()
        .ok_or(Error::EmptyName("signal suffixes"))?;
    let max_len = entity.len() + longest_suffix + 2;

    let mut names = Vec::new();
    names
        .try_reserve_exact(suffixes.len())
        .map_err(|source| Error::Allocation {
            what: "variable names",
            source,
        })?;

    for suffix in suffixes {
        let mut name = String::new();
        name.try_reserve_exact(entity.len() + suffix.len() + 1)
            .map_err(|source| Error::Allocation {
                what: "variable name",
                source,
            })?;
        name.push_str(entity);
        name.push(SEPARATOR);
        name.push_str(suffix);
        log::trace!("Built variable name {name}");
        names.push(name);
    }

    Ok(VariableNames { names, max_len })
}

/// Copy `s` into a freshly allocated `String`, reporting allocation failure instead of aborting.
pub(crate) fn try_to_owned(s: &str, what: &'static str) -> Result<String, Error> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(s.len())
        .map_err(|source| Error::Allocation { what, source })?;
    owned.push_str(s);
    Ok(owned)
}
