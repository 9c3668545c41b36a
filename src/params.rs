use std::path::{Path, PathBuf};

/// Everything needed to start an EnergyPlus FMU for one building.
///
/// The registry never looks inside these; they are handed to the [`crate::traits::Instantiate`] implementation
/// when a building is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulatorParams {
    /// The EnergyPlus input data file (`.idf`) describing the building
    pub idf: PathBuf,
    /// Weather file (`.epw`)
    pub weather: Option<PathBuf>,
    /// EnergyPlus input data dictionary (`Energy+.idd`)
    pub idd: Option<PathBuf>,
    /// Shared library implementing the EnergyPlus FMU interface
    pub library: Option<PathBuf>,
}

impl SimulatorParams {
    pub fn new(idf: impl Into<PathBuf>) -> Self {
        Self {
            idf: idf.into(),
            ..Default::default()
        }
    }

    pub fn with_weather(mut self, weather: impl Into<PathBuf>) -> Self {
        self.weather = Some(weather.into());
        self
    }

    pub fn with_idd(mut self, idd: impl Into<PathBuf>) -> Self {
        self.idd = Some(idd.into());
        self
    }

    pub fn with_library(mut self, library: impl Into<PathBuf>) -> Self {
        self.library = Some(library.into());
        self
    }

    /// All file paths in these parameters, the `idf` first.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.idf.as_path()).chain(
            [&self.weather, &self.idd, &self.library]
                .into_iter()
                .flatten()
                .map(PathBuf::as_path),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let params = SimulatorParams::new("model.idf")
            .with_weather("USA_IL_Chicago.epw")
            .with_library("libepfmi.so");
        assert_eq!(params.idf, Path::new("model.idf"));
        assert_eq!(params.idd, None);
        assert_eq!(
            params.paths().collect::<Vec<_>>(),
            [
                Path::new("model.idf"),
                Path::new("USA_IL_Chicago.epw"),
                Path::new("libepfmi.so")
            ]
        );
    }
}
