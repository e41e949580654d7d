use crate::cavity::CavityParams;
use crate::Float;
use serde::Deserialize;
use thiserror::Error;

/// Field names a cavity element must carry, in the order the discovery
/// protocol reports them.
pub const REQUIRED_FIELDS: [&str; 4] = ["Length", "Voltage", "Energy", "Frequency"];
pub const OPTIONAL_FIELDS: [&str; 2] = ["TimeLag", "PhaseLag"];

#[derive(Error, Debug, PartialEq)]
pub enum ElementError {
    #[error("required field '{0}' is missing from the element description")]
    MissingField(&'static str),
    #[error("reference energy resolves to zero, cannot normalize the voltage")]
    ZeroEnergy,
}

/// An element as it appears in a lattice description. Every field is
/// optional here; `CavityElement::from_description` decides what is required.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ElementDescription {
    pub fam_name: Option<String>,
    pub length: Option<Float>,
    pub voltage: Option<Float>,
    pub frequency: Option<Float>,
    pub energy: Option<Float>,
    pub time_lag: Option<Float>,
    pub phase_lag: Option<Float>,
}

impl ElementDescription {
    pub fn cavity(length: Float, voltage: Float, frequency: Float) -> ElementDescription {
        ElementDescription {
            length: Some(length),
            voltage: Some(voltage),
            frequency: Some(frequency),
            ..Default::default()
        }
    }

    fn required(field: Option<Float>, name: &'static str) -> Result<Float, ElementError> {
        field.ok_or(ElementError::MissingField(name))
    }
}

/// Resolved cavity element. Built once from a description and then held by
/// the caller for as many passes as it likes.
#[derive(Debug, Clone, PartialEq)]
pub struct CavityElement {
    pub length: Float,
    pub voltage: Float,
    pub energy: Float,
    pub frequency: Float,
    pub time_lag: Float,
    pub phase_lag: Float,
}

impl CavityElement {
    /// `Energy` falls back to `run_energy` when the element does not set it,
    /// the lags fall back to zero.
    pub fn from_description(
        desc: &ElementDescription,
        run_energy: Float,
    ) -> Result<CavityElement, ElementError> {
        Ok(CavityElement {
            length: ElementDescription::required(desc.length, "Length")?,
            voltage: ElementDescription::required(desc.voltage, "Voltage")?,
            frequency: ElementDescription::required(desc.frequency, "Frequency")?,
            energy: desc.energy.unwrap_or(run_energy),
            time_lag: desc.time_lag.unwrap_or(0.0),
            phase_lag: desc.phase_lag.unwrap_or(0.0),
        })
    }

    /// A non-zero run energy takes precedence over the element's own.
    pub fn reference_energy(&self, run_energy: Float) -> Result<Float, ElementError> {
        let energy = if run_energy == 0.0 {
            self.energy
        } else {
            run_energy
        };
        if energy == 0.0 {
            return Err(ElementError::ZeroEnergy);
        }
        Ok(energy)
    }

    pub fn params(&self, run_energy: Float) -> Result<CavityParams, ElementError> {
        let energy = self.reference_energy(run_energy)?;
        Ok(CavityParams::new(self.length, self.voltage / energy, self.frequency)
            .with_time_lag(self.time_lag)
            .with_phase_lag(self.phase_lag))
    }
}
