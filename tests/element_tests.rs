mod common;

use cavity_rs::element::{
    CavityElement, ElementDescription, ElementError, OPTIONAL_FIELDS, REQUIRED_FIELDS,
};

#[test]
fn test_optional_fields_default() {
    let elem = CavityElement::from_description(&common::cavity_description(), common::ENERGY)
        .unwrap();
    assert_eq!(elem.length, 2.0);
    assert_eq!(elem.voltage, 2.5e6);
    assert_eq!(elem.frequency, 352.2e6);
    assert_eq!(elem.energy, common::ENERGY);
    assert_eq!(elem.time_lag, 0.0);
    assert_eq!(elem.phase_lag, 0.0);
}

#[test]
fn test_missing_required_field() {
    let mut desc = common::cavity_description();
    desc.length = None;
    let err = CavityElement::from_description(&desc, common::ENERGY).unwrap_err();
    assert_eq!(err, ElementError::MissingField("Length"));

    let mut desc = common::cavity_description();
    desc.voltage = None;
    let err = CavityElement::from_description(&desc, common::ENERGY).unwrap_err();
    assert_eq!(err, ElementError::MissingField("Voltage"));

    let mut desc = common::cavity_description();
    desc.frequency = None;
    let err = CavityElement::from_description(&desc, common::ENERGY).unwrap_err();
    assert_eq!(err, ElementError::MissingField("Frequency"));
}

#[test]
fn test_energy_is_optional() {
    // Energy is listed as required by the discovery protocol but may come
    // from the run instead.
    let elem = CavityElement::from_description(&common::cavity_description(), 0.0).unwrap();
    assert_eq!(elem.energy, 0.0);
    assert_eq!(elem.params(0.0).unwrap_err(), ElementError::ZeroEnergy);
    assert!(elem.params(common::ENERGY).is_ok());
}

#[test]
fn test_run_energy_takes_precedence() {
    let mut desc = common::cavity_description();
    desc.energy = Some(6.0e9);
    let elem = CavityElement::from_description(&desc, common::ENERGY).unwrap();
    assert_eq!(elem.energy, 6.0e9);
    assert_eq!(elem.reference_energy(common::ENERGY).unwrap(), common::ENERGY);
    assert_eq!(elem.reference_energy(0.0).unwrap(), 6.0e9);

    let cav = elem.params(0.0).unwrap();
    assert!((cav.normalized_voltage - 2.5e6 / 6.0e9).abs() < 1e-18);
}

#[test]
fn test_params_carry_lags() {
    let mut desc = common::cavity_description();
    desc.time_lag = Some(0.25);
    desc.phase_lag = Some(1.5);
    let cav = CavityElement::from_description(&desc, common::ENERGY)
        .unwrap()
        .params(common::ENERGY)
        .unwrap();
    assert_eq!(cav.length, 2.0);
    assert_eq!(cav.normalized_voltage, 2.5e6 / common::ENERGY);
    assert_eq!(cav.frequency, 352.2e6);
    assert_eq!(cav.time_lag, 0.25);
    assert_eq!(cav.phase_lag, 1.5);
    assert!(!cav.is_thin());
}

#[test]
fn test_description_from_toml() {
    let desc: ElementDescription = toml::from_str(
        r#"
        FamName = "RFC"
        Length = 0.0
        Voltage = 2.5e6
        Frequency = 352.2e6
        PhaseLag = 0.1
        "#,
    )
    .unwrap();
    assert_eq!(desc.fam_name.as_deref(), Some("RFC"));
    assert_eq!(desc.length, Some(0.0));
    assert_eq!(desc.energy, None);
    assert_eq!(desc.time_lag, None);
    assert_eq!(desc.phase_lag, Some(0.1));

    let cav = CavityElement::from_description(&desc, common::ENERGY)
        .unwrap()
        .params(common::ENERGY)
        .unwrap();
    assert!(cav.is_thin());
}

#[test]
fn test_field_lists() {
    assert_eq!(REQUIRED_FIELDS, ["Length", "Voltage", "Energy", "Frequency"]);
    assert_eq!(OPTIONAL_FIELDS, ["TimeLag", "PhaseLag"]);
}
