#![allow(dead_code)]
use cavity_rs::bunch::{Bunch, PhaseSpace};
use cavity_rs::cavity::CavityParams;
use cavity_rs::element::ElementDescription;
use cavity_rs::Float;

pub const ENERGY: Float = 3.0e9;

pub fn sample_bunch() -> Bunch {
    // A handful of particles spread over phase space, one of them lost.
    Bunch::from_coords(vec![
        [1e-3, 2e-4, -5e-4, 1e-4, 1e-3, 0.01],
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [Float::NAN, 1e-3, 2e-3, 3e-3, 4e-3, 5e-3],
        [-2e-3, -1e-4, 3e-4, -2e-4, -2e-3, -0.02],
        [5e-4, 3e-3, 1e-4, -3e-3, 5e-3, 0.05],
    ])
}

pub fn thick_cavity() -> CavityParams {
    CavityParams::new(2.0, 2.5e6 / ENERGY, 352.2e6)
        .with_time_lag(1e-3)
        .with_phase_lag(0.3)
}

pub fn thin_cavity() -> CavityParams {
    CavityParams::new(0.0, 2.5e6 / ENERGY, 352.2e6).with_phase_lag(0.3)
}

pub fn cavity_description() -> ElementDescription {
    let mut desc = ElementDescription::cavity(2.0, 2.5e6, 352.2e6);
    desc.fam_name = Some("RFC".to_string());
    desc
}

/// Reference field free drift over the full `len`.
pub fn drift(r: &PhaseSpace, len: Float) -> PhaseSpace {
    let mut out = *r;
    let p_norm = 1.0 / (1.0 + r[4]);
    out[0] += len * p_norm * r[1];
    out[2] += len * p_norm * r[3];
    out[5] += len * p_norm * p_norm * (r[1] * r[1] + r[3] * r[3]) / 2.0;
    out
}

pub fn bits(r: &PhaseSpace) -> [u64; 6] {
    let mut out = [0u64; 6];
    for (o, v) in out.iter_mut().zip(r.iter()) {
        *o = u64::from(v.to_bits());
    }
    out
}
