use crate::bunch::{is_lost, Bunch, PhaseSpace, CT, DELTA, X, XP, Y, YP};
use crate::{Float, C0, TWO_PI};
use rayon::prelude::*;

/// Particles handed to a single rayon task by `cavity_pass_par`.
pub const PRTL_CHUNK_SIZE: usize = 1024;

/// Physical description of an RF cavity as seen by the integrator.
///
/// `normalized_voltage` is the peak voltage divided by the reference energy,
/// so the kick is dimensionless. A zero `length` selects the thin kick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CavityParams {
    pub length: Float,
    pub normalized_voltage: Float,
    pub frequency: Float,
    pub time_lag: Float,
    pub phase_lag: Float,
}

impl CavityParams {
    pub fn new(length: Float, normalized_voltage: Float, frequency: Float) -> CavityParams {
        CavityParams {
            length,
            normalized_voltage,
            frequency,
            time_lag: 0.0,
            phase_lag: 0.0,
        }
    }

    pub fn with_time_lag(mut self, time_lag: Float) -> CavityParams {
        self.time_lag = time_lag;
        self
    }

    pub fn with_phase_lag(mut self, phase_lag: Float) -> CavityParams {
        self.phase_lag = phase_lag;
        self
    }

    pub fn is_thin(&self) -> bool {
        self.length == 0.0
    }
}

/// Field free drift over `len`. The inverse momentum is taken from the
/// current delta, so it must be re-evaluated after every kick.
#[inline(always)]
fn drift(r: &mut PhaseSpace, len: Float) {
    let p_norm = 1.0 / (1.0 + r[DELTA]);
    let norm_l = len * p_norm;
    r[X] += norm_l * r[XP];
    r[Y] += norm_l * r[YP];
    r[CT] += norm_l * p_norm * (r[XP] * r[XP] + r[YP] * r[YP]) / 2.0;
}

/// Longitudinal momentum kick from the RF field at the particle's ct.
#[inline(always)]
fn kick(r: &mut PhaseSpace, cav: &CavityParams) {
    let phase = TWO_PI * cav.frequency * (r[CT] - cav.time_lag) / C0 - cav.phase_lag;
    r[DELTA] += -cav.normalized_voltage * phase.sin();
}

fn pass_slice(prtls: &mut [PhaseSpace], cav: &CavityParams) {
    if cav.is_thin() {
        for r in prtls.iter_mut() {
            if !is_lost(r) {
                kick(r, cav);
            }
        }
    } else {
        let half_length = cav.length / 2.0;
        for r in prtls.iter_mut() {
            if !is_lost(r) {
                drift(r, half_length);
                kick(r, cav);
                drift(r, half_length);
            }
        }
    }
}

/// Tracks every particle of `bunch` once through the cavity, in place.
///
/// Lost particles are left untouched. No input is validated: a particle with
/// delta == -1 ends up with non-finite coordinates.
pub fn cavity_pass(bunch: &mut Bunch, cav: &CavityParams) {
    pass_slice(bunch.as_mut_slice(), cav);
}

/// Same as `cavity_pass` but spreads the bunch over the rayon pool. Results
/// are bit-identical to the sequential pass.
pub fn cavity_pass_par(bunch: &mut Bunch, cav: &CavityParams) {
    bunch
        .as_mut_slice()
        .par_chunks_mut(PRTL_CHUNK_SIZE)
        .for_each(|chunk| pass_slice(chunk, cav));
}
