use crate::Float;
use itertools::izip;
use rand::prelude::*;
use rand_distr::StandardNormal;
use thiserror::Error;

/// Number of phase space coordinates per particle.
pub const NDIM: usize = 6;

// Phase space layout: [x, x', y, y', delta, ct]
pub const X: usize = 0;
pub const XP: usize = 1;
pub const Y: usize = 2;
pub const YP: usize = 3;
pub const DELTA: usize = 4;
pub const CT: usize = 5;

pub type PhaseSpace = [Float; NDIM];

#[derive(Error, Debug, PartialEq)]
pub enum BunchError {
    #[error("flat particle buffer of length {0} is not a multiple of 6")]
    BadStride(usize),
    #[error("particle index {index} out of range for a bunch of {len}")]
    OutOfRange { index: usize, len: usize },
}

/// A bunch of particles in 6D phase space.
///
/// The stride is fixed by the element type and the particle count is fixed
/// when the bunch is built; there is no way to add or drop particles
/// afterwards. Particles that were lost upstream carry a NaN in their first
/// coordinate and stay in the bunch.
#[derive(Debug, Clone, PartialEq)]
pub struct Bunch {
    prtls: Vec<PhaseSpace>,
}

#[inline(always)]
pub fn is_lost(r: &PhaseSpace) -> bool {
    r[X].is_nan()
}

impl Bunch {
    /// `n` particles sitting on the reference orbit.
    pub fn new(n: usize) -> Bunch {
        Bunch {
            prtls: vec![[0.0; NDIM]; n],
        }
    }

    pub fn from_coords(prtls: Vec<PhaseSpace>) -> Bunch {
        Bunch { prtls }
    }

    /// Builds a bunch from a flat buffer where particle `i` occupies
    /// `buf[6 * i..6 * i + 6]`.
    pub fn from_flat(buf: &[Float]) -> Result<Bunch, BunchError> {
        if buf.len() % NDIM != 0 {
            return Err(BunchError::BadStride(buf.len()));
        }
        let prtls = buf
            .chunks_exact(NDIM)
            .map(|c| {
                let mut r = [0.0; NDIM];
                r.copy_from_slice(c);
                r
            })
            .collect();
        Ok(Bunch { prtls })
    }

    pub fn to_flat(&self) -> Vec<Float> {
        self.prtls.iter().flat_map(|r| r.iter().copied()).collect()
    }

    /// Draws `n` particles from an uncorrelated gaussian with the given
    /// per-coordinate mean and rms. The same seed gives the same bunch.
    pub fn gaussian(n: usize, mean: &PhaseSpace, sigma: &PhaseSpace, seed: u64) -> Bunch {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut bunch = Bunch::new(n);
        for r in bunch.prtls.iter_mut() {
            for (coord, mu, sig) in izip!(r.iter_mut(), mean, sigma) {
                let z: Float = rng.sample(StandardNormal);
                *coord = mu + sig * z;
            }
        }
        bunch
    }

    pub fn len(&self) -> usize {
        self.prtls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prtls.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&PhaseSpace> {
        self.prtls.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhaseSpace> {
        self.prtls.iter()
    }

    pub fn as_mut_slice(&mut self) -> &mut [PhaseSpace] {
        &mut self.prtls
    }

    /// Flags particle `i` as lost. Tracking elements never call this, only
    /// aperture checks and tests do.
    pub fn mark_lost(&mut self, i: usize) -> Result<(), BunchError> {
        let len = self.prtls.len();
        let r = self
            .prtls
            .get_mut(i)
            .ok_or(BunchError::OutOfRange { index: i, len })?;
        r[X] = Float::NAN;
        Ok(())
    }

    pub fn n_alive(&self) -> usize {
        self.prtls.iter().filter(|r| !is_lost(r)).count()
    }

    /// Every `stride`-th value of coordinate `dim`, lost particles included.
    pub fn column(&self, dim: usize, stride: usize) -> Vec<Float> {
        self.prtls.iter().step_by(stride).map(|r| r[dim]).collect()
    }
}
