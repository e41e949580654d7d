use crate::bunch::{Bunch, BunchError, NDIM};
use crate::cavity::cavity_pass;
use crate::element::{
    CavityElement, ElementDescription, ElementError, OPTIONAL_FIELDS, REQUIRED_FIELDS,
};
use crate::Float;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BindingError {
    #[error("wrong argument: {0}")]
    WrongArg(&'static str),
    #[error(transparent)]
    Element(#[from] ElementError),
    #[error(transparent)]
    Bunch(#[from] BunchError),
}

/// Dense column-major matrix as handed over by the host. A 6 x N particle
/// matrix stores particle `j` in `data[6 * j..6 * j + 6]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HostMatrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Float>,
}

impl HostMatrix {
    pub fn new(
        rows: usize,
        cols: usize,
        data: Vec<Float>,
    ) -> Result<HostMatrix, BindingError> {
        let m = HostMatrix { rows, cols, data };
        m.check_size()?;
        Ok(m)
    }

    fn check_size(&self) -> Result<(), BindingError> {
        if self.data.len() != self.rows * self.cols {
            return Err(BindingError::WrongArg(
                "Matrix data does not match its dimensions",
            ));
        }
        Ok(())
    }

    pub fn from_bunch(bunch: &Bunch) -> HostMatrix {
        HostMatrix {
            rows: NDIM,
            cols: bunch.len(),
            data: bunch.to_flat(),
        }
    }
}

/// Beam properties the host may pass as a third argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingProperties {
    pub energy: Float,
    pub rest_energy: Float,
    pub charge: Float,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostArg {
    Element(ElementDescription),
    Matrix(HostMatrix),
    Properties(RingProperties),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostOutput {
    Tracked(HostMatrix),
    Fields {
        required: Vec<&'static str>,
        optional: Option<Vec<&'static str>>,
    },
}

/// Host entry point. With no arguments it answers the field discovery
/// query; with an element and a 6 x N matrix (plus optional ring
/// properties) it returns a tracked copy of the matrix. `nlhs` is the number
/// of outputs the host asked for.
pub fn pass_method(args: &[HostArg], nlhs: usize) -> Result<HostOutput, BindingError> {
    match args {
        [] => Ok(HostOutput::Fields {
            required: REQUIRED_FIELDS.to_vec(),
            optional: if nlhs > 1 {
                Some(OPTIONAL_FIELDS.to_vec())
            } else {
                None
            },
        }),
        [HostArg::Element(desc), HostArg::Matrix(rin), rest @ ..] => {
            let mut energy = desc.energy.unwrap_or(0.0);
            match rest.first() {
                Some(HostArg::Properties(props)) => energy = props.energy,
                Some(_) => {
                    return Err(BindingError::WrongArg(
                        "Third argument must be ring properties",
                    ))
                }
                None => {}
            }
            if rin.rows != NDIM {
                return Err(BindingError::WrongArg(
                    "Second argument must be a 6 x N matrix",
                ));
            }
            rin.check_size()?;
            let elem = CavityElement::from_description(desc, energy)?;
            let cav = elem.params(energy)?;

            // the host's buffer is never touched, we track a copy
            let mut bunch = Bunch::from_flat(&rin.data)?;
            cavity_pass(&mut bunch, &cav);
            Ok(HostOutput::Tracked(HostMatrix::from_bunch(&bunch)))
        }
        [_, _, ..] => Err(BindingError::WrongArg("Expected an element and a particle matrix")),
        [_] => Err(BindingError::WrongArg("Needs 0 or 2 arguments")),
    }
}

/// Repeated-call entry point used by lattice trackers: the element is built
/// once by the caller and passed back on every turn.
pub fn track_function(
    elem: &CavityElement,
    bunch: &mut Bunch,
    run_energy: Float,
) -> Result<(), BindingError> {
    let cav = elem.params(run_energy)?;
    cavity_pass(bunch, &cav);
    Ok(())
}
