//! Optical elements of the instrument, in light-path order

mod central_obscuration;
mod field_stop;
mod filter;
mod front_aperture;
mod grating;
mod primary_mirror;

pub use central_obscuration::{CentralObscuration, CentralObscurationBuilder};
pub use field_stop::{FieldStop, FieldStopBuilder};
pub use filter::{Filter, FilterBuilder};
pub use front_aperture::{FrontAperture, FrontApertureBuilder};
pub use grating::{Grating, GratingBuilder};
pub use primary_mirror::{PrimaryMirror, PrimaryMirrorBuilder};

/// Default order of the rotational symmetry of the instrument
pub const NUM_FOLDS: u32 = 8;
