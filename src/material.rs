use serde::{Deserialize, Serialize};

use crate::{units::Length, Param};

/// Optical materials
///
/// Like [Sag](crate::sag::Sag), a material is an opaque description for the
/// downstream simulation: reflectivity and transmissivity models live there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Material {
    /// Perfect reflector
    Mirror,
    /// Reflective multilayer coating of the named design
    Multilayer { name: String },
    /// Transmissive thin film of the named material
    ThinFilm { name: String, thickness: Param<Length> },
}
impl Material {
    /// Shape of the material parameters
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::ThinFilm { thickness, .. } => thickness.shape(),
            _ => &[],
        }
    }
    pub fn is_reflective(&self) -> bool {
        !matches!(self, Self::ThinFilm { .. })
    }
}
