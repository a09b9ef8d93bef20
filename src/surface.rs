use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    aperture::Aperture, material::Material, param::broadcast_shape, sag::Sag,
    transformation::Transformation, units::Length, Param, Result,
};

/// Ruling pattern of a diffraction grating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rulings {
    /// Distance between two adjacent grooves
    pub spacing: Param<Length>,
    /// Diffraction order the grating is used in
    pub diffraction_order: i32,
}
impl Default for Rulings {
    fn default() -> Self {
        Self {
            spacing: Param::default(),
            diffraction_order: 1,
        }
    }
}

/// Generic optical surface
///
/// This is the record handed over to the ray-tracing library: everything the
/// tracer needs to know about one surface of the light path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Surface {
    pub name: String,
    pub sag: Option<Sag>,
    pub material: Option<Material>,
    pub aperture: Option<Aperture>,
    pub aperture_mechanical: Option<Aperture>,
    pub rulings: Option<Rulings>,
    pub transformation: Transformation,
}

impl Surface {
    /// Shape of the ensemble of surfaces described by the record
    ///
    /// Fails with [ShapeMismatch](crate::EsisError::ShapeMismatch) if the
    /// parameters of the sag, the material, the apertures, the rulings and the
    /// transformation do not broadcast together.
    pub fn shape(&self) -> Result<Vec<usize>> {
        let mut shape = self.transformation.shape()?;
        if let Some(sag) = &self.sag {
            shape = broadcast_shape(&shape, &sag.shape()?)?;
        }
        if let Some(material) = &self.material {
            shape = broadcast_shape(&shape, material.shape())?;
        }
        for aperture in self.aperture.iter().chain(&self.aperture_mechanical) {
            shape = broadcast_shape(&shape, &aperture.shape()?)?;
        }
        if let Some(rulings) = &self.rulings {
            shape = broadcast_shape(&shape, rulings.spacing.shape())?;
        }
        Ok(shape)
    }
}

impl Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<20}", self.name)?;
        if let Some(material) = &self.material {
            write!(f, " {:?}", material)?;
        }
        if let Some(aperture) = &self.aperture {
            write!(f, " {:?}", aperture.kind)?;
            if let Some(n) = aperture.num_vertices() {
                write!(f, "[{n}]")?;
            }
        }
        write!(f, " @ {}", self.transformation)
    }
}
