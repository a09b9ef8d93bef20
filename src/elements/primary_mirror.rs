use serde::{Deserialize, Serialize};

use crate::{
    aperture::Aperture,
    interface::{Optic, Polygonal, PrimaryMirrorGeometry},
    material::Material,
    polygon,
    pose::{Pose, Transformable},
    sag::Sag,
    surface::Surface,
    transformation::Transformation,
    units::Length,
    Builder, FromBuilder, Param, Result,
};

/// `PrimaryMirror` builder
///
/// Default properties:
///  - sag          : none
///  - material     : none
///  - \# folds     : 8
///  - clear width  : 0m
///  - border width : 0m
///  - pose         : identity
///
/// # Examples
///
/// ```
/// use esis::{units::{Length, LengthExt}, Builder, FromBuilder, PrimaryMirror};
/// let primary = PrimaryMirror::builder()
///     .width_clear(Length::from_millimeters(100.))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryMirrorBuilder {
    pub sag: Option<Sag>,
    pub material: Option<Material>,
    pub num_folds: u32,
    pub width_clear: Param<Length>,
    pub width_border: Param<Length>,
    pub pose: Pose,
}
impl Default for PrimaryMirrorBuilder {
    fn default() -> Self {
        Self {
            sag: None,
            material: None,
            num_folds: super::NUM_FOLDS,
            width_clear: Param::default(),
            width_border: Param::default(),
            pose: Pose::default(),
        }
    }
}
impl PrimaryMirrorBuilder {
    /// Sets the sag function of the mirror
    pub fn sag(mut self, sag: Sag) -> Self {
        self.sag = Some(sag);
        self
    }
    /// Sets the mirror coating
    pub fn material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }
    /// Sets the number of sides of the aperture
    pub fn num_folds(self, num_folds: u32) -> Self {
        Self { num_folds, ..self }
    }
    /// Sets the edge-to-edge width of the clear aperture
    pub fn width_clear<L: Into<Param<Length>>>(self, width_clear: L) -> Self {
        Self {
            width_clear: width_clear.into(),
            ..self
        }
    }
    /// Sets the width of the border around the clear aperture
    pub fn width_border<L: Into<Param<Length>>>(self, width_border: L) -> Self {
        Self {
            width_border: width_border.into(),
            ..self
        }
    }
    pub fn pose(self, pose: Pose) -> Self {
        Self { pose, ..self }
    }
}
impl Builder for PrimaryMirrorBuilder {
    type Component = PrimaryMirror;
    fn build(self) -> Result<PrimaryMirror> {
        polygon::check_num_folds(self.num_folds)?;
        self.width_clear.check_non_negative("primary mirror clear width")?;
        self.width_border.check_non_negative("primary mirror border width")?;
        log::debug!("primary mirror with {} folds", self.num_folds);
        Ok(PrimaryMirror {
            sag: self.sag,
            material: self.material,
            num_folds: self.num_folds,
            width_clear: self.width_clear,
            width_border: self.width_border,
            pose: self.pose,
        })
    }
}
impl From<&PrimaryMirror> for PrimaryMirrorBuilder {
    fn from(primary: &PrimaryMirror) -> Self {
        Self {
            sag: primary.sag.clone(),
            material: primary.material.clone(),
            num_folds: primary.num_folds,
            width_clear: primary.width_clear.clone(),
            width_border: primary.width_border.clone(),
            pose: primary.pose.clone(),
        }
    }
}

/// Primary mirror of the instrument
///
/// The mirror collects the light from the Sun and focuses it onto the field
/// stop. Its aperture is a regular polygon with one side per fold.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryMirror {
    pub sag: Option<Sag>,
    pub material: Option<Material>,
    pub num_folds: u32,
    pub width_clear: Param<Length>,
    pub width_border: Param<Length>,
    pub pose: Pose,
}
impl FromBuilder for PrimaryMirror {
    type ComponentBuilder = PrimaryMirrorBuilder;
}
impl Polygonal for PrimaryMirror {
    fn num_folds(&self) -> u32 {
        self.num_folds
    }
}
impl PrimaryMirrorGeometry for PrimaryMirror {
    fn width_clear(&self) -> &Param<Length> {
        &self.width_clear
    }
    fn width_border(&self) -> &Param<Length> {
        &self.width_border
    }
}
impl Optic for PrimaryMirror {
    fn name(&self) -> &str {
        "primary"
    }
    fn sag(&self) -> Option<&Sag> {
        self.sag.as_ref()
    }
    fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }
    fn transformation(&self) -> Transformation {
        self.pose.transformation()
    }
    fn surface(&self) -> Result<Surface> {
        let surface = Surface {
            name: self.name().into(),
            sag: self.sag.clone(),
            material: self.material.clone(),
            aperture: Some(Aperture::regular_polygon(
                self.radius_clear()?,
                self.num_folds,
            )),
            aperture_mechanical: Some(Aperture::regular_polygon(
                self.radius_mechanical()?,
                self.num_folds,
            )),
            rulings: None,
            transformation: self.transformation(),
        };
        let shape = surface.shape()?;
        log::debug!("{surface} {shape:?}");
        Ok(surface)
    }
}
