//! Capabilities of the optical elements
//!
//! Each element kind of the instrument is described by a trait listing the
//! properties a concrete implementation has to supply; the derived geometry
//! (radii, wedge angles) is provided on top of them. [Optic] is shared by all
//! the elements and turns them into [Surface]s.

use std::f64::consts::PI;

use crate::{
    material::Material,
    polygon,
    sag::Sag,
    surface::{Rulings, Surface},
    transformation::Transformation,
    units::{Angle, AngleExt, Length},
    Param, Result,
};

/// An element of the light path
pub trait Optic {
    /// Name of the element surface
    fn name(&self) -> &str;
    /// Sag function of the element surface
    fn sag(&self) -> Option<&Sag> {
        None
    }
    /// Material the element is made of
    fn material(&self) -> Option<&Material> {
        None
    }
    /// Pose of the element in the instrument frame
    fn transformation(&self) -> Transformation;
    /// Represents the element as a generic optical surface
    fn surface(&self) -> Result<Surface>;
}

/// Elements following the rotational symmetry of the instrument
pub trait Polygonal {
    /// Order of the rotational symmetry of the instrument
    fn num_folds(&self) -> u32;
}

/// Entrance aperture of the instrument
pub trait FrontApertureGeometry: Optic {
    /// Radius of the circular clear aperture
    fn radius_clear(&self) -> &Param<Length>;
}

/// Obscuration in the center of the entrance aperture
pub trait CentralObscurationGeometry: Optic + Polygonal {
    /// Distance from the center of the obscuration to the middle of an edge
    fn halfwidth(&self) -> &Param<Length>;
    /// Distance from the center of the obscuration to a vertex
    fn radius(&self) -> Result<Param<Length>> {
        self.halfwidth().check_non_negative("half width")?;
        polygon::radius_from_halfwidth(self.halfwidth(), self.num_folds())
    }
}

/// Primary mirror with a regular polygonal aperture
pub trait PrimaryMirrorGeometry: Optic + Polygonal {
    /// Width of the clear aperture from edge to edge
    fn width_clear(&self) -> &Param<Length>;
    /// Width of the border around the clear aperture
    fn width_border(&self) -> &Param<Length>;
    /// Radius of the clear aperture from center to vertex
    ///
    /// Fails with [UnsupportedConfiguration](crate::EsisError::UnsupportedConfiguration)
    /// for odd numbers of folds.
    fn radius_clear(&self) -> Result<Param<Length>> {
        polygon::radius_clear(self.width_clear(), self.num_folds())
    }
    /// Radius of the mechanical aperture from center to vertex
    fn radius_mechanical(&self) -> Result<Param<Length>> {
        polygon::radius_mechanical(self.width_clear(), self.width_border(), self.num_folds())
    }
}

/// Field stop at the prime focus
pub trait FieldStopGeometry: Optic + Polygonal {
    /// Center-to-vertex radius of the polygonal clear aperture
    fn radius_clear(&self) -> &Param<Length>;
    /// Radius of the circular outer edge of the stop
    fn radius_mechanical(&self) -> &Param<Length>;
}

/// Diffraction grating occupying one wedge of the instrument
pub trait GratingGeometry: Optic + Polygonal {
    fn rulings(&self) -> &Rulings;
    /// Distance from the axis of symmetry to the grating vertex
    fn distance_radial(&self) -> &Param<Length>;
    /// Distance from the vertex to the inner edge of the clear aperture
    fn halfwidth_inner(&self) -> &Param<Length>;
    /// Distance from the vertex to the outer edge of the clear aperture
    fn halfwidth_outer(&self) -> &Param<Length>;
    /// Width of the border along the outer edge
    fn width_border(&self) -> &Param<Length>;
    /// Width of the border along the inner edge
    fn width_border_inner(&self) -> &Param<Length>;
    /// Angle subtended by one fold of the instrument
    fn angle_wedge(&self) -> Result<Angle> {
        polygon::check_num_folds(self.num_folds())?;
        Ok(Angle::from_radians(2. * PI / self.num_folds() as f64))
    }
}

/// Thin film filter in front of a detector
pub trait FilterGeometry: Optic {
    /// Radius of the circular clear aperture
    fn radius_clear(&self) -> &Param<Length>;
    /// Width of the frame around the clear aperture
    fn width_border(&self) -> &Param<Length>;
    /// Outer radius of the frame
    fn radius_mechanical(&self) -> Result<Param<Length>> {
        self.width_border().check_non_negative("border width")?;
        self.radius_clear()
            .zip_with(self.width_border(), |r, b| *r + *b)
    }
}
