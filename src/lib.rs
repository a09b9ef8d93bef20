//!
//! # ESIS optical model
//!
//! Optical prescription of the EUV Snapshot Imaging Spectrograph (ESIS).
//! The light path is made of a front aperture, a central obscuration, a
//! primary mirror, a field stop, a set of diffraction gratings and thin film
//! filters. Each element is created with the builder associated to it and
//! converts itself into a generic [Surface] for a ray-tracing library.
//!
//! ```
//! use esis::{
//!     units::{Length, LengthExt},
//!     Builder, FromBuilder, PrimaryMirror, PrimaryMirrorGeometry,
//! };
//!
//! let primary = PrimaryMirror::builder()
//!     .num_folds(8)
//!     .width_clear(Length::from_millimeters(100.))
//!     .width_border(Length::from_millimeters(5.))
//!     .build()
//!     .unwrap();
//! let radius = primary.radius_clear().unwrap();
//! assert!((radius.as_scalar().unwrap().as_millimeters() - 54.12).abs() < 1e-2);
//! ```
//!
//! Every geometric field is a [Param]: a single value or an array of values
//! broadcasting against the other fields, so the same element describes one
//! instrument or a whole tolerancing ensemble.

pub mod aperture;
pub mod elements;
pub mod error;
pub mod instrument;
pub mod interface;
pub mod material;
pub mod param;
pub mod polygon;
pub mod pose;
pub mod sag;
pub mod surface;
pub mod transformation;
pub mod units;

#[doc(inline)]
pub use self::elements::{
    CentralObscuration, CentralObscurationBuilder, FieldStop, FieldStopBuilder, Filter,
    FilterBuilder, FrontAperture, FrontApertureBuilder, Grating, GratingBuilder, PrimaryMirror,
    PrimaryMirrorBuilder,
};
#[doc(inline)]
pub use self::error::EsisError;
#[doc(inline)]
pub use self::instrument::{Instrument, InstrumentBuilder};
#[doc(inline)]
pub use self::interface::{
    CentralObscurationGeometry, FieldStopGeometry, FilterGeometry, FrontApertureGeometry,
    GratingGeometry, Optic, Polygonal, PrimaryMirrorGeometry,
};
#[doc(inline)]
pub use self::param::Param;
#[doc(inline)]
pub use self::pose::{CylindricalPose, Pose, Transformable};
#[doc(inline)]
pub use self::surface::Surface;

pub type Result<T> = std::result::Result<T, EsisError>;

/// Element builder type trait
pub trait Builder: Default {
    type Component;
    fn new() -> Self {
        Default::default()
    }
    fn build(self) -> Result<Self::Component>;
}

/// Access to the builder of an element
pub trait FromBuilder {
    type ComponentBuilder: Builder;
    fn builder() -> Self::ComponentBuilder {
        Self::ComponentBuilder::default()
    }
}
