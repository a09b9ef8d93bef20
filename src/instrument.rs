//! The complete light path of the instrument
//!
//! [Instrument] gathers the optical elements in the order light goes through
//! them. Its builder is the configuration of the optical model and is saved
//! to and loaded from TOML files.

use std::{
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    elements::{
        CentralObscuration, CentralObscurationBuilder, FieldStop, FieldStopBuilder, Filter,
        FilterBuilder, FrontAperture, FrontApertureBuilder, Grating, GratingBuilder,
        PrimaryMirror, PrimaryMirrorBuilder,
    },
    interface::{Optic, Polygonal},
    surface::Surface,
    Builder, EsisError, FromBuilder, Result,
};

#[derive(Debug, thiserror::Error)]
pub enum InstrumentError {
    #[error("cannot open `::esis::InstrumentBuilder` toml file: {1}")]
    Open(#[source] std::io::Error, PathBuf),
    #[error("cannot create `::esis::InstrumentBuilder` toml file: {1}")]
    Create(#[source] std::io::Error, PathBuf),
    #[error("cannot read `::esis::InstrumentBuilder` toml file: {1}")]
    Read(#[source] std::io::Error, PathBuf),
    #[error("cannot write `::esis::InstrumentBuilder` toml file: {1}")]
    Write(#[source] std::io::Error, PathBuf),
    #[error("cannot deserialize `::esis::InstrumentBuilder` from toml")]
    Load(#[from] toml::de::Error),
    #[error("cannot serialize `::esis::InstrumentBuilder` into toml")]
    Save(#[from] toml::ser::Error),
}
type InstrumentResult<T> = std::result::Result<T, InstrumentError>;

/// `Instrument` builder
///
/// Default properties: the defaults of each element builder, 8 folds.
///
/// # Examples
///
/// ```
/// use esis::{units::{Length, LengthExt}, Builder, FromBuilder, Instrument};
/// let esis = Instrument::builder()
///     .num_folds(8)
///     .primary(|primary| primary.width_clear(Length::from_millimeters(154.)))
///     .build()
///     .unwrap();
/// assert_eq!(esis.surfaces().unwrap().len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentBuilder {
    pub name: String,
    pub front_aperture: FrontApertureBuilder,
    pub central_obscuration: CentralObscurationBuilder,
    pub primary: PrimaryMirrorBuilder,
    pub field_stop: FieldStopBuilder,
    pub grating: GratingBuilder,
    pub filter: FilterBuilder,
}
impl InstrumentBuilder {
    /// Load the instrument builder from a toml file
    pub fn load<P: AsRef<Path>>(path: P) -> InstrumentResult<Self> {
        let mut file = File::open(&path)
            .map_err(|e| InstrumentError::Open(e, path.as_ref().to_path_buf()))?;
        let mut toml = String::new();
        file.read_to_string(&mut toml)
            .map_err(|e| InstrumentError::Read(e, path.as_ref().to_path_buf()))?;
        let builder: InstrumentBuilder = toml::from_str(&toml)?;
        log::info!("instrument loaded from {:?}", path.as_ref());
        Ok(builder)
    }
    /// Save the instrument builder into a toml file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> InstrumentResult<()> {
        let toml = toml::to_string_pretty(self)?;
        let mut file = File::create(&path)
            .map_err(|e| InstrumentError::Create(e, path.as_ref().to_path_buf()))?;
        write!(file, "# ::esis::InstrumentBuilder\n\n{}", toml)
            .map_err(|e| InstrumentError::Write(e, path.as_ref().to_path_buf()))?;
        log::info!("instrument saved to {:?}", path.as_ref());
        Ok(())
    }
    pub fn name(self, name: &str) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }
    /// Sets the order of the rotational symmetry of all the polygonal elements
    pub fn num_folds(self, num_folds: u32) -> Self {
        Self {
            central_obscuration: self.central_obscuration.num_folds(num_folds),
            primary: self.primary.num_folds(num_folds),
            field_stop: self.field_stop.num_folds(num_folds),
            grating: self.grating.num_folds(num_folds),
            ..self
        }
    }
    pub fn front_aperture<F>(self, f: F) -> Self
    where
        F: FnOnce(FrontApertureBuilder) -> FrontApertureBuilder,
    {
        Self {
            front_aperture: f(self.front_aperture),
            ..self
        }
    }
    pub fn central_obscuration<F>(self, f: F) -> Self
    where
        F: FnOnce(CentralObscurationBuilder) -> CentralObscurationBuilder,
    {
        Self {
            central_obscuration: f(self.central_obscuration),
            ..self
        }
    }
    pub fn primary<F>(self, f: F) -> Self
    where
        F: FnOnce(PrimaryMirrorBuilder) -> PrimaryMirrorBuilder,
    {
        Self {
            primary: f(self.primary),
            ..self
        }
    }
    pub fn field_stop<F>(self, f: F) -> Self
    where
        F: FnOnce(FieldStopBuilder) -> FieldStopBuilder,
    {
        Self {
            field_stop: f(self.field_stop),
            ..self
        }
    }
    pub fn grating<F>(self, f: F) -> Self
    where
        F: FnOnce(GratingBuilder) -> GratingBuilder,
    {
        Self {
            grating: f(self.grating),
            ..self
        }
    }
    pub fn filter<F>(self, f: F) -> Self
    where
        F: FnOnce(FilterBuilder) -> FilterBuilder,
    {
        Self {
            filter: f(self.filter),
            ..self
        }
    }
}
impl Builder for InstrumentBuilder {
    type Component = Instrument;
    fn build(self) -> Result<Instrument> {
        let instrument = Instrument {
            name: self.name,
            front_aperture: self.front_aperture.build()?,
            central_obscuration: self.central_obscuration.build()?,
            primary: self.primary.build()?,
            field_stop: self.field_stop.build()?,
            grating: self.grating.build()?,
            filter: self.filter.build()?,
        };
        let num_folds = instrument.primary.num_folds();
        let polygons: [(&str, &dyn Polygonal); 3] = [
            (instrument.central_obscuration.name(), &instrument.central_obscuration),
            (instrument.field_stop.name(), &instrument.field_stop),
            (instrument.grating.name(), &instrument.grating),
        ];
        if let Some((name, element)) = polygons
            .into_iter()
            .find(|(_, element)| element.num_folds() != num_folds)
        {
            return Err(EsisError::unsupported(
                element.num_folds(),
                format!("the {name} does not match the {num_folds} folds of the primary mirror"),
            ));
        }
        log::debug!("instrument {:?} with {} folds", instrument.name, num_folds);
        Ok(instrument)
    }
}
impl From<&Instrument> for InstrumentBuilder {
    fn from(instrument: &Instrument) -> Self {
        Self {
            name: instrument.name.clone(),
            front_aperture: (&instrument.front_aperture).into(),
            central_obscuration: (&instrument.central_obscuration).into(),
            primary: (&instrument.primary).into(),
            field_stop: (&instrument.field_stop).into(),
            grating: (&instrument.grating).into(),
            filter: (&instrument.filter).into(),
        }
    }
}

/// Optical model of the instrument
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub name: String,
    pub front_aperture: FrontAperture,
    pub central_obscuration: CentralObscuration,
    pub primary: PrimaryMirror,
    pub field_stop: FieldStop,
    pub grating: Grating,
    pub filter: Filter,
}
impl FromBuilder for Instrument {
    type ComponentBuilder = InstrumentBuilder;
}
impl Instrument {
    /// Optical elements in light-path order
    pub fn optics(&self) -> [&dyn Optic; 6] {
        [
            &self.front_aperture,
            &self.central_obscuration,
            &self.primary,
            &self.field_stop,
            &self.grating,
            &self.filter,
        ]
    }
    /// Surfaces of the instrument in light-path order
    pub fn surfaces(&self) -> Result<Vec<Surface>> {
        self.optics()
            .into_iter()
            .map(|optic| optic.surface())
            .collect()
    }
}
