//! Scalar or array-valued parameters
//!
//! Every geometric field of an optical element is a [`Param`]: either a single
//! quantity or an N-dimensional array of quantities describing an ensemble of
//! configurations (parameter sweeps, tolerancing runs).
//! Binary and ternary operations broadcast their operands with the NumPy rules:
//! shapes are aligned on their trailing axes and an axis of length 1 stretches
//! to match the other operand.
//!
//! ```
//! use esis::{units::{Length, LengthExt}, Param};
//!
//! let width: Param<Length> = vec![
//!     Length::from_millimeters(10.),
//!     Length::from_millimeters(20.),
//! ]
//! .into();
//! let border: Param<Length> = Length::from_millimeters(1.).into();
//! let total = width.zip_with(&border, |w, b| *w + *b).unwrap();
//! assert_eq!(total.shape(), &[2]);
//! ```

use crate::{
    units::{Angle, Length},
    EsisError, Result,
};
use ndarray::{arr0, Array1, ArrayD, ArrayViewD, Zip};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Scalar or N-dimensional array of `T`
#[derive(Debug, Clone, PartialEq)]
pub struct Param<T>(ArrayD<T>);

/// Shape of the broadcast of two shapes
pub fn broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Result<Vec<usize>> {
    let ndim = lhs.len().max(rhs.len());
    let axis = |shape: &[usize], i: usize| {
        let offset = ndim - shape.len();
        if i < offset {
            1
        } else {
            shape[i - offset]
        }
    };
    (0..ndim)
        .map(|i| match (axis(lhs, i), axis(rhs, i)) {
            (a, b) if a == b => Ok(a),
            (1, b) => Ok(b),
            (a, 1) => Ok(a),
            _ => Err(EsisError::ShapeMismatch {
                lhs: lhs.to_vec(),
                rhs: rhs.to_vec(),
            }),
        })
        .collect()
}

impl<T> Param<T> {
    /// Creates a 0-dimensional parameter
    pub fn scalar(value: T) -> Self {
        Self(arr0(value).into_dyn())
    }
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }
    pub fn ndim(&self) -> usize {
        self.0.ndim()
    }
    /// Number of configurations held by the parameter
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn is_scalar(&self) -> bool {
        self.0.ndim() == 0
    }
    /// Returns the value of a 0-dimensional parameter
    pub fn as_scalar(&self) -> Option<&T> {
        if self.is_scalar() {
            self.0.first()
        } else {
            None
        }
    }
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.0.get(index)
    }
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
    pub fn as_array(&self) -> &ArrayD<T> {
        &self.0
    }
    pub fn into_array(self) -> ArrayD<T> {
        self.0
    }
    /// Applies `f` elementwise
    pub fn map<U, F>(&self, f: F) -> Param<U>
    where
        F: FnMut(&T) -> U,
    {
        Param(self.0.map(f))
    }
    /// Views the parameter with the given (broadcast compatible) shape
    pub fn broadcast_to(&self, shape: &[usize]) -> Result<ArrayViewD<'_, T>> {
        self.0
            .broadcast(shape)
            .ok_or_else(|| EsisError::ShapeMismatch {
                lhs: self.shape().to_vec(),
                rhs: shape.to_vec(),
            })
    }
    /// Applies `f` elementwise over the broadcast of `self` and `other`
    pub fn zip_with<U, V, F>(&self, other: &Param<U>, mut f: F) -> Result<Param<V>>
    where
        F: FnMut(&T, &U) -> V,
    {
        let shape = broadcast_shape(self.shape(), other.shape())?;
        let a = self.broadcast_to(&shape)?;
        let b = other.broadcast_to(&shape)?;
        Ok(Param(Zip::from(a).and(b).map_collect(|a, b| f(a, b))))
    }
    /// Applies `f` elementwise over the broadcast of `self`, `second` and `third`
    pub fn zip3_with<U, W, V, F>(
        &self,
        second: &Param<U>,
        third: &Param<W>,
        mut f: F,
    ) -> Result<Param<V>>
    where
        F: FnMut(&T, &U, &W) -> V,
    {
        let shape = broadcast_shape(self.shape(), second.shape())?;
        let shape = broadcast_shape(&shape, third.shape())?;
        let a = self.broadcast_to(&shape)?;
        let b = second.broadcast_to(&shape)?;
        let c = third.broadcast_to(&shape)?;
        Ok(Param(
            Zip::from(a).and(b).and(c).map_collect(|a, b, c| f(a, b, c)),
        ))
    }
}

impl Param<Length> {
    /// Fails if any of the lengths is negative
    pub fn check_non_negative(&self, name: &str) -> Result<()> {
        if self.iter().any(|x| x.value < 0.) {
            return Err(EsisError::NegativeLength { name: name.into() });
        }
        Ok(())
    }
}

macro_rules! scalar_param {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Param<$t> {
                fn from(value: $t) -> Self {
                    Param::scalar(value)
                }
            }
        )*
    };
}
scalar_param!(Length, Angle, f64);

impl<T> From<Vec<T>> for Param<T> {
    fn from(values: Vec<T>) -> Self {
        Self(Array1::from(values).into_dyn())
    }
}
impl<T> From<ArrayD<T>> for Param<T> {
    fn from(values: ArrayD<T>) -> Self {
        Self(values)
    }
}

impl<T: Default> Default for Param<T> {
    fn default() -> Self {
        Param::scalar(T::default())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ParamRepr<T> {
    Scalar(T),
    Array(ArrayD<T>),
}

impl<T: Serialize> Serialize for Param<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_scalar() {
            Some(value) => value.serialize(serializer),
            None => self.0.serialize(serializer),
        }
    }
}
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Param<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match ParamRepr::deserialize(deserializer)? {
            ParamRepr::Scalar(value) => Param::scalar(value),
            ParamRepr::Array(values) => Param(values),
        })
    }
}
