//! Regular polygon aperture geometry
//!
//! The apertures of the instrument are regular polygons with one side per
//! fold of the rotational symmetry. Designs specify such a polygon by its
//! edge-to-edge width, the optical model needs its center-to-vertex radius.

use std::f64::consts::PI;

use crate::{units::Length, EsisError, Param, Result};

/// Smallest supported polygon order
pub const MIN_NUM_FOLDS: u32 = 4;

/// Checks that `num_folds` describes a supported polygon: even and at least [MIN_NUM_FOLDS]
pub fn check_num_folds(num_folds: u32) -> Result<()> {
    if num_folds % 2 != 0 {
        return Err(EsisError::unsupported(
            num_folds,
            "odd numbers of sides are not supported",
        ));
    }
    if num_folds < MIN_NUM_FOLDS {
        return Err(EsisError::unsupported(
            num_folds,
            format!("a polygonal aperture needs at least {MIN_NUM_FOLDS} sides"),
        ));
    }
    Ok(())
}

/// Ratio of the circumradius to the inradius of a regular polygon with `num_folds` sides
pub fn vertex_factor(num_folds: u32) -> Result<f64> {
    check_num_folds(num_folds)?;
    Ok((PI / num_folds as f64).cos().recip())
}

/// Center-to-vertex radius of the polygon with the given center-to-edge half width
pub fn radius_from_halfwidth(halfwidth: &Param<Length>, num_folds: u32) -> Result<Param<Length>> {
    let factor = vertex_factor(num_folds)?;
    Ok(halfwidth.map(|h| *h * factor))
}

/// Clear radius of a polygon of edge-to-edge width `width_clear`
pub fn radius_clear(width_clear: &Param<Length>, num_folds: u32) -> Result<Param<Length>> {
    width_clear.check_non_negative("clear width")?;
    radius_from_halfwidth(&width_clear.map(|w| *w / 2.), num_folds)
}

/// Mechanical radius of a polygon of edge-to-edge width `width_clear`
/// surrounded by a border of width `width_border`
pub fn radius_mechanical(
    width_clear: &Param<Length>,
    width_border: &Param<Length>,
    num_folds: u32,
) -> Result<Param<Length>> {
    width_clear.check_non_negative("clear width")?;
    width_border.check_non_negative("border width")?;
    let halfwidth = width_clear.zip_with(width_border, |w, b| *w / 2. + *b)?;
    radius_from_halfwidth(&halfwidth, num_folds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::LengthExt;
    use approx::assert_relative_eq;

    fn mm(x: f64) -> Param<Length> {
        Length::from_millimeters(x).into()
    }

    #[test]
    fn octagon() {
        let r = radius_clear(&mm(100.), 8).unwrap();
        assert_relative_eq!(
            r.as_scalar().unwrap().as_millimeters(),
            54.1196,
            epsilon = 1e-4
        );
        let r = radius_mechanical(&mm(100.), &mm(5.), 8).unwrap();
        assert_relative_eq!(
            r.as_scalar().unwrap().as_millimeters(),
            59.5316,
            epsilon = 1e-4
        );
    }

    #[test]
    fn square() {
        let r = radius_clear(&mm(2.), 4).unwrap();
        assert_relative_eq!(
            r.as_scalar().unwrap().as_millimeters(),
            2f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn odd_folds() {
        for n in [1, 3, 5, 7, 9, 11] {
            assert!(matches!(
                radius_clear(&mm(10.), n),
                Err(EsisError::UnsupportedConfiguration { num_folds, .. }) if num_folds == n
            ));
        }
    }

    #[test]
    fn degenerate_folds() {
        assert!(vertex_factor(0).is_err());
        assert!(vertex_factor(2).is_err());
        assert!(vertex_factor(4).is_ok());
    }

    #[test]
    fn negative_widths() {
        assert!(matches!(
            radius_mechanical(&mm(100.), &mm(-10.), 8),
            Err(EsisError::NegativeLength { .. })
        ));
        assert!(matches!(
            radius_clear(&mm(-1.), 8),
            Err(EsisError::NegativeLength { .. })
        ));
    }

    #[test]
    fn ensemble() {
        let widths: Param<Length> = [10., 20., 30.]
            .map(Length::from_millimeters)
            .to_vec()
            .into();
        let borders: Param<Length> = [0., 1.].map(Length::from_millimeters).to_vec().into();
        assert!(radius_mechanical(&widths, &borders, 6).is_err());
        let r = radius_mechanical(&widths, &mm(1.), 6).unwrap();
        assert_eq!(r.shape(), &[3]);
        let factor = vertex_factor(6).unwrap();
        for (r, w) in r.iter().zip([10., 20., 30.]) {
            assert_relative_eq!(r.as_millimeters(), (w / 2. + 1.) * factor, epsilon = 1e-9);
        }
    }
}
