//! Contains the PlaneMapper struct, which maps each pixel of a
//! rectangle on the integral plane, with an origin at 0,0 in the top
//! left, to a point of a rectangle on the complex plane given by any
//! two opposite corners.
//!
//! Pixel rows grow downward while the imaginary axis grows upward, so
//! row 0 is the top edge of the viewport (the maximum imaginary value)
//! and column 0 its left edge (the minimum real value).
use crate::complex::Complex;
use crate::error::Error;

/// The width and height of the pixel grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// The normalized viewport: the componentwise minimum corner and the
/// componentwise maximum corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex, pub Complex);

impl ComplexPlane {
    /// Normalizes two opposite corners in any order.
    pub fn from_corners(a: Complex, b: Complex) -> ComplexPlane {
        ComplexPlane(
            Complex::new(a.re().min(b.re()), a.im().min(b.im())),
            Complex::new(a.re().max(b.re()), a.im().max(b.im())),
        )
    }

    /// The smallest real value in the viewport.
    pub fn min_re(&self) -> f64 {
        self.0.re()
    }

    /// The largest real value in the viewport.
    pub fn max_re(&self) -> f64 {
        self.1.re()
    }

    /// The smallest imaginary value in the viewport.
    pub fn min_im(&self) -> f64 {
        self.0.im()
    }

    /// The largest imaginary value in the viewport.
    pub fn max_im(&self) -> f64 {
        self.1.im()
    }
}

/// The column, row of a pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of the integral plane to points of the complex plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneMapper {
    /// The size of the pixel grid.
    pub integral_plane: IntegralPlane,
    /// The normalized viewport.
    pub complex_plane: ComplexPlane,
    // The complex distance covered by one pixel, along each axis.
    deltas: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the pixel grid and two opposite
    /// corners of the viewport, in either order.
    pub fn new(width: usize, height: usize, a: Complex, b: Complex) -> Result<PlaneMapper, Error> {
        if width == 0 {
            return Err(Error::invalid("width", "must be greater than zero"));
        }
        if height == 0 {
            return Err(Error::invalid("height", "must be greater than zero"));
        }
        if width.checked_mul(height).is_none() {
            return Err(Error::invalid(
                "size",
                format!("{}x{} pixels do not fit in memory", width, height),
            ));
        }
        for (name, corner) in [("corner a", a), ("corner b", b)].iter() {
            if !(corner.re().is_finite() && corner.im().is_finite()) {
                return Err(Error::invalid(*name, format!("{} is not finite", corner)));
            }
        }

        let complex_plane = ComplexPlane::from_corners(a, b);
        let deltas = (
            (complex_plane.max_re() - complex_plane.min_re()) / (width as f64),
            (complex_plane.max_im() - complex_plane.min_im()) / (height as f64),
        );

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane,
            deltas,
        })
    }

    /// The total number of pixels in the grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// The width of the grid in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// The height of the grid in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// Given a pixel, return the complex number sampled for it:
    /// `(min_re + column·Δre, max_im - row·Δim)`.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex {
        Complex::new(
            self.complex_plane.min_re() + (pixel.0 as f64) * self.deltas.0,
            self.complex_plane.max_im() - (pixel.1 as f64) * self.deltas.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_empty_grid() {
        let a = Complex::new(-1.0, -1.0);
        let b = Complex::new(1.0, 1.0);
        assert!(PlaneMapper::new(0, 4, a, b).is_err());
        assert!(PlaneMapper::new(4, 0, a, b).is_err());
    }

    #[test]
    fn planemapper_fails_on_non_finite_corner() {
        let pm = PlaneMapper::new(4, 4, Complex::new(std::f64::NAN, 0.0), Complex::new(1.0, 1.0));
        match pm {
            Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, "corner a"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn planemapper_normalizes_corner_order() {
        let expected = PlaneMapper::new(4, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0)).unwrap();
        let flipped = PlaneMapper::new(4, 4, Complex::new(1.0, -1.0), Complex::new(-1.0, 1.0)).unwrap();
        let reversed = PlaneMapper::new(4, 4, Complex::new(1.0, 1.0), Complex::new(-1.0, -1.0)).unwrap();
        assert_eq!(expected, flipped);
        assert_eq!(expected, reversed);
    }

    #[test]
    fn pixel_to_point_on_mixed_planes() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 0)), Complex::new(1.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 3)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn pixel_to_point_on_rectangular_planes() {
        let pm = PlaneMapper::new(8, 2, Complex::new(0.0, 0.0), Complex::new(4.0, 1.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 1.0));
        assert_eq!(pm.pixel_to_point(&Pixel(1, 1)), Complex::new(0.5, 0.5));
        assert_eq!(pm.pixel_to_point(&Pixel(7, 1)), Complex::new(3.5, 0.5));
    }

    #[test]
    fn len_counts_every_pixel() {
        let pm = PlaneMapper::new(5, 3, Complex::new(0.0, 0.0), Complex::new(5.0, 3.0)).unwrap();
        assert_eq!(pm.len(), 15);
    }

    #[test]
    fn planemapper_fails_when_the_pixel_count_overflows() {
        let a = Complex::new(-1.0, -1.0);
        let b = Complex::new(1.0, 1.0);
        match PlaneMapper::new(usize::max_value(), 2, a, b) {
            Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, "size"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(PlaneMapper::new(usize::max_value(), 1, a, b).is_ok());
    }
}
