// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A double-precision complex number with value semantics.
//!
//! `Complex` wraps `num::Complex<f64>` and leaves the arithmetic to it.
//! What it adds is a division that refuses an exact zero divisor
//! instead of producing infinities, and the `"<re><sign><im>i"` text
//! form, for example `-1.25+0.5i` or `3-2e-7i`.  Division is a method
//! returning a `Result` rather than an implementation of
//! `std::ops::Div`.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num::Zero;

use crate::error::Error;

/// A point on the complex plane: the real part along the x axis, the
/// imaginary part along the y axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Complex(num::Complex<f64>);

impl Complex {
    /// Builds `re + im·i`.
    pub const fn new(re: f64, im: f64) -> Complex {
        Complex(num::Complex { re, im })
    }

    /// The real part.
    #[inline]
    pub fn re(self) -> f64 {
        self.0.re
    }

    /// The imaginary part.
    #[inline]
    pub fn im(self) -> f64 {
        self.0.im
    }

    /// The complex conjugate, `re - im·i`.
    #[inline]
    pub fn conj(self) -> Complex {
        Complex(self.0.conj())
    }

    /// `re² + im²`.  The escape-time loop calls this on every step,
    /// so it never takes a square root.
    #[inline]
    pub fn squared_magnitude(self) -> f64 {
        self.0.norm_sqr()
    }

    /// The distance from the origin, `√(re² + im²)`.
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.0.norm()
    }

    /// The angle from the positive real axis, in `(-π, π]`.
    #[inline]
    pub fn phase(self) -> f64 {
        self.0.arg()
    }

    /// Divides by `divisor`, computing `(self · conj(divisor)) / |divisor|²`.
    ///
    /// Fails with `Error::DivideByZero` when both components of the
    /// divisor are exactly zero.  Tiny but non-zero divisors are divided
    /// normally.
    pub fn div(self, divisor: Complex) -> Result<Complex, Error> {
        if divisor.is_zero() {
            return Err(Error::DivideByZero);
        }
        Ok(Complex(self.0 / divisor.0))
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Complex {
        Complex::new(re, 0.0)
    }
}

impl Add for Complex {
    type Output = Complex;

    #[inline]
    fn add(self, other: Complex) -> Complex {
        Complex(self.0 + other.0)
    }
}

impl Sub for Complex {
    type Output = Complex;

    #[inline]
    fn sub(self, other: Complex) -> Complex {
        Complex(self.0 - other.0)
    }
}

impl Mul for Complex {
    type Output = Complex;

    #[inline]
    fn mul(self, other: Complex) -> Complex {
        Complex(self.0 * other.0)
    }
}

impl Neg for Complex {
    type Output = Complex;

    #[inline]
    fn neg(self) -> Complex {
        Complex(-self.0)
    }
}

impl Zero for Complex {
    fn zero() -> Complex {
        Complex(num::Complex::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.re == 0.0 && self.0.im == 0.0
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Negative zero counts as non-negative and prints as "+0".
        if self.im() >= 0.0 {
            write!(f, "{}+{}i", self.re(), self.im().abs())
        } else {
            write!(f, "{}{}i", self.re(), self.im())
        }
    }
}

impl FromStr for Complex {
    type Err = Error;

    /// Reads the `"<re><sign><im>i"` form.  The split between the two
    /// terms is the one `+` or `-` that is neither at the very start nor
    /// directly after an exponent marker.  Anything else is rejected.
    fn from_str(s: &str) -> Result<Complex, Error> {
        let text = s.trim();
        if text.is_empty() {
            return Err(Error::parse(s, "empty input"));
        }
        if !text.ends_with('i') {
            return Err(Error::parse(s, "missing trailing 'i'"));
        }
        let body = &text[..text.len() - 1];

        let split = imaginary_sign(body).map_err(|reason| Error::parse(s, reason))?;
        let (real, imag) = body.split_at(split);
        if real.is_empty() {
            return Err(Error::parse(s, "empty real term"));
        }
        if imag.len() < 2 {
            return Err(Error::parse(s, "empty imaginary term"));
        }

        let re = decimal(real).ok_or_else(|| Error::parse(s, "malformed real term"))?;
        let im = decimal(imag).ok_or_else(|| Error::parse(s, "malformed imaginary term"))?;
        Ok(Complex::new(re, im))
    }
}

/// Finds the byte offset of the sign that introduces the imaginary
/// term.  Position 0 belongs to the real term, and a sign right after
/// `e` or `E` belongs to an exponent.
fn imaginary_sign(body: &str) -> Result<usize, &'static str> {
    let bytes = body.as_bytes();
    let mut found = None;
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        if (b == b'+' || b == b'-') && bytes[i - 1] != b'e' && bytes[i - 1] != b'E' {
            if found.is_some() {
                return Err("more than one sign could start the imaginary term");
            }
            found = Some(i);
        }
    }
    found.ok_or("missing sign before the imaginary term")
}

/// A decimal literal with an optional sign and exponent.  Words such
/// as `inf` or `NaN`, which `f64::from_str` would take, are refused.
fn decimal(term: &str) -> Option<f64> {
    let digits = term
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || c == '+' || c == '-');
    if !digits || !term.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    f64::from_str(term).ok()
}
