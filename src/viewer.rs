//! The state behind an interactive viewer, minus the window.
//!
//! A front end owns a `Viewer`, feeds it mouse drags and the raw text
//! of its input fields, and blits the `Frame`s it gets back.  The
//! viewer keeps the current viewport and the default canvas size; text
//! fields that are empty or unreadable fall back to those defaults.

use std::convert::TryFrom;

use log::debug;

use crate::complex::Complex;
use crate::error::Error;
use crate::planes::ComplexPlane;
use crate::renderer::{CancelToken, EscapeTimeRenderer, RenderParams};

/// The viewport shown before any selection is made, and after a reset.
pub const DEFAULT_VIEW: (Complex, Complex) = (Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0));

/// The escape radius used when the radius field is empty or unreadable.
/// The viewer starts wider than the renderer's own default of 2.
pub const DEFAULT_RADIUS: f64 = 4.0;

/// The iteration limit every viewer render uses.
pub const ITERATIONS: usize = 100;

/// A rendered image, ready to be painted.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// `width × height` packed ARGB colours, row-major, top row first.
    pub pixels: Vec<u32>,
}

/// The viewport and defaults of one viewer window.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewer {
    a: Complex,
    b: Complex,
    default_width: usize,
    default_height: usize,
}

/// The first whitespace separated token of `text`, read as a `T`.
fn leading<T: std::str::FromStr>(text: &str) -> Option<T> {
    text.split_whitespace().next().and_then(|t| t.parse().ok())
}

/// A canvas dimension typed into a field.  Only a missing or
/// non-numeric field falls back to `default`; a number that is not a
/// usable size is an error.
fn dimension(name: &'static str, text: &str, default: usize) -> Result<usize, Error> {
    match leading::<i64>(text) {
        None => Ok(default),
        Some(n) if n <= 0 => Err(Error::invalid(
            name,
            format!("{} is not greater than zero", n),
        )),
        Some(n) => {
            usize::try_from(n).map_err(|_| Error::invalid(name, format!("{} is too large", n)))
        }
    }
}

impl Viewer {
    /// A viewer over `DEFAULT_VIEW` whose canvas is
    /// `default_width × default_height` unless told otherwise.
    pub fn new(default_width: usize, default_height: usize) -> Viewer {
        Viewer {
            a: DEFAULT_VIEW.0,
            b: DEFAULT_VIEW.1,
            default_width,
            default_height,
        }
    }

    /// The two corners currently in view, as last set.
    pub fn view(&self) -> (Complex, Complex) {
        (self.a, self.b)
    }

    /// Returns to `DEFAULT_VIEW`.
    pub fn reset(&mut self) {
        self.a = DEFAULT_VIEW.0;
        self.b = DEFAULT_VIEW.1;
    }

    /// Zooms to the rectangle dragged from `start` to `end`, both in
    /// canvas pixels, on a canvas of the given size.  Each pixel maps
    /// linearly onto the current view with the left edge at the
    /// smallest real value and the top edge at the largest imaginary
    /// value, the same orientation the renderer draws in.
    pub fn select(
        &mut self,
        start: (f64, f64),
        end: (f64, f64),
        canvas_width: f64,
        canvas_height: f64,
    ) -> Result<(), Error> {
        if !(canvas_width > 0.0) {
            return Err(Error::invalid("canvas width", "must be greater than zero"));
        }
        if !(canvas_height > 0.0) {
            return Err(Error::invalid("canvas height", "must be greater than zero"));
        }

        let view = ComplexPlane::from_corners(self.a, self.b);
        let span_re = view.max_re() - view.min_re();
        let span_im = view.max_im() - view.min_im();
        let to_plane = |(x, y): (f64, f64)| {
            Complex::new(
                view.min_re() + (x / canvas_width) * span_re,
                view.max_im() - (y / canvas_height) * span_im,
            )
        };

        self.a = to_plane(start);
        self.b = to_plane(end);
        debug!("selected {} to {}", self.a, self.b);
        Ok(())
    }

    /// The canvas size to render at: each field's leading integer, or
    /// the default when the field has none.  Zero or negative sizes are
    /// rejected.
    pub fn canvas_size(&self, width_text: &str, height_text: &str) -> Result<(usize, usize), Error> {
        Ok((
            dimension("width", width_text, self.default_width)?,
            dimension("height", height_text, self.default_height)?,
        ))
    }

    /// The escape radius in `text`, or `DEFAULT_RADIUS`.
    pub fn radius(text: &str) -> f64 {
        leading(text).unwrap_or(DEFAULT_RADIUS)
    }

    /// Sets the corners from typed text.  An empty field keeps its
    /// corner.  If either field fails to parse, neither corner changes.
    pub fn set_corners(&mut self, a_text: &str, b_text: &str) -> Result<(), Error> {
        let parse = |text: &str, current: Complex| -> Result<Complex, Error> {
            if text.trim().is_empty() {
                Ok(current)
            } else {
                text.parse()
            }
        };
        let a = parse(a_text, self.a)?;
        let b = parse(b_text, self.b)?;
        self.a = a;
        self.b = b;
        debug!("corners set to {} and {}", a, b);
        Ok(())
    }

    /// Renders the current view with the radius and canvas size taken
    /// from the given field text.
    pub fn draw(
        &self,
        radius_text: &str,
        width_text: &str,
        height_text: &str,
        cancel: &CancelToken,
    ) -> Result<Frame, Error> {
        let params = RenderParams::new(Viewer::radius(radius_text), ITERATIONS)?;
        let (width, height) = self.canvas_size(width_text, height_text)?;
        let renderer = EscapeTimeRenderer::new(self.a, self.b, width, height, params)?;
        let pixels = renderer.render_threaded(num_cpus::get(), cancel)?;
        Ok(Frame {
            width,
            height,
            pixels,
        })
    }
}
