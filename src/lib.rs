#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot viewer engine
//!
//! Takes a rectangle of the complex plane and a pixel grid, and paints
//! each pixel by how quickly its point runs off to infinity under
//! `z ← z² + c`.  Points that stay within the escape radius for the
//! whole iteration budget are painted black; the rest go from red
//! (fast) through green to blue (slow).
//!
//! The pieces, leaf first:
//!
//! * `complex`: the `Complex` value type and its `R+Ii` text form.
//! * `planes`: the mapping between pixels and points of the viewport.
//! * `escape` and `colour`: the per-pixel iteration and palette.
//! * `renderer`: validated, optionally multi-threaded, cancellable
//!   rendering of a whole viewport.
//! * `viewer`: the zoom-by-drag state a windowed front end drives.

pub mod colour;
pub mod complex;
pub mod error;
pub mod escape;
pub mod planes;
pub mod renderer;
pub mod viewer;

pub use crate::complex::Complex;
pub use crate::error::Error;
pub use crate::escape::escape_time;
pub use crate::renderer::{render, CancelToken, EscapeTimeRenderer, RenderParams};
pub use crate::viewer::{Frame, Viewer};
