// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time renderer.
//!
//! A renderer is built once from a viewport, a grid size and the
//! render parameters, all of which are validated up front.  After
//! that, rendering cannot fail except through cancellation: every
//! pixel is a pure function of its own coordinate, so rows can be
//! handed to any number of worker threads in any order and the result
//! is identical to the single-threaded render.

use std::iter::Enumerate;
use std::slice::ChunksMut;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use itertools::iproduct;
use log::{debug, trace};

use crate::colour::colour;
use crate::complex::Complex;
use crate::error::Error;
use crate::escape::escape_time;
use crate::planes::{Pixel, PlaneMapper};

type RowQueue<'a> = Arc<Mutex<Enumerate<ChunksMut<'a, u32>>>>;

/// How many rows no worker has taken yet.  A poisoned queue counts as
/// unfinished.
fn rows_left(rows: &Mutex<Enumerate<ChunksMut<u32>>>) -> usize {
    match rows.lock() {
        Ok(rows) => rows.len(),
        Err(_) => 1,
    }
}

/// The knobs of the escape-time iteration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderParams {
    /// The magnitude past which a point has escaped.
    pub radius: f64,
    /// The iteration count at which a point is declared bounded.
    pub max_iterations: usize,
}

impl Default for RenderParams {
    fn default() -> Self {
        RenderParams {
            radius: 2.0,
            max_iterations: 100,
        }
    }
}

impl RenderParams {
    /// Builds and validates a parameter set.
    pub fn new(radius: f64, max_iterations: usize) -> Result<Self, Error> {
        let params = RenderParams {
            radius,
            max_iterations,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks that the radius is positive and that at least one
    /// iteration is allowed.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.radius > 0.0) {
            return Err(Error::invalid(
                "radius",
                format!("{} is not greater than zero", self.radius),
            ));
        }
        if self.max_iterations == 0 {
            return Err(Error::invalid("max iterations", "must be at least one"));
        }
        Ok(())
    }
}

/// A cooperative cancellation flag.  Clones share the flag, so one
/// clone can be handed to a render while another stays with whoever
/// may want to abandon it.  Workers check it between rows.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        CancelToken(Arc::new(AtomicBool::new(false)))
    }

    /// Asks every render holding this token to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether `cancel` has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Renders one viewport at one size.
#[derive(Debug, Clone)]
pub struct EscapeTimeRenderer {
    plane: PlaneMapper,
    params: RenderParams,
}

impl EscapeTimeRenderer {
    /// Requires two opposite corners of the viewport (in any order),
    /// the width and height of the image, and the iteration parameters.
    /// Everything is checked here so that rendering never starts on bad
    /// input.
    pub fn new(
        a: Complex,
        b: Complex,
        width: usize,
        height: usize,
        params: RenderParams,
    ) -> Result<Self, Error> {
        params.validate()?;
        let plane = PlaneMapper::new(width, height, a, b)?;
        Ok(EscapeTimeRenderer { plane, params })
    }

    /// The pixel-to-plane mapping in use.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The escape count for a single pixel.
    #[inline]
    pub fn escape_time_at(&self, pixel: &Pixel) -> usize {
        let c = self.plane.pixel_to_point(pixel);
        escape_time(c, self.params.radius, self.params.max_iterations)
    }

    /// The packed colour for a single pixel.
    #[inline]
    pub fn pixel(&self, pixel: &Pixel) -> u32 {
        colour(self.escape_time_at(pixel), self.params.max_iterations)
    }

    fn render_row(&self, row: usize, pixels: &mut [u32]) {
        for (column, out) in pixels.iter_mut().enumerate() {
            *out = self.pixel(&Pixel(column, row));
        }
    }

    /// The single-threaded render.  Returns `width × height` packed
    /// colours, row-major, top row first.
    pub fn render(&self) -> Vec<u32> {
        debug!(
            "rendering {}x{} of {:?} on one thread",
            self.plane.width(),
            self.plane.height(),
            self.plane.complex_plane
        );
        iproduct!(0..self.plane.height(), 0..self.plane.width())
            .map(|(row, column)| self.pixel(&Pixel(column, row)))
            .collect()
    }

    /// A multi-threaded render.  Rows are pulled from a shared queue by
    /// `threads` scoped workers, each writing only the rows it took.
    /// The output matches `render()` exactly.
    ///
    /// Workers stop taking rows once `cancel` is set.  If that left any
    /// row unrendered the result is `Error::Cancelled`, never a partial
    /// image; a cancel that arrives after the last row was taken changes
    /// nothing.
    pub fn render_threaded(&self, threads: usize, cancel: &CancelToken) -> Result<Vec<u32>, Error> {
        if threads == 0 {
            return Err(Error::invalid("threads", "must be at least one"));
        }
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        debug!(
            "rendering {}x{} of {:?} on {} threads",
            self.plane.width(),
            self.plane.height(),
            self.plane.complex_plane,
            threads
        );

        let mut buffer = vec![0 as u32; self.plane.len()];
        let skipped = {
            let rows: RowQueue =
                Arc::new(Mutex::new(buffer.chunks_mut(self.plane.width()).enumerate()));
            let outcome = crossbeam::scope(|spawner| {
                for worker in 0..threads {
                    let rows = rows.clone();
                    spawner.spawn(move |_| {
                        let mut done = 0;
                        while !cancel.is_cancelled() {
                            let next = match rows.lock() {
                                Ok(mut rows) => rows.next(),
                                Err(_) => None,
                            };
                            match next {
                                Some((row, pixels)) => {
                                    self.render_row(row, pixels);
                                    done += 1;
                                }
                                None => break,
                            }
                        }
                        trace!("worker {} rendered {} rows", worker, done);
                    });
                }
            });
            if outcome.is_err() {
                return Err(Error::WorkerPanicked);
            }
            rows_left(&rows)
        };

        if skipped > 0 {
            debug!("render cancelled with {} rows left", skipped);
            return Err(Error::Cancelled);
        }
        Ok(buffer)
    }
}

/// Renders the rectangle between corners `a` and `b` into a
/// `width × height` buffer of packed ARGB colours, using every core.
pub fn render(
    a: Complex,
    b: Complex,
    width: usize,
    height: usize,
    radius: f64,
    max_iterations: usize,
) -> Result<Vec<u32>, Error> {
    let params = RenderParams::new(radius, max_iterations)?;
    EscapeTimeRenderer::new(a, b, width, height, params)?
        .render_threaded(num_cpus::get(), &CancelToken::new())
}
