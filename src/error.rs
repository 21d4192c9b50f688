// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Every failure the engine can report.  All of them are deterministic
//! functions of the caller's input, so the caller can always fix the
//! input and try again.

use failure::Fail;

/// The error type shared by the complex number, the renderer and the
/// viewer model.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum Error {
    /// A complex number was divided by exactly `0+0i`.
    #[fail(display = "complex division by zero")]
    DivideByZero,

    /// Text could not be read as a complex number of the form `R+Ii`.
    #[fail(display = "could not parse {:?} as a complex number: {}", input, reason)]
    ParseError {
        /// The offending text, as given.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A render parameter was out of range.  Raised before any pixel
    /// work begins.
    #[fail(display = "invalid {}: {}", name, reason)]
    InvalidParameter {
        /// The parameter's name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The render was cancelled through its `CancelToken`.
    #[fail(display = "render cancelled")]
    Cancelled,

    /// A render worker thread panicked.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}

impl Error {
    pub(crate) fn parse(input: &str, reason: &'static str) -> Self {
        Error::ParseError {
            input: input.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid<R: Into<String>>(name: &'static str, reason: R) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
