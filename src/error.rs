// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while carving.
//!
//! None of these are recoverable by retrying: every stage is a pure
//! function of its input, so the same input fails the same way.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A zero width or height was handed to (or would be produced by)
    /// a stage.
    #[error("image dimensions must be non-zero (width={width}, height={height})")]
    Dimension { width: u32, height: u32 },

    #[error("seam has {found} entries but the image has {expected} rows")]
    SeamLength { expected: usize, found: usize },

    #[error("seam column {column} at row {row} is outside an image of width {width}")]
    SeamColumn { row: u32, column: u32, width: u32 },

    /// The backing store for a map or raster could not be reserved.
    #[error("could not allocate storage for {cells} cells")]
    Allocation { cells: usize },

    #[error("unsupported channel count {0}; expected 3 (RGB) or 4 (RGBA)")]
    Channels(u8),

    #[error("pixel buffer holds {found} bytes but the dimensions require {expected}")]
    BufferLength { expected: usize, found: usize },

    #[error("seamcarve cannot upscale an image (width={width}, requested={requested})")]
    Upscale { width: u32, requested: u32 },

    #[cfg(feature = "threaded")]
    #[error("an energy worker thread panicked")]
    Worker,
}

pub type Result<T> = std::result::Result<T, Error>;
