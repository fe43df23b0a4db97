// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel grid the carver reads from and writes to.
//!
//! The carving stages don't care where pixels live; they only need to
//! read a channel at an address, write one back, and ask for a fresh
//! grid of a given size.  That contract is the `Raster` trait.  Two
//! implementations ship here: `PixelBuffer`, an owned, packed,
//! row-major byte buffer with an explicit channel count (the layout
//! foreign callers hand across a binding), and any 8-bit
//! `image::ImageBuffer`, so `RgbImage` and `RgbaImage` can be carved
//! directly.

use crate::error::{Error, Result};
use crate::twodmap::{cell_count, try_filled};
use image::{ImageBuffer, Pixel};

/// With the `threaded` feature the energy map is computed from several
/// threads at once, so every raster has to be shareable between them.
#[cfg(feature = "threaded")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "threaded")]
impl<T: Sync> MaybeSync for T {}

#[cfg(not(feature = "threaded"))]
pub trait MaybeSync {}
#[cfg(not(feature = "threaded"))]
impl<T> MaybeSync for T {}

/// A mutable rectangular grid of 8-bit pixels.  Coordinates are
/// `(x, y)`: column, then row.
pub trait Raster: Sized + MaybeSync {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Channels per pixel: 3 for RGB, 4 for RGBA.
    fn channels(&self) -> u8;

    /// Read one channel of one pixel.
    fn get(&self, x: u32, y: u32, channel: u8) -> u8;

    /// Write one channel of one pixel.
    fn put(&mut self, x: u32, y: u32, channel: u8, value: u8);

    /// Allocate a new, zeroed raster of the same kind.
    fn allocate(width: u32, height: u32, channels: u8) -> Result<Self>;

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Write every channel of a pixel at once.  Extra values past the
    /// channel count are ignored.
    fn set_pixel(&mut self, x: u32, y: u32, values: &[u8]) {
        let channels = self.channels() as usize;
        for (c, v) in values.iter().take(channels).enumerate() {
            self.put(x, y, c as u8, *v);
        }
    }

    /// Copy all channels of the pixel at `from` in `source` to `to` in
    /// this raster.
    fn copy_pixel(&mut self, source: &Self, from: (u32, u32), to: (u32, u32)) {
        for c in 0..source.channels() {
            self.put(to.0, to.1, c, source.get(from.0, from.1, c));
        }
    }
}

fn check_channels(channels: u8) -> Result<()> {
    match channels {
        3 | 4 => Ok(()),
        _ => Err(Error::Channels(channels)),
    }
}

/// An owned, packed, row-major pixel buffer: `height` rows of `width`
/// pixels of `channels` bytes each, with no padding.  The dimensions
/// travel with the bytes and are never inferred from the buffer
/// length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Take ownership of a raw byte buffer.
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        check_channels(channels)?;
        if width == 0 || height == 0 {
            return Err(Error::Dimension { width, height });
        }
        let expected = cell_count(&[width as usize, height as usize, channels as usize])?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                found: data.len(),
            });
        }
        Ok(PixelBuffer {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    // Same rule as the two-dimensional maps: one place does index math.
    fn offset(&self, x: u32, y: u32, channel: u8) -> usize {
        debug_assert!(x < self.width && y < self.height && channel < self.channels);
        ((y as usize) * (self.width as usize) + (x as usize)) * (self.channels as usize)
            + channel as usize
    }
}

impl Raster for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn channels(&self) -> u8 {
        self.channels
    }

    fn get(&self, x: u32, y: u32, channel: u8) -> u8 {
        self.data[self.offset(x, y, channel)]
    }

    fn put(&mut self, x: u32, y: u32, channel: u8, value: u8) {
        let index = self.offset(x, y, channel);
        self.data[index] = value;
    }

    fn allocate(width: u32, height: u32, channels: u8) -> Result<Self> {
        check_channels(channels)?;
        if width == 0 || height == 0 {
            return Err(Error::Dimension { width, height });
        }
        let cells = cell_count(&[width as usize, height as usize, channels as usize])?;
        Ok(PixelBuffer {
            width,
            height,
            channels,
            data: try_filled(cells, 0u8)?,
        })
    }
}

impl<P> Raster for ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8> + MaybeSync,
{
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn channels(&self) -> u8 {
        P::CHANNEL_COUNT
    }

    fn get(&self, x: u32, y: u32, channel: u8) -> u8 {
        self.get_pixel(x, y).channels()[channel as usize]
    }

    fn put(&mut self, x: u32, y: u32, channel: u8, value: u8) {
        self.get_pixel_mut(x, y).channels_mut()[channel as usize] = value;
    }

    fn allocate(width: u32, height: u32, channels: u8) -> Result<Self> {
        check_channels(channels)?;
        if channels != P::CHANNEL_COUNT {
            return Err(Error::Channels(channels));
        }
        if width == 0 || height == 0 {
            return Err(Error::Dimension { width, height });
        }
        let cells = cell_count(&[width as usize, height as usize, channels as usize])?;
        ImageBuffer::from_raw(width, height, try_filled(cells, 0u8)?)
            .ok_or(Error::Allocation { cells })
    }
}
