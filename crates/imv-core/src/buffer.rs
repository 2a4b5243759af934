//! Owned RGBA8 pixel buffer.
//!
//! [`PixelBuffer`] is the unit every other imv component reads and writes.
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom, four interleaved bytes
//! per pixel:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! There is no padding between rows, so `stride == width * 4`.
//!
//! # Ownership
//!
//! A buffer owns its bytes outright. Cloning is a deep copy; nothing is
//! shared between two live buffers. Allocation goes through
//! [`Vec::try_reserve_exact`] so that an out-of-memory condition surfaces as
//! [`Error::AllocationFailed`] instead of aborting the process.
//!
//! # Example
//!
//! ```rust
//! use imv_core::PixelBuffer;
//!
//! let mut img = PixelBuffer::new(4, 3).unwrap();
//! img.set_pixel(1, 2, [255, 0, 0, 255]).unwrap();
//! assert_eq!(img.pixel(1, 2), Some([255, 0, 0, 255]));
//! assert_eq!(img.as_bytes().len(), 4 * 3 * 4);
//! ```

use crate::{Error, Result, Rgba8, CHANNELS};
use tracing::trace;

/// Owned rectangular grid of RGBA8 pixels.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Creates a buffer of transparent black pixels.
    ///
    /// Zero width or height is allowed and yields an empty buffer.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the bytes cannot be reserved,
    /// [`Error::InvalidDimensions`] if the byte count overflows.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Creates a buffer with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Rgba8) -> Result<Self> {
        let len = byte_len(width, height)?;
        let mut data = reserve_bytes(len)?;
        for _ in 0..len / CHANNELS {
            data.extend_from_slice(&pixel);
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Wraps existing RGBA8 bytes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if `data.len() != width * height * 4`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imv_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::from_raw(1, 1, vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(img.pixel(0, 0), Some([1, 2, 3, 4]));
    /// assert!(PixelBuffer::from_raw(2, 2, vec![0; 3]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgba8,
    {
        let len = byte_len(width, height)?;
        let mut data = reserve_bytes(len)?;
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Allocates a zeroed buffer with the same dimensions as `self`.
    pub fn new_like(&self) -> Result<Self> {
        Self::new(self.width, self.height)
    }

    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self> {
        let mut data = reserve_bytes(self.data.len())?;
        data.extend_from_slice(&self.data);
        Ok(Self {
            data,
            width: self.width,
            height: self.height,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Returns `true` if the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if `other` has the same width and height.
    #[inline]
    pub fn same_dimensions(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Raw RGBA8 bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA8 bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Writes the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba8) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let i = self.index(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&pixel);
        Ok(())
    }

    /// Bytes of row `y`. Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }

    /// Iterates over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Byte count for a `width x height` RGBA8 image.
fn byte_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "byte count overflows usize"))
}

/// Empty vector with exactly `len` bytes reserved.
fn reserve_bytes(len: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|e| Error::allocation_failed(len, e.to_string()))?;
    trace!(bytes = len, "pixel buffer reserved");
    Ok(data)
}
