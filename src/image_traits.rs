use crate::{BoundsCheckError, PixelFormat};

/// Read access to a frame: its format, dimensions and planes
///
/// Implementations must return the same values on every call for the lifetime of a conversion.
pub trait ImageRef {
    fn format(&self) -> PixelFormat;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Returns an iterator yielding every plane with their associated stride
    fn planes(&self) -> Box<dyn Iterator<Item = (&[u8], usize)> + '_>;
}

/// Write access to a frame, used as the destination of a conversion
pub trait ImageMut: ImageRef {
    /// Returns an iterator yielding every plane with their associated stride
    fn planes_mut(&mut self) -> Box<dyn Iterator<Item = (&mut [u8], usize)> + '_>;
}

/// [`ImageRef`] extension methods
pub trait ImageRefExt: ImageRef {
    /// Perform a bounds check, return an error when it fails
    fn bounds_check(&self) -> Result<(), BoundsCheckError> {
        self.format()
            .bounds_check(self.planes(), self.width(), self.height())
    }
}

impl<T: ImageRef + ?Sized> ImageRefExt for T {}

impl<T: ImageRef + ?Sized> ImageRef for &T {
    fn format(&self) -> PixelFormat {
        <T as ImageRef>::format(self)
    }

    fn width(&self) -> usize {
        <T as ImageRef>::width(self)
    }

    fn height(&self) -> usize {
        <T as ImageRef>::height(self)
    }

    fn planes(&self) -> Box<dyn Iterator<Item = (&[u8], usize)> + '_> {
        <T as ImageRef>::planes(self)
    }
}

impl<T: ImageRef + ?Sized> ImageRef for &mut T {
    fn format(&self) -> PixelFormat {
        <T as ImageRef>::format(self)
    }

    fn width(&self) -> usize {
        <T as ImageRef>::width(self)
    }

    fn height(&self) -> usize {
        <T as ImageRef>::height(self)
    }

    fn planes(&self) -> Box<dyn Iterator<Item = (&[u8], usize)> + '_> {
        <T as ImageRef>::planes(self)
    }
}

impl<T: ImageMut + ?Sized> ImageMut for &mut T {
    fn planes_mut(&mut self) -> Box<dyn Iterator<Item = (&mut [u8], usize)> + '_> {
        <T as ImageMut>::planes_mut(self)
    }
}
