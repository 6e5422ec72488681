use crate::{
    BoundsCheckError, ImageMut, ImageRef, ImageRefExt, InvalidNumberOfPlanesError, PixelFormat,
    infer,
};

/// Basic wrapper around a frame buffer, implementing the [`ImageRef`] and [`ImageMut`] trait
///
/// Holds everything a conversion needs to know about one frame. Once constructed the
/// dimensions, strides and format are fixed, so a frame can't change in the middle of a conversion.
#[derive(Debug, Clone)]
pub struct Image<S> {
    format: PixelFormat,
    buffer: BufferKind<S>,
    strides: Vec<usize>,
    width: usize,
    height: usize,
}

#[derive(Debug, Clone)]
pub enum BufferKind<S> {
    Whole(S),
    Split(Vec<S>),
}

/// Everything that can go wrong when constructing an [`Image`]
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("width or height must not be zero")]
    InvalidDimensions,

    #[error(transparent)]
    BoundsCheck(#[from] BoundsCheckError),
}

impl Image<Vec<u8>> {
    /// Allocate a zeroed, packed frame
    ///
    /// Unlike [`Image::from_buffer`] this accepts a zero width or height. Such a frame is empty
    /// and every conversion rejects it with [`ConvertError::InvalidDimensions`].
    ///
    /// [`ConvertError::InvalidDimensions`]: crate::ConvertError::InvalidDimensions
    pub fn blank(format: PixelFormat, width: usize, height: usize) -> Self {
        Self {
            format,
            buffer: BufferKind::Whole(vec![0u8; format.buffer_size(width, height)]),
            strides: format.packed_strides(width),
            width,
            height,
        }
    }
}

impl<S> Image<S>
where
    Image<S>: ImageRef,
{
    /// Wrap a single contiguous buffer, the planes are inferred from the format and strides
    pub fn from_buffer(
        format: PixelFormat,
        buffer: S,
        strides: Option<Vec<usize>>,
        width: usize,
        height: usize,
    ) -> Result<Self, ImageError> {
        Self::new(format, BufferKind::Whole(buffer), strides, width, height)
    }

    /// Wrap already separated planes
    pub fn from_planes(
        format: PixelFormat,
        planes: Vec<S>,
        strides: Option<Vec<usize>>,
        width: usize,
        height: usize,
    ) -> Result<Self, ImageError> {
        Self::new(format, BufferKind::Split(planes), strides, width, height)
    }

    fn new(
        format: PixelFormat,
        buffer: BufferKind<S>,
        strides: Option<Vec<usize>>,
        width: usize,
        height: usize,
    ) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions);
        }

        let strides = strides.unwrap_or_else(|| format.packed_strides(width));

        let expected = format.packed_strides(width).len();
        if strides.len() != expected {
            return Err(ImageError::BoundsCheck(
                InvalidNumberOfPlanesError {
                    expected,
                    got: strides.len(),
                }
                .into(),
            ));
        }

        let this = Self {
            format,
            buffer,
            strides,
            width,
            height,
        };

        this.bounds_check()?;

        Ok(this)
    }

    pub fn buffer(&self) -> &BufferKind<S> {
        &self.buffer
    }

    pub fn into_buffer(self) -> BufferKind<S> {
        self.buffer
    }
}

impl<S: AsRef<[u8]>> ImageRef for Image<S> {
    fn format(&self) -> PixelFormat {
        self.format
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn planes(&self) -> Box<dyn Iterator<Item = (&[u8], usize)> + '_> {
        match &self.buffer {
            // The stride count was checked on construction, a failed inference yields no planes
            BufferKind::Whole(buffer) => Box::new(
                infer(
                    self.format,
                    buffer.as_ref(),
                    self.width,
                    self.height,
                    Some(&self.strides),
                )
                .into_iter()
                .flatten()
                .zip(self.strides.iter().copied()),
            ),
            BufferKind::Split(planes) => Box::new(
                planes
                    .iter()
                    .map(|p| p.as_ref())
                    .zip(self.strides.iter().copied()),
            ),
        }
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> ImageMut for Image<S> {
    fn planes_mut(&mut self) -> Box<dyn Iterator<Item = (&mut [u8], usize)> + '_> {
        match &mut self.buffer {
            BufferKind::Whole(buffer) => Box::new(
                infer(
                    self.format,
                    buffer.as_mut(),
                    self.width,
                    self.height,
                    Some(&self.strides),
                )
                .into_iter()
                .flatten()
                .zip(self.strides.iter().copied()),
            ),
            BufferKind::Split(planes) => Box::new(
                planes
                    .iter_mut()
                    .map(|plane| plane.as_mut())
                    .zip(self.strides.iter().copied()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_passes_bounds_check() {
        for format in PixelFormat::variants() {
            let image = Image::blank(format, 6, 4);

            image.bounds_check().unwrap();
            assert_eq!(image.planes().count(), format.packed_strides(6).len());
        }
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let err = Image::from_buffer(PixelFormat::RGBA, vec![0u8; 16], None, 0, 4).unwrap_err();

        assert!(matches!(err, ImageError::InvalidDimensions));
    }

    #[test]
    fn undersized_buffer_is_rejected() {
        // NV21 4x2 needs 12 bytes
        let err = Image::from_buffer(PixelFormat::NV21, vec![0u8; 11], None, 4, 2).unwrap_err();

        assert!(matches!(err, ImageError::BoundsCheck(_)));
    }

    #[test]
    fn wrong_number_of_strides_is_rejected() {
        let err = Image::from_buffer(PixelFormat::NV12, vec![0u8; 12], Some(vec![4]), 4, 2)
            .unwrap_err();

        assert!(matches!(
            err,
            ImageError::BoundsCheck(BoundsCheckError::InvalidNumberOfPlanes(
                InvalidNumberOfPlanesError {
                    expected: 2,
                    got: 1
                }
            ))
        ));

        let err = Image::from_buffer(PixelFormat::RGBA, vec![0u8; 16], Some(vec![8, 8]), 2, 2)
            .unwrap_err();

        assert!(matches!(err, ImageError::BoundsCheck(_)));
    }

    #[test]
    fn blank_allows_empty_frames() {
        let image = Image::blank(PixelFormat::NV21, 0, 4);

        assert_eq!(image.width(), 0);
        image.bounds_check().unwrap();
    }

    #[test]
    fn split_planes() {
        let y = vec![16u8; 16];
        let u = vec![128u8; 4];
        let v = vec![128u8; 4];

        let image = Image::from_planes(PixelFormat::I420, vec![y, u, v], None, 4, 4).unwrap();

        let strides: Vec<usize> = image.planes().map(|(_, stride)| stride).collect();
        assert_eq!(strides, vec![4, 2, 2]);
    }
}
