use crate::{Converter, InvalidNumberOfPlanesError, plane_decs::*, planes::read_planes};

/// Supported pixel formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PixelFormat {
    /// Y and interleaved VU planes, 4:2:0 sub sampling (Android camera default)
    NV21,

    /// Y and interleaved UV planes, 4:2:0 sub sampling
    NV12,

    /// Y, U and V planes, 4:2:0 sub sampling
    I420,

    /// Y, U and V planes, 4:4:4 sub sampling
    I444,

    /// Single RGBA interleaved plane
    RGBA,
}

impl PixelFormat {
    /// Calculate the required buffer size in bytes given the [`PixelFormat`] self and image
    /// dimensions (in pixel width, height).
    pub fn buffer_size(self, width: usize, height: usize) -> usize {
        self.plane_desc()
            .iter()
            .map(|plane| plane.packed_stride(width) * plane.height_op.op(height))
            .sum()
    }

    /// Calculate the strides of an image in a packed buffer
    pub fn packed_strides(self, width: usize) -> Vec<usize> {
        self.plane_desc()
            .iter()
            .map(|desc| desc.packed_stride(width))
            .collect()
    }

    /// Check if the given planes+strides are valid for dimensions
    pub fn bounds_check<'a>(
        self,
        planes: impl Iterator<Item = (&'a [u8], usize)>,
        width: usize,
        height: usize,
    ) -> Result<(), BoundsCheckError> {
        use PixelFormat::*;

        fn bounds_check<const N: usize>(
            planes: [PlaneDesc; N],
            got: [(&[u8], usize); N],
            width: usize,
            height: usize,
        ) -> Result<(), BoundsCheckError> {
            for (i, (plane, (slice, stride))) in planes.into_iter().zip(got).enumerate() {
                // Ensure stride is not smaller than the width would allow
                let min_stride = plane.packed_stride(width);

                if min_stride > stride {
                    return Err(BoundsCheckError::InvalidStride {
                        plane: i,
                        minimum: min_stride,
                        got: stride,
                    });
                }

                // The last row only needs to be as long as the packed stride
                let rows = plane.height_op.op(height);
                let min_len = stride * rows.saturating_sub(1) + min_stride;

                if min_len > slice.len() {
                    return Err(BoundsCheckError::InvalidPlaneSize {
                        plane: i,
                        minimum: min_len,
                        got: slice.len(),
                    });
                }
            }

            Ok(())
        }

        match self {
            NV21 | NV12 => {
                bounds_check(SEMI_PLANAR_420_PLANES, read_planes(planes)?, width, height)
            }
            I420 => bounds_check(I420_PLANES, read_planes(planes)?, width, height),
            I444 => bounds_check(I444_PLANES, read_planes(planes)?, width, height),
            RGBA => bounds_check(RGBA_PLANES, read_planes(planes)?, width, height),
        }
    }

    /// Returns true for every format carrying luma and chroma samples
    pub fn is_yuv(self) -> bool {
        !matches!(self, PixelFormat::RGBA)
    }

    /// The converter that turns a frame of this format into RGBA
    ///
    /// Semi-planar formats get their dedicated kernel, fully planar formats go through the
    /// accessor kernel.
    pub fn default_converter(self) -> Converter {
        match self {
            PixelFormat::NV21 => Converter::Nv21,
            PixelFormat::NV12 => Converter::Nv12,
            PixelFormat::I420 | PixelFormat::I444 => Converter::Planar,
            PixelFormat::RGBA => Converter::Identity,
        }
    }

    pub(crate) fn plane_desc(&self) -> &'static [PlaneDesc] {
        use PixelFormat::*;

        match self {
            NV21 | NV12 => &SEMI_PLANAR_420_PLANES,
            I420 => &I420_PLANES,
            I444 => &I444_PLANES,
            RGBA => &RGBA_PLANES,
        }
    }

    pub fn variants() -> impl IntoIterator<Item = Self> {
        use PixelFormat::*;

        [NV21, NV12, I420, I444, RGBA]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BoundsCheckError {
    #[error(transparent)]
    InvalidNumberOfPlanes(#[from] InvalidNumberOfPlanesError),

    #[error("invalid stride at plane {plane}, expected it to be at least {minimum}, but got {got}")]
    InvalidStride {
        plane: usize,
        minimum: usize,
        got: usize,
    },

    #[error(
        "invalid plane size at plane {plane}, expected it to be at least {minimum}, but got {got}"
    )]
    InvalidPlaneSize {
        plane: usize,
        minimum: usize,
        got: usize,
    },
}
