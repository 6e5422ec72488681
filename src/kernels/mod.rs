//! Per-pixel conversion kernels
//!
//! A kernel is bound to one frame and computes a single output pixel per call. Kernels never
//! check bounds of their own, the frame they are bound to must be valid for every coordinate
//! they are called with.

mod accessor;
mod identity;
mod semi_planar;

pub use accessor::{
    AccessorKernel, FormatAccessor, I420Accessor, I444Accessor, Nv12Accessor, Nv21Accessor,
    PlanarAccessor, SemiPlanarAccessor, YuvAccessor,
};
pub use identity::{IdentityKernel, identity};
pub use semi_planar::{Nv12Kernel, Nv21Kernel, SemiPlanarFrame};

use crate::planes::read_planes;
use crate::{ConvertError, ImageRef, PixelFormat, Rgba};

/// A pure function from an output coordinate to the output pixel
///
/// Calls for different coordinates are independent of each other and may happen in any order
/// and on any thread.
pub trait PixelKernel: Sync {
    fn convert(&self, x: usize, y: usize) -> Rgba;
}

/// Selects the kernel used to convert a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Converter {
    /// RGBA passthrough
    Identity,

    /// Semi-planar 4:2:0, chroma pairs stored V then U
    Nv21,

    /// Semi-planar 4:2:0, chroma pairs stored U then V
    Nv12,

    /// Any YUV format through a [`YuvAccessor`]
    Planar,
}

impl Converter {
    /// Returns if this converter can read frames of the given format
    pub fn accepts(self, format: PixelFormat) -> bool {
        match self {
            Converter::Identity => format == PixelFormat::RGBA,
            Converter::Nv21 => format == PixelFormat::NV21,
            Converter::Nv12 => format == PixelFormat::NV12,
            Converter::Planar => format.is_yuv(),
        }
    }

    pub fn variants() -> impl IntoIterator<Item = Self> {
        [
            Converter::Identity,
            Converter::Nv21,
            Converter::Nv12,
            Converter::Planar,
        ]
    }
}

/// A [`Converter`] bound to the planes of one source frame
#[derive(Debug, Clone, Copy)]
pub(crate) enum FrameKernel<'a> {
    Identity(IdentityKernel<'a>),
    Nv21(Nv21Kernel<'a>),
    Nv12(Nv12Kernel<'a>),
    Planar(AccessorKernel<FormatAccessor<'a>>),
}

impl<'a> FrameKernel<'a> {
    /// `src` must already have passed its bounds check
    pub(crate) fn bind(converter: Converter, src: &'a dyn ImageRef) -> Result<Self, ConvertError> {
        if !converter.accepts(src.format()) {
            return Err(ConvertError::UnsupportedSourceFormat {
                converter,
                format: src.format(),
            });
        }

        let kernel = match converter {
            Converter::Identity => {
                let [(rgba, rgba_stride)] = read_planes(src.planes())?;

                Self::Identity(IdentityKernel::new(rgba, rgba_stride))
            }
            Converter::Nv21 => Self::Nv21(Nv21Kernel::new(SemiPlanarFrame::from_planes(
                read_planes(src.planes())?,
            ))),
            Converter::Nv12 => Self::Nv12(Nv12Kernel::new(SemiPlanarFrame::from_planes(
                read_planes(src.planes())?,
            ))),
            Converter::Planar => Self::Planar(AccessorKernel::new(FormatAccessor::new(src)?)),
        };

        Ok(kernel)
    }
}

impl PixelKernel for FrameKernel<'_> {
    #[inline(always)]
    fn convert(&self, x: usize, y: usize) -> Rgba {
        match self {
            FrameKernel::Identity(k) => k.convert(x, y),
            FrameKernel::Nv21(k) => k.convert(x, y),
            FrameKernel::Nv12(k) => k.convert(x, y),
            FrameKernel::Planar(k) => k.convert(x, y),
        }
    }
}
