//! Per-pixel YUV to RGBA conversion kernels
//!
//! Convert camera frames in NV21, NV12, I420 or I444 layout into RGBA, or pass RGBA frames
//! through unchanged. Every output pixel is produced by a pure [`PixelKernel`] call, the frame
//! level functions [`convert`] and [`convert_multi_thread`] validate the frames once and then
//! visit every coordinate.
//!
//! ```
//! use yuv_kernels::{Converter, Image, PixelFormat, convert};
//!
//! let (width, height) = (4, 2);
//!
//! // Grey NV21 frame: luma 100, neutral chroma
//! let mut nv21 = vec![100u8; width * height];
//! nv21.extend(std::iter::repeat_n(128u8, width * height / 2));
//!
//! let src = Image::from_buffer(PixelFormat::NV21, nv21, None, width, height).unwrap();
//! let mut dst = Image::blank(PixelFormat::RGBA, width, height);
//!
//! convert(Converter::Nv21, &src, &mut dst).unwrap();
//! ```

use planes::read_planes_mut;

pub use color::{Rgba, Yuv, yuv_to_rgba, yuv_to_rgba_centered};
pub use image::{BufferKind, Image, ImageError};
pub use image_traits::{ImageMut, ImageRef, ImageRefExt};
pub use kernels::{
    AccessorKernel, Converter, FormatAccessor, I420Accessor, I444Accessor, IdentityKernel,
    Nv12Accessor, Nv12Kernel, Nv21Accessor, Nv21Kernel, PixelKernel, PlanarAccessor,
    SemiPlanarAccessor, SemiPlanarFrame, YuvAccessor, identity,
};
#[cfg(feature = "multi-thread")]
pub use multi_thread::convert_multi_thread;
pub use pixel_format::{BoundsCheckError, PixelFormat};
pub use planes::{
    AnySlice, InvalidNumberOfPlanesError, infer, infer_i420, infer_i444, infer_semi_planar,
};

mod color;
mod dispatch;
mod image;
mod image_traits;
mod kernels;
#[cfg(feature = "multi-thread")]
mod multi_thread;
mod pixel_format;
mod plane_decs;
mod planes;
mod util;

/// Everything that can go wrong when converting a frame
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("source and destination images have different dimensions")]
    MismatchedImageSize,

    #[error("width or height must not be zero")]
    InvalidDimensions,

    #[error("the {converter:?} converter can't read {format:?} frames")]
    UnsupportedSourceFormat {
        converter: Converter,
        format: PixelFormat,
    },

    #[error("destination must be RGBA, got {0:?}")]
    InvalidDestinationFormat(PixelFormat),

    #[error(transparent)]
    BoundsCheck(#[from] BoundsCheckError),

    #[error(transparent)]
    InvalidNumberOfPlanes(#[from] InvalidNumberOfPlanesError),
}

/// Verify that the input values are all valid and safe to move on to, returns the frame dimensions
fn verify_input<D: ImageRef + ?Sized>(
    converter: Converter,
    src: &dyn ImageRef,
    dst: &D,
) -> Result<(usize, usize), ConvertError> {
    if !converter.accepts(src.format()) {
        return Err(ConvertError::UnsupportedSourceFormat {
            converter,
            format: src.format(),
        });
    }

    if dst.format() != PixelFormat::RGBA {
        return Err(ConvertError::InvalidDestinationFormat(dst.format()));
    }

    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(ConvertError::MismatchedImageSize);
    }

    if src.width() == 0 || src.height() == 0 {
        return Err(ConvertError::InvalidDimensions);
    }

    src.bounds_check()?;
    dst.bounds_check()?;

    tracing::debug!(
        ?converter,
        src_format = ?src.format(),
        width = src.width(),
        height = src.height(),
        "converting frame"
    );

    Ok((src.width(), src.height()))
}

fn rgba_plane_mut(dst: &mut dyn ImageMut) -> Result<(&mut [u8], usize), ConvertError> {
    let [(rgba, stride)] = read_planes_mut(dst.planes_mut())?;

    Ok((rgba, stride))
}

/// Convert `src` into the RGBA image `dst` using the given converter
///
/// Both images must have the same dimensions and pass their bounds check, the source format
/// must be accepted by the converter (see [`Converter::accepts`]). Every pixel is computed on
/// the calling thread.
#[inline(never)]
pub fn convert(
    converter: Converter,
    src: &dyn ImageRef,
    dst: &mut dyn ImageMut,
) -> Result<(), ConvertError> {
    let (width, height) = verify_input(converter, src, &*dst)?;

    let kernel = kernels::FrameKernel::bind(converter, src)?;
    let (rgba, stride) = rgba_plane_mut(dst)?;

    dispatch::convert_frame(&kernel, width, height, rgba, stride);

    Ok(())
}
