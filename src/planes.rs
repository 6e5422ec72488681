use crate::{
    PixelFormat,
    plane_decs::{I420_PLANES, I444_PLANES, PlaneDesc, RGBA_PLANES, SEMI_PLANAR_420_PLANES},
    util::ArrayIter,
};
use std::mem::MaybeUninit;

#[derive(Debug, thiserror::Error)]
#[error("got invalid number of planes, expected {expected} but only got {got}")]
pub struct InvalidNumberOfPlanesError {
    pub expected: usize,
    pub got: usize,
}

pub(crate) fn read_planes<'a, const N: usize>(
    mut iter: impl Iterator<Item = (&'a [u8], usize)>,
) -> Result<[(&'a [u8], usize); N], InvalidNumberOfPlanesError> {
    let mut out: [(&'a [u8], usize); N] = [(&[], 0); N];

    for (i, out) in out.iter_mut().enumerate() {
        *out = iter.next().ok_or(InvalidNumberOfPlanesError {
            expected: N,
            got: i,
        })?;
    }

    Ok(out)
}

pub(crate) fn read_planes_mut<'a, const N: usize>(
    mut iter: impl Iterator<Item = (&'a mut [u8], usize)>,
) -> Result<[(&'a mut [u8], usize); N], InvalidNumberOfPlanesError> {
    let mut out: [MaybeUninit<(&'a mut [u8], usize)>; N] = [const { MaybeUninit::uninit() }; N];

    for (i, out) in out.iter_mut().enumerate() {
        out.write(iter.next().ok_or(InvalidNumberOfPlanesError {
            expected: N,
            got: i,
        })?);
    }

    // Safety: every element was written by the loop above, an early return leaves nothing to drop
    Ok(out.map(|plane| unsafe { plane.assume_init() }))
}

/// Infer the planes for an image in the given format using the given dimensions and strides
///
/// If `buf` is too small the trailing planes come out short (or empty), use
/// [`PixelFormat::bounds_check`] to detect that. Strides, when given, must name every plane.
pub fn infer<S: AnySlice>(
    format: PixelFormat,
    buf: S,
    width: usize,
    height: usize,
    strides: Option<&[usize]>,
) -> Result<impl Iterator<Item = S>, InvalidNumberOfPlanesError> {
    let planes = match format {
        PixelFormat::NV21 | PixelFormat::NV12 => {
            ArrayIter::from(infer_semi_planar(buf, width, height, strides)?)
        }
        PixelFormat::I420 => ArrayIter::from(infer_i420(buf, width, height, strides)?),
        PixelFormat::I444 => ArrayIter::from(infer_i444(buf, width, height, strides)?),
        PixelFormat::RGBA => {
            ArrayIter::from(infer_impl(RGBA_PLANES, buf, width, height, strides)?)
        }
    };

    Ok(planes)
}

fn infer_impl<const N: usize, S: AnySlice>(
    plane_decs: [PlaneDesc; N],
    mut buf: S,
    width: usize,
    height: usize,
    strides: Option<&[usize]>,
) -> Result<[S; N], InvalidNumberOfPlanesError> {
    let strides: [usize; N] = match strides {
        Some(strides) => {
            <[usize; N]>::try_from(strides).map_err(|_| InvalidNumberOfPlanesError {
                expected: N,
                got: strides.len(),
            })?
        }
        None => plane_decs.map(|desc| desc.packed_stride(width)),
    };

    let mut out: [MaybeUninit<S>; N] = [const { MaybeUninit::uninit() }; N];

    for (i, ((desc, stride), out)) in plane_decs
        .into_iter()
        .zip(strides)
        .zip(out.iter_mut())
        .enumerate()
    {
        // The last plane keeps the remainder of the buffer
        if i + 1 == N {
            out.write(std::mem::take(&mut buf));
            break;
        }

        // Clamp instead of panicking, the bounds check reports undersized buffers
        let split_at = (desc.height_op.op(height) * stride).min(buf.slice_len());

        let (prev, rem) = std::mem::take(&mut buf).slice_split_at(split_at);

        out.write(prev);
        buf = rem;
    }

    // Safety: the loop writes all N elements, the last iteration writes the remainder
    Ok(out.map(|p| unsafe { p.assume_init() }))
}

/// Infer the luma and interleaved chroma planes of a full NV12 or NV21 image
pub fn infer_semi_planar<S: AnySlice>(
    buf: S,
    width: usize,
    height: usize,
    strides: Option<&[usize]>,
) -> Result<[S; 2], InvalidNumberOfPlanesError> {
    infer_impl(SEMI_PLANAR_420_PLANES, buf, width, height, strides)
}

/// Infer the planes for a full I420 image using the given dimensions
pub fn infer_i420<S: AnySlice>(
    buf: S,
    width: usize,
    height: usize,
    strides: Option<&[usize]>,
) -> Result<[S; 3], InvalidNumberOfPlanesError> {
    infer_impl(I420_PLANES, buf, width, height, strides)
}

/// Infer the planes for a full I444 image using the given dimensions
pub fn infer_i444<S: AnySlice>(
    buf: S,
    width: usize,
    height: usize,
    strides: Option<&[usize]>,
) -> Result<[S; 3], InvalidNumberOfPlanesError> {
    infer_impl(I444_PLANES, buf, width, height, strides)
}

/// Helper trait implemented on &[T] and &mut [T]
#[diagnostic::on_unimplemented(message = "AnySlice is only implemented for &[T] and &mut [T].\n\
               When using or Vec<T> or similar try .as_slice() or .as_mut_slice()")]
pub trait AnySlice: sealed::Sealed + Default + Sized {
    fn slice_len(&self) -> usize;
    fn slice_split_at(self, at: usize) -> (Self, Self);
}

mod sealed {
    pub trait Sealed {}
    impl<T> Sealed for &[T] {}
    impl<T> Sealed for &mut [T] {}
}

impl<T> AnySlice for &[T] {
    fn slice_len(&self) -> usize {
        self.len()
    }

    fn slice_split_at(self, at: usize) -> (Self, Self) {
        self.split_at(at)
    }
}

impl<T> AnySlice for &mut [T] {
    fn slice_len(&self) -> usize {
        self.len()
    }

    fn slice_split_at(self, at: usize) -> (Self, Self) {
        self.split_at_mut(at)
    }
}
