use super::PixelKernel;
use super::semi_planar::SemiPlanarFrame;
use crate::planes::read_planes;
use crate::{ConvertError, ImageRef, PixelFormat, Rgba, Yuv, yuv_to_rgba};

/// Coordinate indexed access to the Y, U and V samples of a frame
///
/// Hides whether the frame is semi-planar, fully planar or subsampled. All samples are returned
/// unsigned, chroma still carries its bias of 128.
pub trait YuvAccessor: Sync {
    fn y(&self, x: usize, y: usize) -> u8;
    fn u(&self, x: usize, y: usize) -> u8;
    fn v(&self, x: usize, y: usize) -> u8;

    /// All three samples at once
    #[inline(always)]
    fn yuv(&self, x: usize, y: usize) -> Yuv {
        Yuv::new(self.y(x, y), self.u(x, y), self.v(x, y))
    }
}

/// Accessor over NV12 (`VU_ORDER = false`) or NV21 (`VU_ORDER = true`) frames
#[derive(Debug, Clone, Copy)]
pub struct SemiPlanarAccessor<'a, const VU_ORDER: bool> {
    frame: SemiPlanarFrame<'a>,
}

pub type Nv12Accessor<'a> = SemiPlanarAccessor<'a, false>;
pub type Nv21Accessor<'a> = SemiPlanarAccessor<'a, true>;

impl<'a, const VU_ORDER: bool> SemiPlanarAccessor<'a, VU_ORDER> {
    pub fn new(frame: SemiPlanarFrame<'a>) -> Self {
        Self { frame }
    }

    #[inline(always)]
    fn uv(&self, x: usize, y: usize) -> (u8, u8) {
        let (first, second) = self.frame.chroma_pair(x, y);

        if VU_ORDER {
            (second, first)
        } else {
            (first, second)
        }
    }
}

impl<const VU_ORDER: bool> YuvAccessor for SemiPlanarAccessor<'_, VU_ORDER> {
    #[inline(always)]
    fn y(&self, x: usize, y: usize) -> u8 {
        self.frame.luma(x, y)
    }

    #[inline(always)]
    fn u(&self, x: usize, y: usize) -> u8 {
        self.uv(x, y).0
    }

    #[inline(always)]
    fn v(&self, x: usize, y: usize) -> u8 {
        self.uv(x, y).1
    }

    #[inline(always)]
    fn yuv(&self, x: usize, y: usize) -> Yuv {
        let (u, v) = self.uv(x, y);

        Yuv::new(self.frame.luma(x, y), u, v)
    }
}

/// Accessor over three separate planes, with (`SUBSAMPLED = true`, I420) or without (I444)
/// 4:2:0 chroma
#[derive(Debug, Clone, Copy)]
pub struct PlanarAccessor<'a, const SUBSAMPLED: bool> {
    y: &'a [u8],
    y_stride: usize,
    u: &'a [u8],
    u_stride: usize,
    v: &'a [u8],
    v_stride: usize,
}

pub type I420Accessor<'a> = PlanarAccessor<'a, true>;
pub type I444Accessor<'a> = PlanarAccessor<'a, false>;

impl<'a, const SUBSAMPLED: bool> PlanarAccessor<'a, SUBSAMPLED> {
    pub(crate) fn from_planes(
        [(y, y_stride), (u, u_stride), (v, v_stride)]: [(&'a [u8], usize); 3],
    ) -> Self {
        Self {
            y,
            y_stride,
            u,
            u_stride,
            v,
            v_stride,
        }
    }

    #[inline(always)]
    fn chroma_offset(x: usize, y: usize, stride: usize) -> usize {
        if SUBSAMPLED {
            (y >> 1) * stride + (x >> 1)
        } else {
            y * stride + x
        }
    }
}

impl<const SUBSAMPLED: bool> YuvAccessor for PlanarAccessor<'_, SUBSAMPLED> {
    #[inline(always)]
    fn y(&self, x: usize, y: usize) -> u8 {
        self.y[y * self.y_stride + x]
    }

    #[inline(always)]
    fn u(&self, x: usize, y: usize) -> u8 {
        self.u[Self::chroma_offset(x, y, self.u_stride)]
    }

    #[inline(always)]
    fn v(&self, x: usize, y: usize) -> u8 {
        self.v[Self::chroma_offset(x, y, self.v_stride)]
    }
}

/// Accessor chosen at runtime from the format of a source image
#[derive(Debug, Clone, Copy)]
pub enum FormatAccessor<'a> {
    Nv12(Nv12Accessor<'a>),
    Nv21(Nv21Accessor<'a>),
    I420(I420Accessor<'a>),
    I444(I444Accessor<'a>),
}

impl<'a> FormatAccessor<'a> {
    /// Bind an accessor to the planes of `src`
    ///
    /// `src` must already have passed its bounds check.
    pub(crate) fn new(src: &'a dyn ImageRef) -> Result<Self, ConvertError> {
        let accessor = match src.format() {
            PixelFormat::NV12 => Self::Nv12(SemiPlanarAccessor::new(
                SemiPlanarFrame::from_planes(read_planes(src.planes())?),
            )),
            PixelFormat::NV21 => Self::Nv21(SemiPlanarAccessor::new(
                SemiPlanarFrame::from_planes(read_planes(src.planes())?),
            )),
            PixelFormat::I420 => {
                Self::I420(PlanarAccessor::from_planes(read_planes(src.planes())?))
            }
            PixelFormat::I444 => {
                Self::I444(PlanarAccessor::from_planes(read_planes(src.planes())?))
            }
            format @ PixelFormat::RGBA => {
                return Err(ConvertError::UnsupportedSourceFormat {
                    converter: crate::Converter::Planar,
                    format,
                });
            }
        };

        Ok(accessor)
    }
}

impl YuvAccessor for FormatAccessor<'_> {
    #[inline(always)]
    fn y(&self, x: usize, y: usize) -> u8 {
        self.yuv(x, y).y
    }

    #[inline(always)]
    fn u(&self, x: usize, y: usize) -> u8 {
        self.yuv(x, y).u
    }

    #[inline(always)]
    fn v(&self, x: usize, y: usize) -> u8 {
        self.yuv(x, y).v
    }

    #[inline(always)]
    fn yuv(&self, x: usize, y: usize) -> Yuv {
        match self {
            FormatAccessor::Nv12(a) => a.yuv(x, y),
            FormatAccessor::Nv21(a) => a.yuv(x, y),
            FormatAccessor::I420(a) => a.yuv(x, y),
            FormatAccessor::I444(a) => a.yuv(x, y),
        }
    }
}

/// Converts whatever the accessor yields through the unsigned chroma path
#[derive(Debug, Clone, Copy)]
pub struct AccessorKernel<A> {
    accessor: A,
}

impl<A: YuvAccessor> AccessorKernel<A> {
    pub fn new(accessor: A) -> Self {
        Self { accessor }
    }
}

impl<A: YuvAccessor> PixelKernel for AccessorKernel<A> {
    #[inline(always)]
    fn convert(&self, x: usize, y: usize) -> Rgba {
        let Yuv { y, u, v } = self.accessor.yuv(x, y);

        yuv_to_rgba(y, u, v)
    }
}
