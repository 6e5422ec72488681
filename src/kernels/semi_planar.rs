use super::PixelKernel;
use crate::color::matrix::CHROMA_OFFSET;
use crate::{Rgba, yuv_to_rgba, yuv_to_rgba_centered};

/// Luma plane followed by a plane of interleaved chroma pairs at half horizontal and vertical
/// resolution
///
/// Shared by the NV21 and NV12 kernels, which only differ in the order inside a chroma pair.
#[derive(Debug, Clone, Copy)]
pub struct SemiPlanarFrame<'a> {
    luma: &'a [u8],
    luma_stride: usize,
    chroma: &'a [u8],
    chroma_stride: usize,
}

impl<'a> SemiPlanarFrame<'a> {
    /// Split a packed frame buffer: `width * height` luma bytes followed by the chroma plane
    ///
    /// The buffer is not checked against the dimensions, use [`Image`](crate::Image) for a
    /// checked frame.
    pub fn packed(buf: &'a [u8], width: usize, height: usize) -> Self {
        let (luma, chroma) = buf.split_at((width * height).min(buf.len()));

        Self {
            luma,
            luma_stride: width,
            chroma,
            chroma_stride: width,
        }
    }

    pub(crate) fn from_planes(
        [(luma, luma_stride), (chroma, chroma_stride)]: [(&'a [u8], usize); 2],
    ) -> Self {
        Self {
            luma,
            luma_stride,
            chroma,
            chroma_stride,
        }
    }

    #[inline(always)]
    pub(crate) fn luma(&self, x: usize, y: usize) -> u8 {
        self.luma[y * self.luma_stride + x]
    }

    /// Offset of the chroma pair for (x, y) inside the chroma plane
    ///
    /// Odd columns share the pair of the even column before them and every two rows share a
    /// chroma row. With packed strides the offset into the whole frame buffer is
    /// `width * height + (x & !1) + (y >> 1) * width`.
    #[inline(always)]
    pub(crate) fn chroma_index(&self, x: usize, y: usize) -> usize {
        (y >> 1) * self.chroma_stride + (x & !1)
    }

    /// Both bytes of the chroma pair in memory order
    #[inline(always)]
    pub(crate) fn chroma_pair(&self, x: usize, y: usize) -> (u8, u8) {
        let i = self.chroma_index(x, y);

        (self.chroma[i], self.chroma[i + 1])
    }
}

/// NV21: the chroma pair is stored as V, U
///
/// Chroma is centered right after the fetch and fed into the centered conversion.
#[derive(Debug, Clone, Copy)]
pub struct Nv21Kernel<'a> {
    frame: SemiPlanarFrame<'a>,
}

impl<'a> Nv21Kernel<'a> {
    pub fn new(frame: SemiPlanarFrame<'a>) -> Self {
        Self { frame }
    }
}

impl PixelKernel for Nv21Kernel<'_> {
    #[inline(always)]
    fn convert(&self, x: usize, y: usize) -> Rgba {
        let luma = self.frame.luma(x, y);
        let (v, u) = self.frame.chroma_pair(x, y);

        let v = i32::from(v) - CHROMA_OFFSET;
        let u = i32::from(u) - CHROMA_OFFSET;

        yuv_to_rgba_centered(luma, u, v)
    }
}

/// NV12: the chroma pair is stored as U, V
///
/// Chroma stays unsigned, the unsigned conversion removes the bias.
#[derive(Debug, Clone, Copy)]
pub struct Nv12Kernel<'a> {
    frame: SemiPlanarFrame<'a>,
}

impl<'a> Nv12Kernel<'a> {
    pub fn new(frame: SemiPlanarFrame<'a>) -> Self {
        Self { frame }
    }
}

impl PixelKernel for Nv12Kernel<'_> {
    #[inline(always)]
    fn convert(&self, x: usize, y: usize) -> Rgba {
        let luma = self.frame.luma(x, y);
        let (u, v) = self.frame.chroma_pair(x, y);

        yuv_to_rgba(luma, u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Frame buffer where every byte holds its own index
    fn indexed_frame(width: usize, height: usize) -> Vec<u8> {
        (0..width * height * 3 / 2).map(|i| i as u8).collect()
    }

    #[test]
    fn chroma_index_matches_whole_buffer_formula() {
        let buf = indexed_frame(4, 2);
        let frame = SemiPlanarFrame::packed(&buf, 4, 2);

        // 8 + (3 & !1) + (1 >> 1) * 4
        assert_eq!(8 + frame.chroma_index(3, 1), 10);

        let buf = indexed_frame(4, 4);
        let frame = SemiPlanarFrame::packed(&buf, 4, 4);

        // 16 + (3 & !1) + (3 >> 1) * 4
        assert_eq!(16 + frame.chroma_index(3, 3), 22);
        assert_eq!(16 + frame.chroma_index(0, 0), 16);
        assert_eq!(16 + frame.chroma_index(1, 1), 16);
        assert_eq!(16 + frame.chroma_index(2, 2), 22);
        assert_eq!(16 + frame.chroma_index(0, 2), 20);
    }

    #[test]
    fn nv21_reads_v_then_u() {
        let mut buf = vec![0u8; 12];
        buf[7] = 120; // luma at (3, 1)
        buf[10] = 200; // V
        buf[11] = 60; // U

        let kernel = Nv21Kernel::new(SemiPlanarFrame::packed(&buf, 4, 2));

        assert_eq!(
            kernel.convert(3, 1),
            yuv_to_rgba_centered(120, 60 - 128, 200 - 128)
        );
    }

    #[test]
    fn nv12_reads_u_then_v() {
        let mut buf = vec![0u8; 12];
        buf[7] = 120;
        buf[10] = 200; // U
        buf[11] = 60; // V

        let kernel = Nv12Kernel::new(SemiPlanarFrame::packed(&buf, 4, 2));

        assert_eq!(kernel.convert(3, 1), yuv_to_rgba(120, 200, 60));
    }

    #[test]
    fn neutral_frames() {
        for (luma, expected) in [(235u8, 255u8), (0, 0)] {
            let mut buf = vec![luma; 4 * 2];
            buf.extend([128u8; 4]);

            let frame = SemiPlanarFrame::packed(&buf, 4, 2);

            for y in 0..2 {
                for x in 0..4 {
                    let want = Rgba::opaque(expected, expected, expected);

                    assert_eq!(Nv21Kernel::new(frame).convert(x, y), want);
                    assert_eq!(Nv12Kernel::new(frame).convert(x, y), want);
                }
            }
        }
    }

    #[test]
    fn padded_strides() {
        // 2x2 frame stored with 4 byte strides, padding filled with garbage
        let luma = [10, 20, 0xFF, 0xFF, 30, 40, 0xFF, 0xFF];
        let chroma = [90, 170, 0xFF, 0xFF];

        let frame = SemiPlanarFrame::from_planes([(&luma[..], 4), (&chroma[..], 4)]);
        let kernel = Nv12Kernel::new(frame);

        assert_eq!(kernel.convert(1, 1), yuv_to_rgba(40, 90, 170));
        assert_eq!(kernel.convert(0, 1), yuv_to_rgba(30, 90, 170));
    }

    proptest! {
        #[test]
        fn odd_columns_share_chroma_with_even_neighbour(
            half_width in 1usize..16,
            half_height in 1usize..16,
            seed in any::<u8>(),
        ) {
            let width = half_width * 2;
            let height = half_height * 2;

            let buf: Vec<u8> = (0..width * height * 3 / 2)
                .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
                .collect();

            let frame = SemiPlanarFrame::packed(&buf, width, height);

            for y in 0..height {
                for x in (0..width).step_by(2) {
                    prop_assert_eq!(frame.chroma_pair(x, y), frame.chroma_pair(x + 1, y));
                    prop_assert_eq!(frame.chroma_pair(x, y), frame.chroma_pair(x, y & !1));
                }
            }
        }

        #[test]
        fn semi_planar_alpha_is_opaque(luma: u8, first: u8, second: u8) {
            let buf = [luma, luma, luma, luma, first, second];
            let frame = SemiPlanarFrame::packed(&buf, 2, 2);

            prop_assert_eq!(Nv21Kernel::new(frame).convert(1, 1).a, 255);
            prop_assert_eq!(Nv12Kernel::new(frame).convert(1, 1).a, 255);
        }

        #[test]
        fn swapped_chroma_gives_same_color(luma: u8, u: u8, v: u8) {
            let nv21 = [luma, luma, luma, luma, v, u];
            let nv12 = [luma, luma, luma, luma, u, v];

            prop_assert_eq!(
                Nv21Kernel::new(SemiPlanarFrame::packed(&nv21, 2, 2)).convert(0, 0),
                Nv12Kernel::new(SemiPlanarFrame::packed(&nv12, 2, 2)).convert(0, 0)
            );
        }
    }
}
