use super::PixelKernel;
use crate::Rgba;

/// Returns the pixel unchanged
#[inline(always)]
pub fn identity(px: Rgba) -> Rgba {
    px
}

/// Copies RGBA pixels verbatim, alpha included
///
/// Used to verify the dispatch and output wiring without any color math in between.
#[derive(Debug, Clone, Copy)]
pub struct IdentityKernel<'a> {
    rgba: &'a [u8],
    rgba_stride: usize,
}

impl<'a> IdentityKernel<'a> {
    pub fn new(rgba: &'a [u8], rgba_stride: usize) -> Self {
        Self { rgba, rgba_stride }
    }
}

impl PixelKernel for IdentityKernel<'_> {
    #[inline(always)]
    fn convert(&self, x: usize, y: usize) -> Rgba {
        let offset = y * self.rgba_stride + x * 4;

        let px = Rgba::new(
            self.rgba[offset],
            self.rgba[offset + 1],
            self.rgba[offset + 2],
            self.rgba[offset + 3],
        );

        identity(px)
    }
}
