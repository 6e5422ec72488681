use crate::PixelKernel;

/// Run `kernel` for every pixel of a band of output rows
///
/// `band` starts at output row `first_row` and holds `rows` rows of `stride` bytes, the last row
/// may be cut short after its `width * 4` pixel bytes.
#[inline(always)]
pub(crate) fn convert_band<K: PixelKernel + ?Sized>(
    kernel: &K,
    width: usize,
    first_row: usize,
    rows: usize,
    band: &mut [u8],
    stride: usize,
) {
    for (i, row) in band.chunks_mut(stride).take(rows).enumerate() {
        let y = first_row + i;

        for (x, px) in row[..width * 4].chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&kernel.convert(x, y).to_bytes());
        }
    }
}

/// Run `kernel` for every coordinate of a `width` x `height` frame on the calling thread
pub(crate) fn convert_frame<K: PixelKernel + ?Sized>(
    kernel: &K,
    width: usize,
    height: usize,
    rgba: &mut [u8],
    stride: usize,
) {
    convert_band(kernel, width, 0, height, rgba, stride);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgba;

    /// Encodes the coordinate into the pixel
    struct CoordKernel;

    impl PixelKernel for CoordKernel {
        fn convert(&self, x: usize, y: usize) -> Rgba {
            Rgba::new(x as u8, y as u8, 0, 255)
        }
    }

    #[test]
    fn every_pixel_written_once_at_its_coordinate() {
        let (width, height, stride) = (3, 2, 16);
        let mut rgba = vec![0xAAu8; stride * height];

        convert_frame(&CoordKernel, width, height, &mut rgba, stride);

        for y in 0..height {
            for x in 0..width {
                let offset = y * stride + x * 4;
                assert_eq!(&rgba[offset..offset + 4], &[x as u8, y as u8, 0, 255]);
            }

            // Row padding is left untouched
            assert!(rgba[y * stride + width * 4..(y + 1) * stride].iter().all(|b| *b == 0xAA));
        }
    }

    #[test]
    fn band_offsets_rows() {
        let mut band = vec![0u8; 2 * 4];

        convert_band(&CoordKernel, 2, 5, 1, &mut band, 8);

        assert_eq!(&band[..8], &[0, 5, 0, 255, 1, 5, 0, 255]);
    }
}
