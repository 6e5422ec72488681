use crate::dispatch::{convert_band, convert_frame};
use crate::kernels::FrameKernel;
use crate::{ConvertError, Converter, ImageMut, ImageRef, verify_input};
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

/// Same as [`convert`](crate::convert), but converts bands of output rows in parallel
///
/// Every pixel is still computed by the same kernel, only the order in which coordinates are
/// visited differs, so the output is identical to the single threaded conversion.
#[inline(never)]
pub fn convert_multi_thread(
    converter: Converter,
    src: &dyn ImageRef,
    dst: &mut dyn ImageMut,
) -> Result<(), ConvertError> {
    let (width, height) = verify_input(converter, src, &*dst)?;

    let kernel = FrameKernel::bind(converter, src)?;
    let (rgba, stride) = crate::rgba_plane_mut(dst)?;

    let threads = num_cpus::get();

    if threads == 1 || height == 1 {
        convert_frame(&kernel, width, height, rgba, stride);
        return Ok(());
    }

    let rows_per_band = height.div_ceil(threads);
    let bands = height.div_ceil(rows_per_band);

    tracing::trace!(threads, bands, rows_per_band, "splitting frame into bands");

    rgba.par_chunks_mut(stride * rows_per_band)
        .take(bands)
        .enumerate()
        .for_each(|(i, band)| {
            let first_row = i * rows_per_band;
            let rows = rows_per_band.min(height - first_row);

            convert_band(&kernel, width, first_row, rows, band, stride);
        });

    Ok(())
}
