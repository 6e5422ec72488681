/// Description of a plane, used for bounds checks, stride calculation and buffer sizes
///
/// Not used by the kernels themselves, only by the frame level utility functions.
#[derive(Clone, Copy)]
pub(crate) struct PlaneDesc {
    pub(crate) width_op: Op,
    pub(crate) height_op: Op,

    /// Bytes per sample, 2 for interleaved chroma pairs, 4 for RGBA
    pub(crate) bytes_per_sample: usize,
}

impl PlaneDesc {
    pub(crate) fn packed_stride(&self, width: usize) -> usize {
        self.width_op.op(width) * self.bytes_per_sample
    }
}

/// Plane's number of samples in relation to width / height
#[derive(Clone, Copy)]
pub(crate) enum Op {
    /// Halve, rounding up so odd dimensions keep their last chroma sample
    DivCeil(usize),
    Identity,
}

impl Op {
    pub(crate) fn op(self, lhs: usize) -> usize {
        match self {
            Op::DivCeil(rhs) => lhs.div_ceil(rhs),
            Op::Identity => lhs,
        }
    }
}

/// NV12 and NV21 share their layout, only the order inside a chroma pair differs
pub(crate) const SEMI_PLANAR_420_PLANES: [PlaneDesc; 2] = [
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Identity,
        bytes_per_sample: 1,
    },
    PlaneDesc {
        width_op: Op::DivCeil(2),
        height_op: Op::DivCeil(2),
        bytes_per_sample: 2,
    },
];

pub(crate) const I420_PLANES: [PlaneDesc; 3] = [
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Identity,
        bytes_per_sample: 1,
    },
    PlaneDesc {
        width_op: Op::DivCeil(2),
        height_op: Op::DivCeil(2),
        bytes_per_sample: 1,
    },
    PlaneDesc {
        width_op: Op::DivCeil(2),
        height_op: Op::DivCeil(2),
        bytes_per_sample: 1,
    },
];

pub(crate) const I444_PLANES: [PlaneDesc; 3] = [
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Identity,
        bytes_per_sample: 1,
    },
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Identity,
        bytes_per_sample: 1,
    },
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Identity,
        bytes_per_sample: 1,
    },
];

pub(crate) const RGBA_PLANES: [PlaneDesc; 1] = [PlaneDesc {
    width_op: Op::Identity,
    height_op: Op::Identity,
    bytes_per_sample: 4,
}];
