//! Score fusion across the emoji, image and text modalities, the
//! soft-negation smoother, and the emoji-weight sweep.

pub mod error;
pub mod fuse;
pub mod smooth;
pub mod sweep;

pub use {
    error::{Error, FusionError, Result},
    fuse::{fuse, fuse_one},
    smooth::{Smoothed, smooth, smooth_detailed},
    sweep::{SweepReport, SweepSample, WeightAccuracy, default_grid, sweep_weights, weight_grid},
};
