// Copyright 2026 the Twirl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Epsilon conventions and angle utilities shared across the crate.

use core::f64::consts::PI;

/// Absolute threshold below which a deviation is treated as zero.
///
/// Every near-zero and near-one comparison in this crate uses this same
/// threshold, so that a value read back immediately after being written
/// compares equal to itself (read-after-write idempotence). Changing it
/// changes rounding behavior at degenerate inputs such as pure rotations
/// and pure scales.
pub const EPSILON: f64 = 1e-12;

/// Is `x` distinguishable from zero at [`EPSILON`] resolution?
#[inline]
pub fn nonzero(x: f64) -> bool {
    x.abs() > EPSILON
}

/// Fold an angle in degrees into the half-open range (-180, 180].
#[inline]
pub fn normalize_degrees(d: f64) -> f64 {
    if d.abs() <= 180.0 {
        if d == -180.0 {
            return 180.0;
        }
        return d;
    }
    let mut d = d % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Fold an angle in radians into the half-open range (-π, π].
#[inline]
pub(crate) fn normalize_radians(r: f64) -> f64 {
    let mut r = r;
    if r > PI {
        r -= 2.0 * PI;
    } else if r <= -PI {
        r += 2.0 * PI;
    }
    r
}

/// Radians to degrees, folded into (-180, 180].
#[inline]
pub(crate) fn to_degrees_normalized(r: f64) -> f64 {
    normalize_degrees(r.to_degrees())
}
