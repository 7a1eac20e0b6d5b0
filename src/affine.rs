// Copyright 2026 the Twirl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine transforms.

use core::ops::{Mul, MulAssign};

use crate::common::EPSILON;
use crate::{Point, Vec2};

/// A 2D affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Affine = Affine::scale(1.0);

    /// Construct an affine transform from coefficients.
    ///
    /// If the coefficients are `(a, b, c, d, e, f)`, then the resulting
    /// transformation represents this augmented matrix:
    ///
    /// ```text
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    /// ```
    ///
    /// The linear part is column-major, and `(A * B) * p == A * (B * p)`,
    /// where `*` is the [`Mul`] trait.
    #[inline(always)]
    pub const fn new(c: [f64; 6]) -> Affine {
        Affine(c)
    }

    /// An affine transform representing uniform scaling.
    #[inline(always)]
    pub const fn scale(s: f64) -> Affine {
        Affine([s, 0.0, 0.0, s, 0.0, 0.0])
    }

    /// An affine transform representing non-uniform scaling
    /// with different scale values for x and y.
    #[inline(always)]
    pub const fn scale_non_uniform(s_x: f64, s_y: f64) -> Affine {
        Affine([s_x, 0.0, 0.0, s_y, 0.0, 0.0])
    }

    /// An affine transform representing rotation.
    ///
    /// The convention for rotation is that a positive angle rotates a
    /// positive X direction into positive Y. Thus, in a Y-down coordinate
    /// system (as is common for graphics), it is a clockwise rotation, and
    /// in Y-up (traditional for math), it is anti-clockwise.
    ///
    /// The angle, `th`, is expressed in radians.
    #[inline]
    pub fn rotate(th: f64) -> Affine {
        let (s, c) = th.sin_cos();
        Affine([c, s, -s, c, 0.0, 0.0])
    }

    /// An affine transform representing rotation, with the angle in degrees.
    ///
    /// See [`Affine::rotate`] for the sign convention.
    #[inline]
    pub fn rotate_deg(deg: f64) -> Affine {
        Affine::rotate(deg.to_radians())
    }

    /// An affine transform representing translation.
    #[inline(always)]
    pub fn translate<V: Into<Vec2>>(p: V) -> Affine {
        let p = p.into();
        Affine([1.0, 0.0, 0.0, 1.0, p.x, p.y])
    }

    /// An affine transformation representing a skew.
    ///
    /// The `skew_x` and `skew_y` parameters represent skew factors for the
    /// horizontal and vertical directions, respectively.
    #[inline(always)]
    pub fn skew(skew_x: f64, skew_y: f64) -> Affine {
        Affine([1.0, skew_y, skew_x, 1.0, 0.0, 0.0])
    }

    /// Get the coefficients of the transform.
    #[inline(always)]
    pub fn as_coeffs(self) -> [f64; 6] {
        self.0
    }

    /// Compute the determinant of the linear part of this transform.
    #[inline]
    pub fn determinant(self) -> f64 {
        self.0[0] * self.0[3] - self.0[1] * self.0[2]
    }

    /// Returns the translation part of this affine map.
    #[inline(always)]
    pub fn translation(self) -> Vec2 {
        Vec2 {
            x: self.0[4],
            y: self.0[5],
        }
    }

    /// Replaces the translation portion of this affine map.
    ///
    /// The translation can be seen as being applied after the linear part
    /// of the map.
    #[must_use]
    #[inline(always)]
    pub fn with_translation(mut self, trans: Vec2) -> Affine {
        self.0[4] = trans.x;
        self.0[5] = trans.y;
        self
    }

    /// `self` followed by a translation of `trans`.
    #[inline]
    #[must_use]
    pub fn then_translate(mut self, trans: Vec2) -> Affine {
        self.0[4] += trans.x;
        self.0[5] += trans.y;
        self
    }

    /// Does the linear part of this transform deviate from the identity by
    /// less than [`EPSILON`] in every coefficient?
    ///
    /// A chain of ancestor transforms is usually all identities; this test
    /// lets composition skip the factors that contribute no distortion.
    #[inline]
    pub fn is_near_identity(self) -> bool {
        (1.0 - self.0[0]).abs() <= EPSILON
            && self.0[1].abs() <= EPSILON
            && self.0[2].abs() <= EPSILON
            && (1.0 - self.0[3]).abs() <= EPSILON
    }

    /// Compose the linear parts of a chain of transforms, innermost first.
    ///
    /// Each successive factor is applied outside the accumulated product,
    /// matching a walk from an element up through its ancestors. Factors
    /// whose linear part is nearly the identity are skipped, and
    /// translations are discarded: the result maps directions, not
    /// positions, and always has zero translation.
    pub fn product<I: IntoIterator<Item = Affine>>(chain: I) -> Affine {
        let mut result = Affine::IDENTITY;
        for a in chain {
            if !a.is_near_identity() {
                result = a.with_translation(Vec2::ZERO) * result;
            }
        }
        result
    }

    /// Is this map [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Is any coefficient of this map [NaN]?
    ///
    /// [NaN]: f64::is_nan
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.0.iter().any(|c| c.is_nan())
    }
}

impl Default for Affine {
    #[inline(always)]
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Mul<Point> for Affine {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Point {
        Point::new(
            self.0[0] * other.x + self.0[2] * other.y + self.0[4],
            self.0[1] * other.x + self.0[3] * other.y + self.0[5],
        )
    }
}

/// Applies only the linear part of the map; vectors represent directions
/// and displacements, which translation does not affect.
impl Mul<Vec2> for Affine {
    type Output = Vec2;

    #[inline]
    fn mul(self, other: Vec2) -> Vec2 {
        Vec2::new(
            self.0[0] * other.x + self.0[2] * other.y,
            self.0[1] * other.x + self.0[3] * other.y,
        )
    }
}

impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, other: Affine) -> Affine {
        Affine([
            self.0[0] * other.0[0] + self.0[2] * other.0[1],
            self.0[1] * other.0[0] + self.0[3] * other.0[1],
            self.0[0] * other.0[2] + self.0[2] * other.0[3],
            self.0[1] * other.0[2] + self.0[3] * other.0[3],
            self.0[0] * other.0[4] + self.0[2] * other.0[5] + self.0[4],
            self.0[1] * other.0[4] + self.0[3] * other.0[5] + self.0[5],
        ])
    }
}

impl MulAssign for Affine {
    #[inline]
    fn mul_assign(&mut self, other: Affine) {
        *self = self.mul(other);
    }
}

#[cfg(test)]
mod tests {
    use super::{Affine, Point, Vec2};
    use std::f64::consts::PI;

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    #[test]
    fn affine_basic() {
        let p = Point::new(3.0, 4.0);

        assert_near(Affine::default() * p, p);
        assert_near(Affine::scale(2.0) * p, Point::new(6.0, 8.0));
        assert_near(Affine::rotate(0.0) * p, p);
        assert_near(Affine::rotate(PI / 2.0) * p, Point::new(-4.0, 3.0));
        assert_near(Affine::rotate_deg(90.0) * p, Point::new(-4.0, 3.0));
        assert_near(Affine::translate((5.0, 6.0)) * p, Point::new(8.0, 10.0));
        assert_near(Affine::skew(0.0, 0.0) * p, p);
        assert_near(Affine::skew(2.0, 4.0) * p, Point::new(11.0, 16.0));
    }

    #[test]
    fn affine_mul() {
        let a1 = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let a2 = Affine::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);

        let px = Point::new(1.0, 0.0);
        let py = Point::new(0.0, 1.0);
        let pxy = Point::new(1.0, 1.0);
        assert_near(a1 * (a2 * px), (a1 * a2) * px);
        assert_near(a1 * (a2 * py), (a1 * a2) * py);
        assert_near(a1 * (a2 * pxy), (a1 * a2) * pxy);
    }

    #[test]
    fn vec_mul_ignores_translation() {
        let a = Affine::rotate(PI / 2.0).then_translate(Vec2::new(100.0, 100.0));
        let v = a * Vec2::new(1.0, 0.0);
        assert!((v.x - 0.0).abs() < 1e-12 && (v.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn near_identity() {
        assert!(Affine::IDENTITY.is_near_identity());
        // Translation plays no part in the test.
        assert!(Affine::translate((100.0, -3.0)).is_near_identity());
        assert!(Affine::new([1.0 + 5e-13, 0.0, -5e-13, 1.0, 0.0, 0.0]).is_near_identity());
        assert!(!Affine::scale(1.001).is_near_identity());
        assert!(!Affine::rotate(1e-6).is_near_identity());
    }

    #[test]
    fn chain_product() {
        let child = Affine::rotate(0.3);
        let parent = Affine::translate((50.0, 60.0)); // near-identity linear
        let grandparent = Affine::scale(2.0);
        let total = Affine::product([child, parent, grandparent]);
        let expect = Affine::scale(2.0) * Affine::rotate(0.3);
        let (t, e) = (total.as_coeffs(), expect.as_coeffs());
        for i in 0..6 {
            assert!((t[i] - e[i]).abs() < 1e-12, "{t:?} != {e:?}");
        }
        assert_eq!(total.translation(), Vec2::ZERO);
    }
}
