// Copyright 2026 the Twirl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The canonical translate/rotate/scale/twist transform form.

use core::fmt;
use core::fmt::Write;

use arrayvec::ArrayVec;

use crate::common::{nonzero, to_degrees_normalized};
use crate::parse::{parse_canonical, parse_transform_list};
use crate::Affine;

/// An affine transform in the canonical operation order
/// `translate(tx, ty) · rotate(rot) · scale(sx, sy) · rotate(twist)`.
///
/// Any affine matrix can be brought into this form by
/// [decomposition](Affine::decompose); conversely, composing the four
/// operations reproduces the source matrix to within 1e-12 relative
/// error. Writing transforms in this fixed order makes them cheap to
/// read back: a strict parser recovers the components without any
/// matrix math.
///
/// Angles are degrees in (-180, 180]. Decomposition additionally keeps
/// `twist` in [-45, 45] and `sx + sy >= 0`. A mirrored transform shows
/// up as exactly one negative scale factor, usually `sy`; the sign
/// moves to `sx` when bringing the twist into range swaps the axes.
/// See [`Svd`](crate::Svd) for the details.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalTransform {
    /// Horizontal translation, in pixels.
    pub tx: f64,
    /// Vertical translation, in pixels.
    pub ty: f64,
    /// Primary rotation, in degrees.
    pub rot: f64,
    /// Scale factor along the (rotated) x axis.
    pub sx: f64,
    /// Scale factor along the (rotated) y axis; usually the one that
    /// goes negative for mirrored transforms.
    pub sy: f64,
    /// Pre-scale twist rotation, in degrees; nonzero only for transforms
    /// with skew.
    pub twist: f64,
}

impl CanonicalTransform {
    /// The identity transform.
    pub const IDENTITY: CanonicalTransform = CanonicalTransform {
        tx: 0.0,
        ty: 0.0,
        rot: 0.0,
        sx: 1.0,
        sy: 1.0,
        twist: 0.0,
    };

    /// Decompose an arbitrary affine transform into canonical components.
    pub fn from_affine(a: Affine) -> CanonicalTransform {
        let t = a.translation();
        let d = a.decompose();
        CanonicalTransform {
            tx: t.x,
            ty: t.y,
            rot: to_degrees_normalized(d.theta),
            sx: d.sv1,
            sy: d.sv2,
            twist: d.phi.to_degrees(),
        }
    }

    /// Compose the components back into an affine matrix.
    pub fn to_affine(&self) -> Affine {
        Affine::translate((self.tx, self.ty))
            * Affine::rotate_deg(self.rot)
            * Affine::scale_non_uniform(self.sx, self.sy)
            * Affine::rotate_deg(self.twist)
    }

    /// Parse canonical-form text.
    ///
    /// Only the fixed clause order `translate(tx, ty)? rotate(rot)?
    /// scale(sx, sy?)? rotate(twist)?` is recognized; blank input and
    /// `none` are the identity. Anything else yields `None` — use
    /// [`decode`](Self::decode) to also accept arbitrary transform
    /// lists.
    #[inline]
    pub fn parse(text: &str) -> Option<CanonicalTransform> {
        parse_canonical(text)
    }

    /// Interpret any transform-list text as a canonical transform.
    ///
    /// Canonical-form input is read back directly; anything else is
    /// parsed as a generic transform list, composed into one matrix,
    /// and decomposed. Text that fits neither grammar (or uses an
    /// unsupported unit) yields `None`.
    pub fn decode(text: &str) -> Option<CanonicalTransform> {
        parse_canonical(text)
            .or_else(|| parse_transform_list(text).map(CanonicalTransform::from_affine))
    }

    /// Is every component the identity for its clause, at epsilon
    /// resolution?
    pub fn is_identity(&self) -> bool {
        !nonzero(self.tx)
            && !nonzero(self.ty)
            && !nonzero(self.rot)
            && !nonzero(1.0 - self.sx)
            && !nonzero(1.0 - self.sy)
            && !nonzero(self.twist)
    }
}

impl Default for CanonicalTransform {
    #[inline]
    fn default() -> CanonicalTransform {
        CanonicalTransform::IDENTITY
    }
}

/// Format a number so it can be read back.
///
/// Hosts that emit exponent notation do not necessarily accept it on
/// read-back, so anything that formats with an exponent is rewritten as
/// fixed-point with 17 fractional digits.
pub(crate) fn css_num(n: f64) -> String {
    let r = format!("{n}");
    if r.contains('e') || r.contains('E') {
        format!("{n:.17}")
    } else {
        r
    }
}

/// Writes the canonical text form, omitting identity clauses; the
/// whole identity is the sentinel `none`.
impl fmt::Display for CanonicalTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses: ArrayVec<String, 4> = ArrayVec::new();
        if nonzero(self.tx) || nonzero(self.ty) {
            clauses.push(format!(
                "translate({}px, {}px)",
                css_num(self.tx),
                css_num(self.ty)
            ));
        }
        // The leading rotate is written whenever the twist is nonzero,
        // even at zero degrees: a lone trailing rotate would read back
        // as the primary rotation.
        if nonzero(self.rot) || nonzero(self.twist) {
            clauses.push(format!("rotate({}deg)", css_num(self.rot)));
        }
        if nonzero(1.0 - self.sx) || nonzero(1.0 - self.sy) {
            if nonzero(self.sx - self.sy) {
                clauses.push(format!("scale({}, {})", css_num(self.sx), css_num(self.sy)));
            } else {
                clauses.push(format!("scale({})", css_num(self.sx)));
            }
        }
        if nonzero(self.twist) {
            clauses.push(format!("rotate({}deg)", css_num(self.twist)));
        }
        if clauses.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for clause in &clauses {
            if !first {
                f.write_char(' ')?;
            }
            f.write_str(clause)?;
            first = false;
        }
        Ok(())
    }
}
