// Copyright 2026 the Twirl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of transform-list text.
//!
//! Two grammars are understood. The *canonical* grammar is the fixed
//! clause order this crate itself writes (see
//! [`CanonicalTransform`]); it is recognized by a strict single-pass
//! parser with no backtracking. The *generic* grammar covers arbitrary
//! transform lists (`matrix`, `translate`, `rotate`, `scale`, `skew`
//! and their axis variants), which are composed into a single
//! [`Affine`] for decomposition.

use core::f64::consts::PI;

use smallvec::SmallVec;

use crate::{Affine, CanonicalTransform};

/// Parse a generic transform list into a single affine matrix.
///
/// Operation names are ASCII case-insensitive; arguments are separated
/// by commas and/or whitespace. Operations compose left-to-right as
/// written, so the rightmost operation applies to a point first.
///
/// Lengths accept no unit or `px`; angles accept no unit (degrees),
/// `deg`, `rad`, `grad`, or `turn`; scale factors and the linear part
/// of `matrix` must be unitless. Any other unit, an unknown operation
/// name, or a malformed argument list yields `None` — units that
/// require external metrics (percentages, `em`, …) are unsupported by
/// design.
///
/// Empty input and the sentinel `none` denote the identity.
pub fn parse_transform_list(text: &str) -> Option<Affine> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("none") {
        return Some(Affine::IDENTITY);
    }
    let mut lexer = Lexer::new(text);
    let mut result = Affine::IDENTITY;
    loop {
        lexer.skip_ws();
        if lexer.done() {
            break;
        }
        let op = lexer.ident()?;
        lexer.skip_ws();
        if !lexer.eat("(") {
            return None;
        }
        let mut args: SmallVec<[(f64, Unit); 6]> = SmallVec::new();
        loop {
            lexer.skip_ws();
            if lexer.eat(")") {
                break;
            }
            if !args.is_empty() && lexer.eat(",") {
                lexer.skip_ws();
            }
            if args.len() == 6 {
                return None;
            }
            let n = lexer.number()?;
            args.push((n, lexer.unit()));
        }
        result *= apply_op(&op, &args)?;
    }
    Some(result)
}

fn apply_op(op: &str, args: &[(f64, Unit)]) -> Option<Affine> {
    match op {
        "matrix" => {
            if args.len() != 6 {
                return None;
            }
            Some(Affine::new([
                scalar(args[0])?,
                scalar(args[1])?,
                scalar(args[2])?,
                scalar(args[3])?,
                length(args[4])?,
                length(args[5])?,
            ]))
        }
        "translate" | "translatex" | "translatey" => {
            let (mut tx, mut ty) = (0.0, 0.0);
            match (op, args) {
                ("translate", [x]) => tx = length(*x)?,
                ("translate", [x, y]) => {
                    tx = length(*x)?;
                    ty = length(*y)?;
                }
                ("translatex", [x]) => tx = length(*x)?,
                ("translatey", [y]) => ty = length(*y)?,
                _ => return None,
            }
            Some(Affine::translate((tx, ty)))
        }
        "rotate" => {
            let [a] = args else { return None };
            Some(Affine::rotate(angle(*a)?))
        }
        "scale" | "scalex" | "scaley" => {
            let (mut sx, mut sy) = (1.0, 1.0);
            match (op, args) {
                ("scale", [s]) => {
                    sx = scalar(*s)?;
                    sy = sx;
                }
                ("scale", [x, y]) => {
                    sx = scalar(*x)?;
                    sy = scalar(*y)?;
                }
                ("scalex", [x]) => sx = scalar(*x)?,
                ("scaley", [y]) => sy = scalar(*y)?,
                _ => return None,
            }
            Some(Affine::scale_non_uniform(sx, sy))
        }
        "skew" | "skewx" | "skewy" => {
            let (mut kx, mut ky) = (0.0, 0.0);
            match (op, args) {
                ("skew", [x]) => kx = angle(*x)?.tan(),
                ("skew", [x, y]) => {
                    kx = angle(*x)?.tan();
                    ky = angle(*y)?.tan();
                }
                ("skewx", [x]) => kx = angle(*x)?.tan(),
                ("skewy", [y]) => ky = angle(*y)?.tan(),
                _ => return None,
            }
            Some(Affine::skew(kx, ky))
        }
        _ => None,
    }
}

/// Parse the canonical clause order
/// `translate(tx, ty)? rotate(rot)? scale(sx, sy?)? rotate(twist)?`.
///
/// Clause names are lowercase, each clause optional but fixed in
/// position; out-of-order or unrecognized text is a failure, not a
/// fallback. `none` and blank input are the identity.
pub(crate) fn parse_canonical(text: &str) -> Option<CanonicalTransform> {
    let text = text.trim();
    if text.is_empty() || text == "none" {
        return Some(CanonicalTransform::IDENTITY);
    }
    let mut lexer = Lexer::new(text);
    let mut ts = CanonicalTransform::IDENTITY;
    if lexer.eat("translate(") {
        ts.tx = lexer.number()?;
        lexer.eat("px");
        if !lexer.eat(",") {
            return None;
        }
        lexer.skip_ws();
        ts.ty = lexer.number()?;
        lexer.eat("px");
        if !lexer.eat(")") {
            return None;
        }
        lexer.skip_ws();
    }
    if lexer.eat("rotate(") {
        ts.rot = lexer.number()?;
        lexer.eat("deg");
        if !lexer.eat(")") {
            return None;
        }
        lexer.skip_ws();
    }
    if lexer.eat("scale(") {
        ts.sx = lexer.number()?;
        if lexer.eat(",") {
            lexer.skip_ws();
            ts.sy = lexer.number()?;
        } else {
            ts.sy = ts.sx;
        }
        if !lexer.eat(")") {
            return None;
        }
        lexer.skip_ws();
    }
    if lexer.eat("rotate(") {
        ts.twist = lexer.number()?;
        lexer.eat("deg");
        if !lexer.eat(")") {
            return None;
        }
        lexer.skip_ws();
    }
    if !lexer.done() {
        return None;
    }
    Some(ts)
}

/// Unit suffix on a numeric argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unit {
    /// No suffix.
    Bare,
    Px,
    Deg,
    Rad,
    Grad,
    Turn,
    /// Anything else; rejected wherever it appears.
    Other,
}

fn length((n, unit): (f64, Unit)) -> Option<f64> {
    match unit {
        Unit::Bare | Unit::Px => Some(n),
        _ => None,
    }
}

fn scalar((n, unit): (f64, Unit)) -> Option<f64> {
    match unit {
        Unit::Bare => Some(n),
        _ => None,
    }
}

/// Angle in radians. A bare number is taken as degrees.
fn angle((n, unit): (f64, Unit)) -> Option<f64> {
    match unit {
        Unit::Bare | Unit::Deg => Some(n.to_radians()),
        Unit::Rad => Some(n),
        Unit::Grad => Some(n * PI / 200.0),
        Unit::Turn => Some(n * 2.0 * PI),
        _ => None,
    }
}

struct Lexer<'a> {
    data: &'a str,
    ix: usize,
}

impl<'a> Lexer<'a> {
    fn new(data: &'a str) -> Lexer<'a> {
        Lexer { data, ix: 0 }
    }

    fn done(&self) -> bool {
        self.ix == self.data.len()
    }

    fn skip_ws(&mut self) {
        while let Some(&c) = self.data.as_bytes().get(self.ix) {
            if !c.is_ascii_whitespace() {
                break;
            }
            self.ix += 1;
        }
    }

    /// Consume `lit` if the input continues with it.
    fn eat(&mut self, lit: &str) -> bool {
        if self.data[self.ix..].starts_with(lit) {
            self.ix += lit.len();
            true
        } else {
            false
        }
    }

    /// Consume a run of ASCII letters, lowercased.
    fn ident(&mut self) -> Option<String> {
        let start = self.ix;
        while let Some(&c) = self.data.as_bytes().get(self.ix) {
            if !c.is_ascii_alphabetic() {
                break;
            }
            self.ix += 1;
        }
        if self.ix == start {
            return None;
        }
        Some(self.data[start..self.ix].to_ascii_lowercase())
    }

    /// Consume a number token. The token charset intentionally includes
    /// `e` so exponent notation round-trips, even though CSS proper
    /// rejects it; some hosts emit it anyway.
    fn number(&mut self) -> Option<f64> {
        let start = self.ix;
        while let Some(&c) = self.data.as_bytes().get(self.ix) {
            if !(c.is_ascii_digit() || matches!(c, b'+' | b'-' | b'.' | b'e' | b'E')) {
                break;
            }
            self.ix += 1;
        }
        self.data[start..self.ix].parse().ok()
    }

    /// Consume a unit suffix, if any.
    fn unit(&mut self) -> Unit {
        let start = self.ix;
        while let Some(&c) = self.data.as_bytes().get(self.ix) {
            if !(c.is_ascii_alphabetic() || c == b'%') {
                break;
            }
            self.ix += 1;
        }
        match self.data[start..self.ix].to_ascii_lowercase().as_str() {
            "" => Unit::Bare,
            "px" => Unit::Px,
            "deg" => Unit::Deg,
            "rad" => Unit::Rad,
            "grad" => Unit::Grad,
            "turn" => Unit::Turn,
            _ => Unit::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_canonical, parse_transform_list};
    use crate::{Affine, Point};

    fn assert_affine_near(a: Affine, b: Affine) {
        let (ca, cb) = (a.as_coeffs(), b.as_coeffs());
        for i in 0..6 {
            assert!((ca[i] - cb[i]).abs() < 1e-12, "{ca:?} != {cb:?}");
        }
    }

    #[test]
    fn generic_single_ops() {
        assert_affine_near(
            parse_transform_list("translate(10px, 20px)").unwrap(),
            Affine::translate((10., 20.)),
        );
        assert_affine_near(
            parse_transform_list("translateY(5)").unwrap(),
            Affine::translate((0., 5.)),
        );
        assert_affine_near(
            parse_transform_list("rotate(90deg)").unwrap(),
            Affine::rotate_deg(90.),
        );
        assert_affine_near(
            parse_transform_list("rotate(0.5rad)").unwrap(),
            Affine::rotate(0.5),
        );
        assert_affine_near(
            parse_transform_list("rotate(0.25turn)").unwrap(),
            Affine::rotate_deg(90.),
        );
        assert_affine_near(
            parse_transform_list("scale(2, 3)").unwrap(),
            Affine::scale_non_uniform(2., 3.),
        );
        assert_affine_near(
            parse_transform_list("SCALE(2)").unwrap(),
            Affine::scale(2.),
        );
        assert_affine_near(
            parse_transform_list("skewX(45deg)").unwrap(),
            Affine::skew(1., 0.),
        );
        assert_affine_near(
            parse_transform_list("matrix(1, 2, 3, 4, 5, 6)").unwrap(),
            Affine::new([1., 2., 3., 4., 5., 6.]),
        );
    }

    #[test]
    fn generic_composition_order() {
        // The rightmost op applies to the point first.
        let a = parse_transform_list("translate(10px, 0) scale(2)").unwrap();
        let p = a * Point::new(1., 1.);
        assert!((p.x - 12.).abs() < 1e-12 && (p.y - 2.).abs() < 1e-12, "{p:?}");
    }

    #[test]
    fn generic_rejects() {
        // Unsupported units are hard failures, not approximations.
        assert_eq!(parse_transform_list("translate(50%, 0)"), None);
        assert_eq!(parse_transform_list("translate(2em, 0)"), None);
        assert_eq!(parse_transform_list("scale(2px)"), None);
        // Unknown op.
        assert_eq!(parse_transform_list("perspective(100px)"), None);
        // Arity errors.
        assert_eq!(parse_transform_list("rotate(1, 2)"), None);
        assert_eq!(parse_transform_list("matrix(1, 2, 3)"), None);
        // Trailing junk.
        assert_eq!(parse_transform_list("scale(2) garbage"), None);
    }

    #[test]
    fn generic_identity_sentinels() {
        assert_eq!(parse_transform_list(""), Some(Affine::IDENTITY));
        assert_eq!(parse_transform_list("  "), Some(Affine::IDENTITY));
        assert_eq!(parse_transform_list("none"), Some(Affine::IDENTITY));
    }

    #[test]
    fn canonical_full_form() {
        let ts = parse_canonical("translate(3px, -4px) rotate(30deg) scale(2, 0.5) rotate(5deg)")
            .unwrap();
        assert_eq!(ts.tx, 3.);
        assert_eq!(ts.ty, -4.);
        assert_eq!(ts.rot, 30.);
        assert_eq!(ts.sx, 2.);
        assert_eq!(ts.sy, 0.5);
        assert_eq!(ts.twist, 5.);
    }

    #[test]
    fn canonical_partial_clauses() {
        let ts = parse_canonical("rotate(45deg)").unwrap();
        assert_eq!((ts.rot, ts.twist), (45., 0.));

        // A second rotate clause is the twist, even with no scale between.
        let ts = parse_canonical("rotate(0deg) rotate(30deg)").unwrap();
        assert_eq!((ts.rot, ts.twist), (0., 30.));

        let ts = parse_canonical("scale(3)").unwrap();
        assert_eq!((ts.sx, ts.sy), (3., 3.));

        assert_eq!(
            parse_canonical("none"),
            Some(crate::CanonicalTransform::IDENTITY)
        );
        assert_eq!(
            parse_canonical(""),
            Some(crate::CanonicalTransform::IDENTITY)
        );
    }

    #[test]
    fn canonical_rejects_out_of_order() {
        // Clause order is fixed; scale before rotate is not canonical.
        assert_eq!(parse_canonical("scale(2) translate(1px, 2px)"), None);
        // Three rotates cannot happen.
        assert_eq!(
            parse_canonical("rotate(1deg) rotate(2deg) rotate(3deg)"),
            None
        );
        // Not the canonical grammar at all; callers fall back to the
        // generic parser explicitly.
        assert_eq!(parse_canonical("matrix(1, 0, 0, 1, 0, 0)"), None);
        assert_eq!(parse_canonical("translate(1px)"), None);
    }

    #[test]
    fn canonical_accepts_exponents() {
        let ts = parse_canonical("translate(1e-7px, 2E+2px)").unwrap();
        assert_eq!(ts.tx, 1e-7);
        assert_eq!(ts.ty, 200.);
    }
}
