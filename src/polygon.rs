// Copyright 2026 the Twirl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Convex polygons and hit-testing predicates.

use smallvec::SmallVec;

use crate::canon::css_num;
use crate::{Affine, Point, Rect};

/// Twice the signed area of the triangle (p0, p1, p2).
///
/// Positive for counter-clockwise turns in a y-down coordinate space,
/// which is the orientation [`ConvexPolygon::hull`] produces.
#[inline]
fn signed_area(p0: Point, p1: Point, p2: Point) -> f64 {
    (p2 - p0).cross(p1 - p0)
}

#[inline]
fn sign(n: f64) -> i8 {
    if n > 0.0 {
        1
    } else if n < 0.0 {
        -1
    } else {
        0
    }
}

/// A convex polygon, stored as an ordered cyclic vertex sequence (the
/// last vertex connects back to the first).
///
/// The polygon may be empty or a single point; the hit-testing
/// predicates give these degenerate shapes explicit behavior rather
/// than failing. [`ConvexPolygon::hull`] guarantees counter-clockwise
/// order with no duplicate or collinear boundary vertices; the other
/// constructors trust the caller's ordering.
///
/// Vertices stay inline for polygons of up to 8 points, which covers
/// the common case of a transformed bounding quad.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvexPolygon {
    points: SmallVec<[Point; 8]>,
}

impl ConvexPolygon {
    /// A polygon from vertices already known to be convex and in cyclic
    /// order, such as the corners of a transformed rectangle.
    pub fn from_vertices(points: impl IntoIterator<Item = Point>) -> ConvexPolygon {
        ConvexPolygon {
            points: points.into_iter().collect(),
        }
    }

    /// The corner quad of a rectangle.
    ///
    /// This is the hit-testing footprint used when no explicit hull has
    /// been set.
    pub fn from_rect(rect: Rect) -> ConvexPolygon {
        ConvexPolygon::from_vertices(rect.corners())
    }

    /// The convex hull of a point set, by Andrew's monotone chain.
    ///
    /// Points sort lexicographically by (x, y); the lower and upper
    /// chains keep only strict counter-clockwise turns, so collinear
    /// boundary points are dropped and only extreme points survive.
    /// Non-finite points are skipped, and exact consecutive duplicates
    /// are suppressed. The result is in counter-clockwise order.
    pub fn hull(points: impl IntoIterator<Item = Point>) -> ConvexPolygon {
        let mut pts: Vec<Point> = points.into_iter().filter(|p| p.is_finite()).collect();
        pts.sort_by(|p, q| {
            (p.x, p.y)
                .partial_cmp(&(q.x, q.y))
                .unwrap_or(core::cmp::Ordering::Equal)
        });

        fn keep_left(chain: &mut SmallVec<[Point; 8]>, r: Point) {
            while chain.len() > 1
                && sign(signed_area(chain[chain.len() - 2], chain[chain.len() - 1], r)) != 1
            {
                chain.pop();
            }
            if chain.last() != Some(&r) {
                chain.push(r);
            }
        }

        let mut lower: SmallVec<[Point; 8]> = SmallVec::new();
        for &p in &pts {
            keep_left(&mut lower, p);
        }
        let mut upper: SmallVec<[Point; 8]> = SmallVec::new();
        for &p in pts.iter().rev() {
            keep_left(&mut upper, p);
        }
        // The chains share both endpoints; drop them from the upper one.
        let upper_interior = upper.len().saturating_sub(2);
        lower.extend(upper.into_iter().skip(1).take(upper_interior));
        ConvexPolygon { points: lower }
    }

    /// The vertices, in cyclic order.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.points
    }

    /// The number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Does the polygon have no vertices?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Map each vertex through `a`, treating `origin` as the fixed point
    /// of the linear part: `p ↦ origin + a · (p − origin)`.
    ///
    /// This is how a local-space hull lands in a shared coordinate
    /// space: the host's transform origin is not the coordinate origin.
    #[must_use]
    pub fn transform_about(&self, a: Affine, origin: Point) -> ConvexPolygon {
        let o = origin.to_vec2();
        ConvexPolygon {
            points: self.points.iter().map(|&p| (a * (p - o)) + o).collect(),
        }
    }

    /// Orientation of the polygon: 1 for counter-clockwise, -1 for
    /// clockwise, 0 for fewer than 3 vertices or a fully collinear
    /// vertex set.
    ///
    /// Found from the first non-degenerate triple of consecutive
    /// vertices, wrapping around the end.
    pub fn orientation(&self) -> i8 {
        let poly = &self.points;
        if poly.len() <= 2 {
            return 0;
        }
        let a = signed_area(poly[poly.len() - 1], poly[0], poly[1]);
        if a != 0.0 {
            return sign(a);
        }
        for j in 1..poly.len() {
            let a = signed_area(poly[j - 1], poly[j], poly[(j + 1) % poly.len()]);
            if a != 0.0 {
                return sign(a);
            }
        }
        0
    }

    /// Is `pt` inside the polygon (boundary included)?
    ///
    /// Walks the edges accumulating signed triangle areas; a single sign
    /// flip proves the point is outside, and an exactly zero area means
    /// the point is on an edge's carrier line, which counts as inside.
    /// An empty polygon contains nothing, a single vertex only its exact
    /// coincidence, and a two-vertex polygon only points collinear with
    /// its segment.
    pub fn contains_point(&self, pt: Point) -> bool {
        let poly = &self.points;
        if poly.is_empty() {
            return false;
        }
        if poly.len() == 1 {
            return poly[0] == pt;
        }
        let a0 = signed_area(pt, poly[poly.len() - 1], poly[0]);
        if a0 == 0.0 {
            return true;
        }
        let positive = a0 > 0.0;
        if poly.len() == 2 {
            return false;
        }
        for j in 1..poly.len() {
            let aj = signed_area(pt, poly[j - 1], poly[j]);
            if aj == 0.0 {
                return true;
            }
            if (aj > 0.0) != positive {
                return false;
            }
        }
        true
    }

    /// Do the two polygons overlap (shared boundary included)?
    ///
    /// Separating-axis test specialized to convex polygons: every edge
    /// of both polygons is tried as a separating line. Both polygons
    /// must contribute edges, since neither alone is guaranteed to carry
    /// a separating axis. Either polygon being empty means no overlap.
    pub fn overlaps(&self, other: &ConvexPolygon) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        !self.separates(other) && !other.separates(self)
    }

    /// Does some edge of `self` separate `other` from `self`'s interior?
    fn separates(&self, other: &ConvexPolygon) -> bool {
        let inside = self.orientation();
        let poly = &self.points;
        for j in 0..poly.len() {
            if edge_separates(inside, poly[j], poly[(j + 1) % poly.len()], &other.points) {
                return true;
            }
        }
        false
    }

    /// Does `self` contain every vertex of `other`?
    ///
    /// For convex polygons vertex containment implies full containment.
    /// An empty `other` is not considered contained.
    pub fn contains(&self, other: &ConvexPolygon) -> bool {
        if other.is_empty() {
            return false;
        }
        other.points.iter().all(|&p| self.contains_point(p))
    }

    /// Parse a hull written as a flat whitespace-separated number list,
    /// taken pairwise as (x, y).
    ///
    /// The parsed points are run through [`hull`](Self::hull), so the
    /// result is always convex and counter-clockwise. An odd trailing
    /// number is ignored, and unparseable tokens become non-finite
    /// points, which the hull builder skips. Blank input means "no
    /// explicit hull" (`None`; the caller falls back to a bounding
    /// rectangle via [`from_rect`](Self::from_rect)), while the literal
    /// `none` is an explicitly empty hull.
    pub fn parse_hull(text: &str) -> Option<ConvexPolygon> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if text == "none" {
            return Some(ConvexPolygon::default());
        }
        let nums: Vec<f64> = text
            .split_whitespace()
            .map(|tok| tok.parse().unwrap_or(f64::NAN))
            .collect();
        Some(ConvexPolygon::hull(
            nums.chunks_exact(2).map(|xy| Point::new(xy[0], xy[1])),
        ))
    }

    /// Write the hull as a flat number list; the empty hull is `none`.
    pub fn write_hull(&self) -> String {
        if self.points.is_empty() {
            return "none".to_string();
        }
        let mut result = String::new();
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                result.push(' ');
            }
            result.push_str(&css_num(p.x));
            result.push(' ');
            result.push_str(&css_num(p.y));
        }
        result
    }
}

/// Given the edge (p0, p1) of a polygon whose interior lies on side
/// `inside`, does every vertex of `poly` lie strictly on the opposite
/// side of the edge's carrier line?
fn edge_separates(inside: i8, p0: Point, p1: Point, poly: &[Point]) -> bool {
    let d1 = p1 - p0;
    for &p in poly {
        let s = sign((p - p0).cross(d1));
        if s == 0 || s == inside {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{ConvexPolygon, Point};
    use crate::{Affine, Rect};
    use proptest::prelude::*;

    fn poly(pts: &[(f64, f64)]) -> ConvexPolygon {
        ConvexPolygon::from_vertices(pts.iter().map(|&(x, y)| Point::new(x, y)))
    }

    fn hull_of(pts: &[(f64, f64)]) -> ConvexPolygon {
        ConvexPolygon::hull(pts.iter().map(|&(x, y)| Point::new(x, y)))
    }

    #[test]
    fn hull_drops_interior_and_collinear() {
        let h = hull_of(&[(0., 0.), (4., 0.), (4., 4.), (0., 4.), (2., 2.)]);
        assert_eq!(
            h.vertices(),
            &[
                Point::new(0., 0.),
                Point::new(0., 4.),
                Point::new(4., 4.),
                Point::new(4., 0.)
            ]
        );
        assert_eq!(h.orientation(), 1);

        // A collinear midpoint on an edge is not an extreme point.
        let h = hull_of(&[(0., 0.), (2., 0.), (4., 0.), (4., 4.), (0., 4.)]);
        assert_eq!(h.len(), 4);
    }

    #[test]
    fn hull_degenerate_inputs() {
        assert!(hull_of(&[]).is_empty());
        assert_eq!(hull_of(&[(3., 7.)]).vertices(), &[Point::new(3., 7.)]);
        assert_eq!(hull_of(&[(3., 7.), (3., 7.), (3., 7.)]).len(), 1);
        assert_eq!(hull_of(&[(0., 0.), (1., 1.)]).len(), 2);
        // Non-finite points are skipped, not propagated.
        let h = ConvexPolygon::hull([
            Point::new(0., 0.),
            Point::new(f64::NAN, 1.),
            Point::new(1., f64::INFINITY),
            Point::new(1., 0.),
        ]);
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn triangle_containment() {
        let t = poly(&[(-1., -1.), (1., -1.), (0., 1.)]);
        assert!(t.contains_point(Point::new(0., 0.)));
        assert!(!t.contains_point(Point::new(5., 5.)));
        // On an edge counts as inside.
        assert!(t.contains_point(Point::new(0., -1.)));
    }

    #[test]
    fn degenerate_containment() {
        let empty = ConvexPolygon::default();
        assert!(!empty.contains_point(Point::ZERO));

        let single = poly(&[(2., 3.)]);
        assert!(single.contains_point(Point::new(2., 3.)));
        assert!(!single.contains_point(Point::new(2., 3.000001)));

        // Two vertices: only points on the carrier line pass.
        let seg = poly(&[(0., 0.), (2., 0.)]);
        assert!(seg.contains_point(Point::new(1., 0.)));
        assert!(!seg.contains_point(Point::new(1., 0.1)));
    }

    #[test]
    fn square_overlap_scenarios() {
        let unit = poly(&[(0., 0.), (1., 0.), (1., 1.), (0., 1.)]);
        let offset = poly(&[(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)]);
        let far = poly(&[(2., 2.), (3., 2.), (3., 3.), (2., 3.)]);
        assert!(unit.overlaps(&offset));
        assert!(offset.overlaps(&unit));
        assert!(!unit.overlaps(&far));
        assert!(!far.overlaps(&unit));
    }

    #[test]
    fn empty_polygons_never_overlap() {
        let empty = ConvexPolygon::default();
        let unit = poly(&[(0., 0.), (1., 0.), (1., 1.), (0., 1.)]);
        assert!(!empty.overlaps(&unit));
        assert!(!unit.overlaps(&empty));
        assert!(!empty.overlaps(&empty));
        assert!(!unit.contains(&empty));
    }

    #[test]
    fn containment_scenario() {
        let outer = ConvexPolygon::from_rect(Rect::from_center_size(Point::ZERO, 10., 10.));
        let inner = ConvexPolygon::from_rect(Rect::from_center_size(Point::ZERO, 2., 2.));
        let far = ConvexPolygon::from_rect(Rect::from_center_size(Point::new(20., 20.), 2., 2.));
        assert!(outer.contains(&inner));
        assert!(!outer.contains(&far));
        // Overlap is weaker than containment.
        assert!(outer.overlaps(&inner));
        assert!(!outer.overlaps(&far));
    }

    #[test]
    fn transform_about_rotates_footprint() {
        let quad = ConvexPolygon::from_rect(Rect::new(0., 0., 2., 1.));
        let center = Point::new(1., 0.5);
        let turned = quad.transform_about(Affine::rotate_deg(90.), center);
        // The footprint swaps width and height about its center. The
        // rotation permutes the corner order, so match corners as a set.
        let expect = ConvexPolygon::from_rect(Rect::new(0.5, -0.5, 1.5, 1.5));
        for &corner in expect.vertices() {
            assert!(
                turned
                    .vertices()
                    .iter()
                    .any(|&p| p.distance(corner) < 1e-9),
                "missing corner {corner:?} in {turned:?}"
            );
        }
    }

    #[test]
    fn hull_text_codec() {
        assert_eq!(ConvexPolygon::parse_hull(""), None);
        assert_eq!(ConvexPolygon::parse_hull("   "), None);
        assert_eq!(
            ConvexPolygon::parse_hull("none"),
            Some(ConvexPolygon::default())
        );
        assert_eq!(ConvexPolygon::default().write_hull(), "none");

        let h = ConvexPolygon::parse_hull("0 0 4 0 4 4 0 4 2 2").unwrap();
        assert_eq!(h.len(), 4);
        let text = h.write_hull();
        assert_eq!(text, "0 0 0 4 4 4 4 0");
        assert_eq!(ConvexPolygon::parse_hull(&text), Some(h));

        // Odd trailing number is ignored.
        let h = ConvexPolygon::parse_hull("0 0 1 0 0 1 99").unwrap();
        assert_eq!(h.len(), 3);

        // Unparseable tokens become non-finite points and drop out.
        let h = ConvexPolygon::parse_hull("0 0 x y 1 0").unwrap();
        assert_eq!(h.len(), 2);
    }

    fn arb_hull() -> impl Strategy<Value = ConvexPolygon> {
        proptest::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 1..12)
            .prop_map(|pts| hull_of(&pts))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_hull(), b in arb_hull()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn hull_contains_its_inputs(pts in proptest::collection::vec(
            (-100.0..100.0f64, -100.0..100.0f64), 3..12)) {
            let h = hull_of(&pts);
            // Allow for the degenerate all-collinear case, where the
            // carrier-line rule already makes this pass.
            for (x, y) in pts {
                prop_assert!(h.contains_point(Point::new(x, y)));
            }
        }

        #[test]
        fn hull_is_ccw(pts in proptest::collection::vec(
            (-100.0..100.0f64, -100.0..100.0f64), 3..12)) {
            let h = hull_of(&pts);
            if h.len() >= 3 {
                prop_assert_eq!(h.orientation(), 1);
            }
        }

        #[test]
        fn polygon_contains_self(a in arb_hull()) {
            prop_assert!(a.contains(&a.clone()));
            if !a.is_empty() {
                prop_assert!(a.overlaps(&a.clone()));
            }
        }
    }
}
