// Copyright 2026 the Twirl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangle.

use core::fmt;

use crate::{Point, Vec2};

/// An axis-aligned rectangle.
///
/// Used as the fall-back hit-testing footprint for elements that carry
/// no explicit collision hull: the caller takes the element's bounding
/// rectangle and promotes its corners to a quad.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate (left edge).
    pub x0: f64,
    /// The minimum y coordinate (top edge in y-down spaces).
    pub y0: f64,
    /// The maximum x coordinate (right edge).
    pub x1: f64,
    /// The maximum y coordinate (bottom edge in y-down spaces).
    pub y1: f64,
}

impl Rect {
    /// A new rectangle from minimum and maximum coordinates.
    #[inline(always)]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// A new rectangle from origin and size.
    #[inline]
    pub fn from_origin_size(origin: impl Into<Point>, width: f64, height: f64) -> Rect {
        let origin = origin.into();
        Rect::new(origin.x, origin.y, origin.x + width, origin.y + height).abs()
    }

    /// A new rectangle centered on `center` with the given width and height.
    #[inline]
    pub fn from_center_size(center: impl Into<Point>, width: f64, height: f64) -> Rect {
        let center = center.into();
        Rect::from_origin_size(
            center - Vec2::new(width * 0.5, height * 0.5),
            width,
            height,
        )
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// A new rectangle with the same extents, with `x0 <= x1` and `y0 <= y1`.
    #[inline]
    pub fn abs(&self) -> Rect {
        let Rect { x0, y0, x1, y1 } = *self;
        Rect::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    /// The four corners, starting at (x0, y0) and walking the left edge
    /// first.
    ///
    /// The order matches the hull orientation produced by
    /// [`ConvexPolygon::hull`](crate::ConvexPolygon::hull), so a corner quad
    /// can feed the hit-testing predicates directly.
    #[inline]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x0, self.y0),
            Point::new(self.x0, self.y1),
            Point::new(self.x1, self.y1),
            Point::new(self.x1, self.y0),
        ]
    }

    /// Is this rectangle finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect {{ origin: ({:?}, {:?}), size: ({:?}, {:?}) }}",
            self.x0,
            self.y0,
            self.width(),
            self.height()
        )
    }
}
