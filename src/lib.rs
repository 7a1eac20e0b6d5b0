// Copyright 2026 the Twirl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D affine transform decomposition and convex hit-testing geometry.
//!
//! The twirl library contains the geometry engine of a sprite/turtle
//! graphics system: a stable decomposition of arbitrary affine
//! transforms into a canonical translate/rotate/scale/twist form, a
//! compact textual codec for that form, and convex-polygon predicates
//! for collision and hit-testing. It is a pure computation library; the
//! hosting scene graph hands it already-resolved matrices and point
//! sets, and it holds no state of its own, so everything here is safe
//! to call from any thread.
//!
//! # Examples
//!
//! Decompose a skewed transform and read back its canonical text form:
//!
//! ```
//! use twirl::{Affine, CanonicalTransform};
//!
//! let a = Affine::translate((10.0, 20.0)) * Affine::rotate_deg(30.0) * Affine::skew(0.5, 0.0);
//! let ts = CanonicalTransform::from_affine(a);
//! assert!(ts.twist != 0.0); // skew shows up as a twist
//! assert!(ts.twist.abs() <= 45.0);
//! let round_trip = CanonicalTransform::parse(&ts.to_string()).unwrap();
//! assert!((round_trip.tx - 10.0).abs() < 1e-9);
//! ```
//!
//! Hit-test two sprite footprints:
//!
//! ```
//! use twirl::{ConvexPolygon, Point};
//!
//! let a = ConvexPolygon::hull([
//!     Point::new(0.0, 0.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(4.0, 4.0),
//!     Point::new(0.0, 4.0),
//!     Point::new(2.0, 2.0), // interior, dropped by the hull
//! ]);
//! let b = ConvexPolygon::hull([Point::new(3.0, 3.0), Point::new(5.0, 3.0), Point::new(4.0, 5.0)]);
//! assert_eq!(a.vertices().len(), 4);
//! assert!(a.overlaps(&b));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(clippy::unreadable_literal, clippy::many_single_char_names)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod affine;
mod canon;
pub mod common;
mod parse;
mod point;
mod polygon;
mod rect;
mod svd;
mod vec2;

pub use crate::affine::*;
pub use crate::canon::*;
pub use crate::parse::parse_transform_list;
pub use crate::point::*;
pub use crate::polygon::*;
pub use crate::rect::*;
pub use crate::svd::*;
pub use crate::vec2::*;
