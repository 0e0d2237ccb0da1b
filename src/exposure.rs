// Copyright (c) 2026 Kliment Olechnovic and Mikael Lund
// Part of the mcsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

//! Exposed surface area of one sphere by slicing it into parallel bands.
//!
//! The sphere is cut into `slices` bands of equal height along z. On each
//! band's circle every overlapping neighbour covers an arc; the union of those
//! arcs is subtracted from the full turn. By Archimedes' hat-box theorem a
//! band of height `h` on a sphere of radius `r` has area `2πrh` regardless of
//! latitude, so the exposed area is `r h Σ exposed_arc`.

use std::f64::consts::{PI, TAU};

use crate::types::Point;

/// Coverage of one band circle by one neighbour
#[derive(Debug, Clone, Copy, PartialEq)]
enum BandCover {
    /// The neighbour does not reach the circle
    Free,
    /// The whole circle lies inside the neighbour
    Full,
    /// The neighbour covers the arc between two angles in `[0, 2π)`
    Arc(f64, f64),
}

/// Coverage of the circle of radius `circle_radius` at height `z` by a
/// neighbour sphere of radius `radius` centred at `center` (relative to the
/// target centre).
fn band_cover(circle_radius: f64, z: f64, center: &Point, radius: f64) -> BandCover {
    let dz = center.z - z;
    let section_sq = radius.mul_add(radius, -dz * dz);
    if section_sq <= 0.0 {
        return BandCover::Free;
    }
    let section = section_sq.sqrt();
    let distance = center.x.hypot(center.y);

    if distance >= circle_radius + section {
        return BandCover::Free;
    }
    if distance + circle_radius <= section {
        return BandCover::Full;
    }
    if distance + section <= circle_radius {
        // neighbour section lies strictly inside the circle and touches no point of it
        return BandCover::Free;
    }

    // law of cosines; clamp against round-off near tangency
    let cos_alpha = (section_sq - circle_radius.mul_add(circle_radius, distance * distance))
        / (-2.0 * circle_radius * distance);
    let alpha = cos_alpha.clamp(-1.0, 1.0).acos();
    if alpha >= PI {
        return BandCover::Full;
    }
    let beta = center.y.atan2(center.x).rem_euclid(TAU);

    let mut start = beta - alpha;
    let mut end = beta + alpha;
    if start < 0.0 {
        start += TAU;
    }
    if end >= TAU {
        end -= TAU;
    }
    BandCover::Arc(start, end)
}

/// Uncovered length of the unit circle, in radians.
///
/// Each arc runs from `.0` to `.1` with both angles in `[0, 2π]` and
/// `.0 <= .1`; arcs crossing zero must be split beforehand. The slice is
/// sorted in place.
#[must_use]
pub fn exposed_arc_length(arcs: &mut [(f64, f64)]) -> f64 {
    if arcs.is_empty() {
        return TAU;
    }
    arcs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut exposed = arcs[0].0;
    let mut supremum = arcs[0].1;
    for &(start, end) in &arcs[1..] {
        if supremum < start {
            exposed += start - supremum;
        }
        supremum = supremum.max(end);
    }
    (exposed + TAU - supremum).clamp(0.0, TAU)
}

/// Exposed surface area of a sphere with radius `radius`.
///
/// `neighbours` holds `(displacement from target to neighbour, neighbour radius)`;
/// order does not matter. With no neighbours the result is `4πr²`.
///
/// # Panics
/// Panics if `slices` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn exposed_area(radius: f64, neighbours: &[(Point, f64)], slices: usize) -> f64 {
    assert!(slices > 0, "at least one slice is required");
    let slice_height = 2.0 * radius / slices as f64;
    let mut arcs: Vec<(f64, f64)> = Vec::with_capacity(2 * neighbours.len());
    let mut exposed_arcs = 0.0;

    'slices: for k in 0..slices {
        let z = (k as f64 + 0.5).mul_add(-slice_height, radius);
        let circle_radius = radius.mul_add(radius, -z * z).max(0.0).sqrt();

        arcs.clear();
        for (center, neighbour_radius) in neighbours {
            match band_cover(circle_radius, z, center, *neighbour_radius) {
                BandCover::Free => {}
                BandCover::Full => continue 'slices,
                BandCover::Arc(start, end) if end < start => {
                    arcs.push((0.0, end));
                    arcs.push((start, TAU));
                }
                BandCover::Arc(start, end) => arcs.push((start, end)),
            }
        }
        exposed_arcs += exposed_arc_length(&mut arcs);
    }

    radius * slice_height * exposed_arcs
}
