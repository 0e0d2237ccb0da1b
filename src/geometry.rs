// Copyright (c) 2026 Kliment Olechnovic and Mikael Lund
// Part of the mcsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

//! Simulation container geometry: minimum-image distances and boundary wrapping.

use crate::error::SasaError;
use crate::types::Point;

/// Distance and boundary conditions of a simulation container.
///
/// Containers are centred at the origin, so a wrapped position lies in
/// `[-L/2, L/2]` along every periodic axis.
pub trait Geometry: std::fmt::Debug {
    /// Squared minimum-image distance between two points
    fn sqdist(&self, a: &Point, b: &Point) -> f64 {
        self.vdist(a, b).norm_squared()
    }

    /// Minimum-image displacement `a - b`
    fn vdist(&self, a: &Point, b: &Point) -> Point;

    /// Wrap a point into the primary cell along periodic axes
    fn boundary(&self, a: &mut Point);

    /// Side lengths of the container
    fn length(&self) -> Point;

    /// Resize the container.
    ///
    /// # Errors
    /// Returns [`SasaError::InvalidBoxLength`] unless all sides are positive and finite.
    fn set_length(&mut self, length: Point) -> Result<(), SasaError>;

    fn volume(&self) -> f64 {
        let l = self.length();
        l.x * l.y * l.z
    }
}

/// Rectangular box with per-axis periodic boundaries.
///
/// Non-periodic axes behave as hard walls: no minimum image and no wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    length: Point,
    half_length: Point,
    periodic: [bool; 3],
}

impl Cuboid {
    /// Fully periodic cuboid.
    ///
    /// # Errors
    /// Returns [`SasaError::InvalidBoxLength`] for non-positive or non-finite sides.
    pub fn new(length: Point) -> Result<Self, SasaError> {
        Self::with_periodicity(length, [true, true, true])
    }

    /// Cuboid periodic in x and y, with hard walls along z.
    ///
    /// # Errors
    /// Returns [`SasaError::InvalidBoxLength`] for non-positive or non-finite sides.
    pub fn slit(length: Point) -> Result<Self, SasaError> {
        Self::with_periodicity(length, [true, true, false])
    }

    /// Cube with side `side`, periodic in all directions.
    ///
    /// # Errors
    /// Returns [`SasaError::InvalidBoxLength`] for a non-positive or non-finite side.
    pub fn cube(side: f64) -> Result<Self, SasaError> {
        Self::new(Point::new(side, side, side))
    }

    /// # Errors
    /// Returns [`SasaError::InvalidBoxLength`] for non-positive or non-finite sides.
    pub fn with_periodicity(length: Point, periodic: [bool; 3]) -> Result<Self, SasaError> {
        check_length(&length)?;
        Ok(Self {
            length,
            half_length: length * 0.5,
            periodic,
        })
    }

    #[must_use]
    pub const fn periodicity(&self) -> [bool; 3] {
        self.periodic
    }
}

fn check_length(length: &Point) -> Result<(), SasaError> {
    if length.iter().all(|l| l.is_finite() && *l > 0.0) {
        Ok(())
    } else {
        Err(SasaError::InvalidBoxLength([length.x, length.y, length.z]))
    }
}

impl Geometry for Cuboid {
    fn vdist(&self, a: &Point, b: &Point) -> Point {
        let mut r = a - b;
        for axis in 0..3 {
            if !self.periodic[axis] {
                continue;
            }
            if r[axis] > self.half_length[axis] {
                r[axis] -= self.length[axis];
            } else if r[axis] < -self.half_length[axis] {
                r[axis] += self.length[axis];
            }
        }
        r
    }

    fn boundary(&self, a: &mut Point) {
        for axis in 0..3 {
            if self.periodic[axis] && a[axis].abs() > self.half_length[axis] {
                a[axis] -= self.length[axis] * (a[axis] / self.length[axis]).round();
            }
        }
    }

    fn length(&self) -> Point {
        self.length
    }

    fn set_length(&mut self, length: Point) -> Result<(), SasaError> {
        check_length(&length)?;
        self.length = length;
        self.half_length = length * 0.5;
        Ok(())
    }
}
