// Copyright (c) 2026 Kliment Olechnovic and Mikael Lund
// Part of the mcsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

//! Error type shared by configuration, geometry and container setup.

use thiserror::Error;

/// Errors raised while configuring the SASA engine or its collaborators.
///
/// Runtime numerics never produce errors: degenerate arc geometry is clamped
/// in place, and broken calling contracts (querying before `init`, indices out
/// of range) panic instead.
#[derive(Debug, Error)]
pub enum SasaError {
    #[error("probe radius must be positive and finite, got {0}")]
    InvalidProbeRadius(f64),

    #[error("slices per atom must be at least 1, got {0}")]
    InvalidSlices(usize),

    #[error("box side lengths must be positive and finite, got {0:?}")]
    InvalidBoxLength([f64; 3]),

    #[error("atom kind {atom_id} is not defined (only {defined} kinds available)")]
    UnknownAtomKind { atom_id: usize, defined: usize },

    #[error("group {group_index} holds {capacity} particles, cannot activate {requested}")]
    GroupCapacity {
        group_index: usize,
        capacity: usize,
        requested: usize,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
