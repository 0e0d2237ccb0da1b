//! Incremental solvent-accessible surface areas (SASA) for Monte Carlo simulations.
//!
//! Particles are spheres inside a periodic (or partly hard-walled) container.
//! Each particle's exposed area is computed by slicing its sphere, enlarged by
//! a probe radius, into parallel bands and measuring the part of every band
//! not covered by overlapping neighbours. Neighbours are found either by an
//! all-pairs search or through a periodic cell list that is kept in sync with
//! the container as moves are proposed, so a single-particle update costs
//! O(local density) instead of O(N).
//!
//! # Example
//!
//! ```
//! use mcsasa::{AtomKind, Change, Cuboid, GroupChange, Particle, Point, Sasa, SasaConfig, Space};
//!
//! let mut space = Space::new(Cuboid::cube(40.0)?, vec![AtomKind::new("A", 2.0)]);
//! space.add_group(vec![
//!     Particle::new(0, Point::new(-5.0, 0.0, 0.0)),
//!     Particle::new(0, Point::new(0.0, 0.0, 0.0)),
//!     Particle::new(0, Point::new(5.0, 0.0, 0.0)),
//! ])?;
//!
//! let mut sasa = Sasa::new(SasaConfig { slices_per_atom: 50, ..Default::default() })?;
//! sasa.init(&space);
//!
//! // move the last particle away and refresh everything it touched
//! let change = Change::displacement(vec![GroupChange::atoms(0, vec![2])]);
//! let before = sasa.affected_indices(&space, &[2]);
//! space.translate(2, &Point::new(5.0, 0.0, 0.0));
//! sasa.update(&space, &change);
//! let mut dirty = sasa.affected_indices(&space, &[2]);
//! dirty.extend(before);
//! sasa.recompute(&space, &dirty);
//!
//! for (i, area) in sasa.areas().iter().enumerate() {
//!     println!("particle {i}: {area:.2}");
//! }
//! # Ok::<(), mcsasa::SasaError>(())
//! ```

mod cell_list;
mod change;
mod error;
mod exposure;
mod geometry;
mod neighbours;
mod sasa;
mod space;
mod types;

pub use cell_list::{CellCoord, CellGrid, CellList};
pub use change::{Change, ChangeKind, GroupChange};
pub use error::SasaError;
pub use exposure::{exposed_arc_length, exposed_area};
pub use geometry::{Cuboid, Geometry};
pub use neighbours::{CellListSearch, DirectSearch, NeighbourSearch};
pub use sasa::{Sasa, SasaConfig, SearchStrategy};
pub use space::{Group, Space};
pub use types::{AtomKind, Neighbours, Particle, Point};
