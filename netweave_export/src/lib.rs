// NetWeave: Compiling Abstract Network Models into Device Configurations
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # NetWeave Export
//!
//! This is a small crate to export JSON snapshots of one overlay of a
//! [`NetworkModel`](netweave::model::NetworkModel), in the node-link shape consumed by the
//! visualization front end: one entry per node (label, device type, normalized canvas
//! coordinates) and one entry per link (endpoint indices plus the overlay attribute).
//!
//! ```rust
//! use netweave::example_models::SmallIsp;
//! use netweave_export::{Overlay, Snapshot};
//!
//! fn main() -> Result<(), netweave_export::Error> {
//!     let model = SmallIsp::model();
//!     let snapshot = Snapshot::new(&model, Overlay::Ospf);
//!     assert_eq!(snapshot.nodes.len(), 3);
//!     let json = snapshot.to_json()?;
//!     assert!(json.contains("\"overlay\":\"ospf\""));
//!     Ok(())
//! }
//! ```
#![deny(missing_docs)]

mod snapshot;
pub use snapshot::{LinkData, NodeData, Overlay, Snapshot};

use thiserror::Error;

/// # Export Error type
#[derive(Debug, Error)]
pub enum Error {
    /// Cannot serialize the snapshot
    #[error("Cannot serialize snapshot: {0}")]
    JsonError(#[from] serde_json::error::Error),
}

/// Export Result type
type Result<T> = core::result::Result<T, Error>;
