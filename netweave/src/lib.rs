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

#![deny(missing_docs)]

//! # NetWeave: Compiling Abstract Network Models into Device Configurations
//!
//! This is a library for compiling an abstract multi-layer network model into per-device
//! configuration records. The model describes the network as a set of overlays (physical
//! topology, IP addressing, OSPF adjacency, BGP peering) over one shared set of devices; the
//! compiler resolves them into ordered, deduplicated configuration primitives (interface lists,
//! OSPF link lists, BGP neighbor lists) ready to be handed to a template-rendering backend that
//! emits vendor-specific configuration text.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`Model`](model)**: The overlay network model, read-only during compilation. See the main
//!   structure [`NetworkModel`](model::NetworkModel).
//!
//! - **[`Render`](render)**: The device render store, the mutable per-device record consumed by
//!   the configuration renderer: render target, interface identifiers, and the finished compiled
//!   record.
//!
//! - **[`Compiler`](compiler)**: The per-device router compiler and its vendor specializations.
//!   The generic compiler produces the interface, OSPF and BGP sections; a
//!   [`Vendor`](compiler::Vendor) tag adjusts the interface-building step where a vendor
//!   requires it.
//!
//! - **[`Platform`](platform)**: The platform orchestrators, one per emulator / runtime target.
//!   An orchestrator selects the eligible devices, allocates platform-specific interface names
//!   through an [`InterfaceAllocator`](platform::InterfaceAllocator), and drives the matching
//!   vendor specialization.
//!
//! - **[`ExampleModels`](example_models)**: Prebuilt models used in tests and documentation.
//!
//! ## Usage
//!
//! Compilation is a single-threaded, synchronous pass: build (or load) a model, create a render
//! store mirroring it, and run one orchestrator per platform target. A failure on any device
//! aborts the pass of that platform.
//!
//! ```rust
//! use netweave::example_models::SmallIsp;
//! use netweave::platform::{DynagenCompiler, JunosphereCompiler, PlatformCompiler};
//! use netweave::render::RenderStore;
//!
//! fn main() -> Result<(), netweave::Error> {
//!     let model = SmallIsp::model();
//!     let mut store = RenderStore::from_model(&model);
//!
//!     // one pass per platform target
//!     JunosphereCompiler::new("zoo").compile(&model, &mut store)?;
//!     DynagenCompiler::new("zoo").compile(&model, &mut store)?;
//!
//!     // every compiled device now carries its record
//!     let zurich = model.device_by_name("zurich").unwrap();
//!     let config = store.device(zurich).unwrap().config.as_ref().unwrap();
//!     assert_eq!(config.interfaces.len(), 3);
//!     assert!(config.ospf.is_some());
//!     assert!(config.bgp.is_some());
//!
//!     Ok(())
//! }
//! ```

pub mod compiler;
mod error;
pub mod example_models;
pub mod model;
pub mod platform;
pub mod render;
mod test;

pub use error::{CompileError, Error};
