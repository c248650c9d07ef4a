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

//! # Platform Orchestrators
//!
//! A platform orchestrator drives the compilation for one emulator / runtime target: it selects
//! the eligible devices (routers on its host with its vendor syntax), writes the render target
//! into the render store, overwrites every render-edge identifier with a freshly allocated
//! platform-specific interface name, and finally runs the matching vendor specialization of the
//! router compiler on each device.
//!
//! Orchestrators run to completion one after the other; a failing device aborts the entire
//! platform pass without leaving partial output for that device.

mod allocator;
mod dynagen;
mod junosphere;

pub use allocator::InterfaceAllocator;
pub use dynagen::DynagenCompiler;
pub use junosphere::JunosphereCompiler;

use crate::error::Error;
use crate::model::NetworkModel;
use crate::render::RenderStore;

/// Trait for platform orchestrators. One implementor per emulator / runtime target.
pub trait PlatformCompiler {
    /// Name of the emulation host this orchestrator targets.
    fn host(&self) -> &str;

    /// Compile all eligible devices of the model for this platform. Designed to run once per
    /// platform per full-model compilation pass.
    fn compile(&self, model: &NetworkModel, store: &mut RenderStore) -> Result<(), Error>;
}
