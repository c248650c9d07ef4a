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

//! Platform orchestrator for the Dynagen router emulator

use crate::compiler::{RouterCompiler, Vendor};
use crate::error::{CompileError, Error};
use crate::model::{NetworkModel, Syntax};
use crate::platform::{InterfaceAllocator, PlatformCompiler};
use crate::render::{name_folder_safe, RenderStore};
use log::*;

/// # Dynagen Orchestrator
///
/// Compiles all IOS routers assigned to one Dynagen host. Interface names are drawn from the
/// unrestricted `gigabitethernet0/0/0/<n>` sequence, each device starting from a fresh
/// allocator.
#[derive(Debug, Clone)]
pub struct DynagenCompiler {
    host: String,
}

impl DynagenCompiler {
    /// Create an orchestrator for the given emulation host.
    pub fn new<S: Into<String>>(host: S) -> Self {
        Self { host: host.into() }
    }

    /// The interface name sequence of the emulator, restarted for every device.
    pub(crate) fn interface_names() -> impl Iterator<Item = String> {
        InterfaceAllocator::unrestricted().map(|idx| format!("gigabitethernet0/0/0/{}", idx))
    }
}

impl PlatformCompiler for DynagenCompiler {
    fn host(&self) -> &str {
        &self.host
    }

    fn compile(&self, model: &NetworkModel, store: &mut RenderStore) -> Result<(), Error> {
        info!("Compiling ios configurations for host {}", self.host);
        let compiler = RouterCompiler::new(model, Vendor::Ios);
        for device in model.routers(&self.host, Syntax::Ios) {
            let dev = model.device(device).ok_or(CompileError::DeviceNotFound(device))?;
            debug!("Compiling {}", dev.name);
            store.set_render_target(
                device,
                "templates/ios.mako",
                "rendered/ios",
                &format!("{}.conf", name_folder_safe(&dev.name)),
            )?;
            store.assign_edge_ids(device, Self::interface_names())?;
            compiler.compile(store, device)?;
        }
        Ok(())
    }
}
