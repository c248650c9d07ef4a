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

//! # Device Render Store
//!
//! The render store is the mutable per-device record consumed by the configuration renderer. For
//! every device it holds the render target (template selector, output folder and file), the
//! render edges with their device-local interface identifiers, and the finished compiled record.
//!
//! Render edges are stored in an ordered map keyed by `(neighbor, link)`, so identifier
//! allocation always walks them in the same order, no matter how the underlying model was built.

use crate::compiler::DeviceConfig;
use crate::error::CompileError;
use crate::model::{DeviceId, LinkId, NetworkModel};
use std::collections::{BTreeMap, HashMap};

/// Render instructions of a single device: which template to use and where to write the rendered
/// configuration text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderTarget {
    /// Template selector for the rendering backend
    pub template: Option<String>,
    /// Output folder of the rendered configuration
    pub dst_folder: Option<String>,
    /// Output file of the rendered configuration
    pub dst_file: Option<String>,
}

/// A render edge: one entry per physical link of the device, carrying the device-local interface
/// identifier used in the rendered configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderEdge {
    /// The physical link this edge renders
    pub link: LinkId,
    /// The device on the far end of the link
    pub neighbor: DeviceId,
    /// Device-local interface identifier, `None` until assigned
    pub id: Option<String>,
}

/// Render store entry of a single device
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDevice {
    /// Render target of the device
    pub target: RenderTarget,
    /// The compiled configuration record, attached by the router compiler
    pub config: Option<DeviceConfig>,
    edges: BTreeMap<(DeviceId, LinkId), RenderEdge>,
}

impl RenderDevice {
    /// Iterate over the render edges of the device, in ascending `(neighbor, link)` order.
    pub fn edges(&self) -> impl Iterator<Item = &RenderEdge> {
        self.edges.values()
    }
}

/// # Device Render Store
///
/// One [`RenderDevice`] per device of the model. Created as a mirror of the physical overlay and
/// mutated by the platform orchestrators and the router compiler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderStore {
    devices: HashMap<DeviceId, RenderDevice>,
}

impl RenderStore {
    /// Create a render store mirroring the devices and links of a model.
    pub fn from_model(model: &NetworkModel) -> Self {
        let mut devices = HashMap::new();
        for device in model.devices() {
            let mut edges = BTreeMap::new();
            for (link, neighbor) in model.links(device) {
                edges.insert((neighbor, link), RenderEdge { link, neighbor, id: None });
            }
            devices.insert(
                device,
                RenderDevice { target: RenderTarget::default(), config: None, edges },
            );
        }
        Self { devices }
    }

    /// Return the render store entry of a device.
    pub fn device(&self, device: DeviceId) -> Option<&RenderDevice> {
        self.devices.get(&device)
    }

    /// Set the render target of a device.
    pub fn set_render_target(
        &mut self,
        device: DeviceId,
        template: &str,
        dst_folder: &str,
        dst_file: &str,
    ) -> Result<(), CompileError> {
        let dev = self.device_mut(device)?;
        dev.target = RenderTarget {
            template: Some(template.to_string()),
            dst_folder: Some(dst_folder.to_string()),
            dst_file: Some(dst_file.to_string()),
        };
        Ok(())
    }

    /// Overwrite the interface identifiers of all render edges of a device, drawing names from
    /// the given source in ascending `(neighbor, link)` order. Fails if the source runs out of
    /// names before every edge is assigned.
    pub fn assign_edge_ids<I: Iterator<Item = String>>(
        &mut self,
        device: DeviceId,
        mut names: I,
    ) -> Result<(), CompileError> {
        let dev = self.device_mut(device)?;
        for edge in dev.edges.values_mut() {
            edge.id =
                Some(names.next().ok_or(CompileError::InterfaceNamesExhausted(device))?);
        }
        Ok(())
    }

    /// Return the interface identifier assigned to a render edge.
    pub fn edge_id(&self, device: DeviceId, link: LinkId) -> Option<&str> {
        self.devices
            .get(&device)?
            .edges
            .values()
            .find(|e| e.link == link)
            .and_then(|e| e.id.as_deref())
    }

    /// Attach a finished compiled record to a device.
    pub fn set_config(
        &mut self,
        device: DeviceId,
        config: DeviceConfig,
    ) -> Result<(), CompileError> {
        self.device_mut(device)?.config = Some(config);
        Ok(())
    }

    fn device_mut(&mut self, device: DeviceId) -> Result<&mut RenderDevice, CompileError> {
        self.devices.get_mut(&device).ok_or(CompileError::DeviceNotFound(device))
    }
}

/// Turn a device label into a name safe to use as a file or folder name: alphanumeric characters,
/// dashes and dots are kept, every other run of characters collapses into a single underscore.
pub fn name_folder_safe(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_replaced = false;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
            out.push(c);
            last_replaced = false;
        } else if !last_replaced {
            out.push('_');
            last_replaced = true;
        }
    }
    out
}
