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

//! Vendor specializations of the router compiler. Only the interface-building step varies across
//! vendors; all other steps are shared.

use crate::compiler::records::Interface;
use crate::error::CompileError;
use crate::model::{DeviceId, Ipv4Net, LinkId, NetworkModel, Syntax};

/// Loopback interface identifier appended by the Ios specialization
const LOOPBACK_ID: &str = "lo0";

/// Vendor specialization of the router compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    /// No vendor-specific adjustments: interface identifiers pass through from the render store
    Generic,
    /// Cisco IOS: per-interface OSPF cost annotation and an explicit loopback interface
    Ios,
    /// Juniper Junos: identical to the generic compiler
    Junos,
}

impl From<Syntax> for Vendor {
    fn from(syntax: Syntax) -> Self {
        match syntax {
            Syntax::Ios => Self::Ios,
            Syntax::Junos => Self::Junos,
        }
    }
}

/// Apply the vendor specialization to the generic interface set of a device. The base set carries
/// the originating physical link of every interface, so that specializations can look up
/// per-link overlay attributes. The returned interfaces are not yet sorted.
pub fn build_interfaces(
    vendor: Vendor,
    model: &NetworkModel,
    device: DeviceId,
    base: Vec<(LinkId, Interface)>,
) -> Result<Vec<Interface>, CompileError> {
    match vendor {
        Vendor::Generic | Vendor::Junos => Ok(base.into_iter().map(|(_, iface)| iface).collect()),
        Vendor::Ios => {
            let mut interfaces = Vec::with_capacity(base.len() + 1);
            for (link, mut iface) in base {
                iface.ospf_cost = model.ospf_link(link).map(|data| data.cost);
                interfaces.push(iface);
            }
            let loopback =
                model.loopback(device).ok_or(CompileError::MissingLoopback(device))?;
            interfaces.push(Interface {
                id: LOOPBACK_ID.to_string(),
                description: "Loopback".to_string(),
                ip_address: loopback,
                subnet: Ipv4Net::host(loopback),
                ospf_cost: None,
            });
            Ok(interfaces)
        }
    }
}
