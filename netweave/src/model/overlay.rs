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

//! Per-overlay attribute types for the IP, OSPF and BGP overlays

use crate::model::types::{DeviceId, Ipv4Net};
use std::net::Ipv4Addr;

/// IP overlay data of a single physical link: one address per endpoint, and the subnet shared by
/// both (derived from the collision domain of the link).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpLink {
    pub(crate) src: (DeviceId, Ipv4Addr),
    pub(crate) dst: (DeviceId, Ipv4Addr),
    pub(crate) subnet: Ipv4Net,
}

impl IpLink {
    /// Return the subnet of the link.
    pub fn subnet(&self) -> Ipv4Net {
        self.subnet
    }

    /// Return the address of the given endpoint, or `None` if the device is not an endpoint of
    /// this link.
    pub fn addr(&self, device: DeviceId) -> Option<Ipv4Addr> {
        if self.src.0 == device {
            Some(self.src.1)
        } else if self.dst.0 == device {
            Some(self.dst.1)
        } else {
            None
        }
    }
}

/// OSPF overlay data of a single physical link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OspfLinkData {
    /// OSPF area the link belongs to
    pub area: u32,
    /// OSPF cost of the link
    pub cost: u32,
}

/// Type of a BGP session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BgpSessionType {
    /// iBGP session (between routers of the same AS)
    IBgp,
    /// eBGP session (between routers of different ASes)
    EBgp,
}

impl BgpSessionType {
    /// returns true if the session type is EBgp
    pub fn is_ebgp(&self) -> bool {
        matches!(self, Self::EBgp)
    }

    /// returns true if the session type is IBgp
    pub fn is_ibgp(&self) -> bool {
        !self.is_ebgp()
    }
}

/// Direction of an iBGP session in a route-reflection hierarchy, as seen from the session source:
/// `Down` points towards a route-reflector client, `Up` towards a route-reflector parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RrDirection {
    /// The destination is upstream (a route reflector of the source)
    Up,
    /// The destination is downstream (a client of the source)
    Down,
}

/// A directed BGP session in the BGP overlay, incident to its source device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BgpSession {
    /// Source device of the session
    pub src: DeviceId,
    /// Destination device of the session
    pub dst: DeviceId,
    /// Session type
    pub session_type: BgpSessionType,
    /// Route-reflection direction, `None` for plain peerings
    pub direction: Option<RrDirection>,
}
