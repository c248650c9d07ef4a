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

//! Module containing all type definitions of the overlay model

use petgraph::prelude::*;
use petgraph::stable_graph::StableUnGraph;
use std::fmt;
use std::net::Ipv4Addr;
use thiserror::Error;

type IndexType = u32;
/// Device identification (and index into the physical overlay graph)
pub type DeviceId = NodeIndex<IndexType>;
/// Link identification (and index into the physical overlay graph)
pub type LinkId = EdgeIndex<IndexType>;
/// AS Number
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct AsId(pub u32);
/// Physical overlay graph. All other overlays share its device and link identifiers.
pub type PhyGraph = StableUnGraph<Device, ()>;

/// IPv4 network in CIDR notation. Ordered first by network address, then by prefix length, which
/// is the sort key used for all network-ordered sequences in the compiled records.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Ipv4Net {
    addr: Ipv4Addr,
    prefix_len: u8,
}

impl Ipv4Net {
    /// Create a new network from an address and a prefix length.
    pub fn new(addr: Ipv4Addr, prefix_len: u8) -> Self {
        Self { addr, prefix_len }
    }

    /// Create the full-length host network (`/32`) of a single address.
    pub fn host(addr: Ipv4Addr) -> Self {
        Self { addr, prefix_len: 32 }
    }

    /// Return the network address.
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// Return the prefix length.
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }
}

impl fmt::Display for Ipv4Net {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

/// Vendor configuration syntax of a device. The syntax tag selects which vendor specialization of
/// the router compiler a platform orchestrator applies to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    /// Cisco IOS style configuration
    Ios,
    /// Juniper Junos style configuration
    Junos,
}

/// A device in the physical overlay. Immutable for the duration of a compilation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Human readable label
    pub name: String,
    /// AS number the device belongs to
    pub asn: AsId,
    /// Emulation host / platform target the device is assigned to
    pub host: String,
    /// Vendor configuration syntax
    pub syntax: Syntax,
    /// Whether the device acts as a router (only routers are compiled)
    pub is_router: bool,
    /// Canvas position for the visualization front end
    pub position: Option<(i32, i32)>,
}

/// Model Errors
#[derive(Error, Debug, PartialEq)]
pub enum ModelError {
    /// Device is not present in the physical overlay
    #[error("Device was not found in the physical overlay: {0:?}")]
    DeviceNotFound(DeviceId),
    /// Link is not present in the physical overlay
    #[error("Link was not found in the physical overlay: {0:?}")]
    LinkNotFound(LinkId),
    /// OSPF data can only be attached to links between two OSPF members
    #[error("Device {0:?} is not a member of the OSPF overlay")]
    NotOspfMember(DeviceId),
    /// BGP sessions can only connect two BGP members
    #[error("Device {0:?} is not a member of the BGP overlay")]
    NotBgpMember(DeviceId),
    /// The link already carries IP overlay data
    #[error("IP overlay data for link {0:?} is already set")]
    IpLinkExists(LinkId),
    /// The link already carries OSPF overlay data
    #[error("OSPF overlay data for link {0:?} is already set")]
    OspfLinkExists(LinkId),
}
