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

//! The compiled configuration record and its parts

use crate::model::Ipv4Net;
use std::net::Ipv4Addr;

/// OSPF process identifier written into every [`OspfConfig`]. A single process per router is
/// currently the only supported mode.
pub const OSPF_PROCESS_ID: u32 = 1;

/// Update source of every BGP session: sessions are sourced from the loopback interface, never
/// from a physical interface.
pub const BGP_UPDATE_SOURCE: &str = "loopback 0";

/// Per-device output of the router compiler. Constructed fresh per compilation run, attached to
/// the device's render store entry, and consumed once by the rendering backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Interface descriptors, ordered by interface identifier ascending
    pub interfaces: Vec<Interface>,
    /// OSPF section, present only if the device is an OSPF overlay member
    pub ospf: Option<OspfConfig>,
    /// BGP section, present only if the device is a BGP overlay member
    pub bgp: Option<BgpConfig>,
}

/// A single interface of a compiled device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Interface identifier: either the pass-through value from the render store, or a
    /// platform-specific synthesized name
    pub id: String,
    /// Human readable description of the link
    pub description: String,
    /// Address of this endpoint
    pub ip_address: Ipv4Addr,
    /// Subnet of the link
    pub subnet: Ipv4Net,
    /// OSPF cost of the link, annotated by vendor specializations that require it
    pub ospf_cost: Option<u32>,
}

/// OSPF section of a compiled device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OspfConfig {
    /// Process identifier, always [`OSPF_PROCESS_ID`]
    pub process_id: u32,
    /// OSPF links, ordered by destination network ascending
    pub links: Vec<OspfLinkEntry>,
}

/// A single OSPF link of a compiled device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OspfLinkEntry {
    /// Destination network of the link
    pub network: Ipv4Net,
    /// OSPF area of the link
    pub area: u32,
}

/// BGP section of a compiled device. Every BGP session incident to the device appears in exactly
/// one of the four neighbor buckets; each bucket is ordered by neighbor name ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BgpConfig {
    /// Subnet blocks advertised by the AS of the device
    pub advertise_subnets: Vec<Ipv4Net>,
    /// Route-reflector clients (iBGP sessions pointing down)
    pub ibgp_rr_clients: Vec<BgpNeighbor>,
    /// Route-reflector parents (iBGP sessions pointing up)
    pub ibgp_rr_parents: Vec<BgpNeighbor>,
    /// Plain iBGP peerings
    pub ibgp_neighbors: Vec<BgpNeighbor>,
    /// eBGP peerings
    pub ebgp_neighbors: Vec<BgpNeighbor>,
}

/// A single BGP neighbor of a compiled device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BgpNeighbor {
    /// Name of the neighbor device
    pub neighbor: String,
    /// Loopback address of the neighbor (the session endpoint)
    pub loopback: Ipv4Addr,
    /// Interface the session is sourced from, always [`BGP_UPDATE_SOURCE`]
    pub update_source: String,
}
