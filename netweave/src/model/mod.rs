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

//! # Overlay Network Model
//!
//! The model is a family of labeled graphs over one shared set of device identifiers. Each
//! overlay carries the attributes of a single concern:
//!
//! - **Physical**: the device records and the links between them. This overlay owns the
//!   identifier space ([`DeviceId`], [`LinkId`]); all other overlays reference it.
//! - **IP**: per-device loopback addresses, per-link endpoint addresses and subnets, and the
//!   global AS-number to advertised-subnet-block mapping.
//! - **OSPF**: the member set and per-link area/cost. A link can only carry OSPF data if both of
//!   its endpoints are members.
//! - **BGP**: the member set and the directed, typed sessions between members.
//!
//! The compiler consumes the model exclusively through the read queries; the builder methods
//! exist so that models can be constructed in tests, examples and by upstream tooling. The model
//! is treated as immutable for the duration of a compilation pass.
//!
//! ```rust
//! use netweave::model::{AsId, Ipv4Net, NetworkModel, Syntax};
//! use maplit::hashmap;
//!
//! let mut model = NetworkModel::new();
//! let r1 = model.add_router("r1", AsId(1), "lab", Syntax::Junos);
//! let r2 = model.add_router("r2", AsId(1), "lab", Syntax::Junos);
//! let link = model.add_link(r1, r2).unwrap();
//! model
//!     .set_ip_link(
//!         link,
//!         "10.0.0.1".parse().unwrap(),
//!         "10.0.0.2".parse().unwrap(),
//!         Ipv4Net::new("10.0.0.0".parse().unwrap(), 30),
//!     )
//!     .unwrap();
//! model.set_asn_blocks(hashmap! {
//!     AsId(1) => vec![Ipv4Net::new("10.0.0.0".parse().unwrap(), 16)],
//! });
//!
//! assert_eq!(model.links(r1), vec![(link, r2)]);
//! ```

mod overlay;
mod types;

pub use overlay::{BgpSession, BgpSessionType, IpLink, OspfLinkData, RrDirection};
pub use types::{AsId, Device, DeviceId, Ipv4Net, LinkId, ModelError, PhyGraph, Syntax};

use itertools::Itertools;
use petgraph::stable_graph::StableUnGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;

/// # Overlay Network Model
///
/// Holds the physical overlay graph and the attribute maps of the IP, OSPF and BGP overlays. See
/// the [module documentation](crate::model) for the overall structure.
#[derive(Debug, Clone)]
pub struct NetworkModel {
    phy: PhyGraph,
    loopbacks: HashMap<DeviceId, Ipv4Addr>,
    ip_links: HashMap<LinkId, IpLink>,
    asn_blocks: HashMap<AsId, Vec<Ipv4Net>>,
    ospf_members: HashSet<DeviceId>,
    ospf_links: HashMap<LinkId, OspfLinkData>,
    bgp_members: HashSet<DeviceId>,
    bgp_sessions: HashMap<DeviceId, Vec<BgpSession>>,
}

impl Default for NetworkModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self {
            phy: StableUnGraph::with_capacity(0, 0),
            loopbacks: HashMap::new(),
            ip_links: HashMap::new(),
            asn_blocks: HashMap::new(),
            ospf_members: HashSet::new(),
            ospf_links: HashMap::new(),
            bgp_members: HashSet::new(),
            bgp_sessions: HashMap::new(),
        }
    }

    /// Add a router to the physical overlay and return its identifier.
    pub fn add_router<S: Into<String>, H: Into<String>>(
        &mut self,
        name: S,
        asn: AsId,
        host: H,
        syntax: Syntax,
    ) -> DeviceId {
        self.phy.add_node(Device {
            name: name.into(),
            asn,
            host: host.into(),
            syntax,
            is_router: true,
            position: None,
        })
    }

    /// Add a non-router device (e.g. a server) to the physical overlay and return its identifier.
    /// Non-routers are never selected by a platform orchestrator.
    pub fn add_server<S: Into<String>, H: Into<String>>(
        &mut self,
        name: S,
        asn: AsId,
        host: H,
        syntax: Syntax,
    ) -> DeviceId {
        self.phy.add_node(Device {
            name: name.into(),
            asn,
            host: host.into(),
            syntax,
            is_router: false,
            position: None,
        })
    }

    /// Add a physical link between two devices and return its identifier.
    pub fn add_link(&mut self, a: DeviceId, b: DeviceId) -> Result<LinkId, ModelError> {
        if !self.phy.contains_node(a) {
            return Err(ModelError::DeviceNotFound(a));
        }
        if !self.phy.contains_node(b) {
            return Err(ModelError::DeviceNotFound(b));
        }
        Ok(self.phy.add_edge(a, b, ()))
    }

    /// Set the canvas position of a device for the visualization front end.
    pub fn set_position(&mut self, device: DeviceId, x: i32, y: i32) -> Result<(), ModelError> {
        self.phy
            .node_weight_mut(device)
            .ok_or(ModelError::DeviceNotFound(device))?
            .position = Some((x, y));
        Ok(())
    }

    /// Set the loopback address of a device in the IP overlay.
    pub fn set_loopback(&mut self, device: DeviceId, addr: Ipv4Addr) -> Result<(), ModelError> {
        if !self.phy.contains_node(device) {
            return Err(ModelError::DeviceNotFound(device));
        }
        self.loopbacks.insert(device, addr);
        Ok(())
    }

    /// Attach IP overlay data to a physical link. `src_addr` and `dst_addr` are the addresses of
    /// the link endpoints in the order the link was created. Fails if the link does not exist or
    /// already carries IP data.
    pub fn set_ip_link(
        &mut self,
        link: LinkId,
        src_addr: Ipv4Addr,
        dst_addr: Ipv4Addr,
        subnet: Ipv4Net,
    ) -> Result<(), ModelError> {
        let (src, dst) = self.phy.edge_endpoints(link).ok_or(ModelError::LinkNotFound(link))?;
        if self.ip_links.contains_key(&link) {
            return Err(ModelError::IpLinkExists(link));
        }
        self.ip_links.insert(link, IpLink { src: (src, src_addr), dst: (dst, dst_addr), subnet });
        Ok(())
    }

    /// Set the global AS-number to advertised-subnet-block mapping.
    pub fn set_asn_blocks(&mut self, blocks: HashMap<AsId, Vec<Ipv4Net>>) {
        self.asn_blocks = blocks;
    }

    /// Add a device to the OSPF overlay.
    pub fn enable_ospf(&mut self, device: DeviceId) -> Result<(), ModelError> {
        if !self.phy.contains_node(device) {
            return Err(ModelError::DeviceNotFound(device));
        }
        self.ospf_members.insert(device);
        Ok(())
    }

    /// Attach OSPF overlay data to a physical link. Both endpoints must already be OSPF members;
    /// an OSPF link between non-members cannot exist.
    pub fn set_ospf_link(&mut self, link: LinkId, area: u32, cost: u32) -> Result<(), ModelError> {
        let (src, dst) = self.phy.edge_endpoints(link).ok_or(ModelError::LinkNotFound(link))?;
        if !self.ospf_members.contains(&src) {
            return Err(ModelError::NotOspfMember(src));
        }
        if !self.ospf_members.contains(&dst) {
            return Err(ModelError::NotOspfMember(dst));
        }
        if self.ospf_links.contains_key(&link) {
            return Err(ModelError::OspfLinkExists(link));
        }
        self.ospf_links.insert(link, OspfLinkData { area, cost });
        Ok(())
    }

    /// Add a device to the BGP overlay.
    pub fn enable_bgp(&mut self, device: DeviceId) -> Result<(), ModelError> {
        if !self.phy.contains_node(device) {
            return Err(ModelError::DeviceNotFound(device));
        }
        self.bgp_members.insert(device);
        Ok(())
    }

    /// Add a directed BGP session from `src` to `dst`. Both devices must already be BGP members.
    pub fn add_bgp_session(
        &mut self,
        src: DeviceId,
        dst: DeviceId,
        session_type: BgpSessionType,
        direction: Option<RrDirection>,
    ) -> Result<(), ModelError> {
        if !self.bgp_members.contains(&src) {
            return Err(ModelError::NotBgpMember(src));
        }
        if !self.bgp_members.contains(&dst) {
            return Err(ModelError::NotBgpMember(dst));
        }
        self.bgp_sessions
            .entry(src)
            .or_insert_with(Vec::new)
            .push(BgpSession { src, dst, session_type, direction });
        Ok(())
    }

    // ------------
    // Read queries
    // ------------

    /// Return the device record, or `None` if the device does not exist.
    pub fn device(&self, device: DeviceId) -> Option<&Device> {
        self.phy.node_weight(device)
    }

    /// Return the identifier of the device with the given name.
    pub fn device_by_name(&self, name: &str) -> Option<DeviceId> {
        self.phy.node_indices().find(|d| self.phy[*d].name == name)
    }

    /// Return all device identifiers, in ascending index order.
    pub fn devices(&self) -> Vec<DeviceId> {
        self.phy.node_indices().collect()
    }

    /// Return all routers assigned to the given host and vendor syntax, in ascending index order.
    /// This is the device eligibility filter of the platform orchestrators.
    pub fn routers(&self, host: &str, syntax: Syntax) -> Vec<DeviceId> {
        self.phy
            .node_indices()
            .filter(|d| {
                let dev = &self.phy[*d];
                dev.is_router && dev.host == host && dev.syntax == syntax
            })
            .collect()
    }

    /// Return all physical links incident to a device as `(link, neighbor)` pairs, in ascending
    /// link index order.
    pub fn links(&self, device: DeviceId) -> Vec<(LinkId, DeviceId)> {
        self.phy
            .edges(device)
            .map(|e| {
                let neighbor = if e.source() == device { e.target() } else { e.source() };
                (e.id(), neighbor)
            })
            .sorted_by_key(|&(link, _)| link)
            .collect()
    }

    /// Return all physical links of the model as `(link, src, dst)` triples, in ascending link
    /// index order.
    pub fn all_links(&self) -> Vec<(LinkId, DeviceId, DeviceId)> {
        self.phy.edge_references().map(|e| (e.id(), e.source(), e.target())).collect()
    }

    /// Return the endpoints of a physical link.
    pub fn link_endpoints(&self, link: LinkId) -> Option<(DeviceId, DeviceId)> {
        self.phy.edge_endpoints(link)
    }

    /// Return the loopback address of a device in the IP overlay.
    pub fn loopback(&self, device: DeviceId) -> Option<Ipv4Addr> {
        self.loopbacks.get(&device).copied()
    }

    /// Return the IP overlay data of a physical link.
    pub fn ip_link(&self, link: LinkId) -> Option<&IpLink> {
        self.ip_links.get(&link)
    }

    /// Return the advertised subnet blocks of an AS.
    pub fn asn_block(&self, asn: AsId) -> Option<&[Ipv4Net]> {
        self.asn_blocks.get(&asn).map(|b| b.as_slice())
    }

    /// Returns true if the device is a member of the OSPF overlay.
    pub fn is_ospf_member(&self, device: DeviceId) -> bool {
        self.ospf_members.contains(&device)
    }

    /// Return the OSPF overlay data of a physical link, or `None` if the link is not part of the
    /// OSPF overlay.
    pub fn ospf_link(&self, link: LinkId) -> Option<&OspfLinkData> {
        self.ospf_links.get(&link)
    }

    /// Return all OSPF overlay links incident to a device as `(link, neighbor, data)` triples, in
    /// ascending link index order.
    pub fn ospf_links(&self, device: DeviceId) -> Vec<(LinkId, DeviceId, OspfLinkData)> {
        self.links(device)
            .into_iter()
            .filter_map(|(link, neighbor)| {
                self.ospf_links.get(&link).map(|data| (link, neighbor, *data))
            })
            .collect()
    }

    /// Returns true if the device is a member of the BGP overlay.
    pub fn is_bgp_member(&self, device: DeviceId) -> bool {
        self.bgp_members.contains(&device)
    }

    /// Return all BGP sessions originating at a device.
    pub fn bgp_sessions(&self, device: DeviceId) -> &[BgpSession] {
        self.bgp_sessions.get(&device).map(|s| s.as_slice()).unwrap_or(&[])
    }
}
