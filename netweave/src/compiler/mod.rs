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

//! # Router Compiler
//!
//! The router compiler walks the overlay graphs and produces one [`DeviceConfig`] per device: the
//! ordered interface list, the OSPF link list, and the four BGP neighbor buckets. Every sequence
//! in the record is deterministically sorted by an explicit key, so two compilations of the same
//! unchanged model yield identical records.
//!
//! The compiler reads the overlay model and the interface identifiers already present in the
//! render store, and attaches the finished record back onto the store. Overlay non-membership is
//! not an error: a device outside the OSPF or BGP overlay simply gets no such section. Model
//! inconsistencies (a physical link without IP data, a missing loopback) are fatal and abort the
//! compilation of the device with the offending identity attached.
//!
//! Two links or sessions colliding on the same sort key (parallel OSPF links to one network,
//! duplicate BGP sessions to one neighbor) are rejected rather than silently merged.

mod records;
mod vendor;

pub use records::{
    BgpConfig, BgpNeighbor, DeviceConfig, Interface, OspfConfig, OspfLinkEntry,
    BGP_UPDATE_SOURCE, OSPF_PROCESS_ID,
};
pub use vendor::{build_interfaces, Vendor};

use crate::error::CompileError;
use crate::model::{BgpSessionType, Device, DeviceId, Ipv4Net, LinkId, NetworkModel, RrDirection};
use crate::render::RenderStore;
use log::*;
use std::collections::BTreeMap;

/// # Router Compiler
///
/// A pure per-device compiler over a read-only model. The vendor tag selects the interface
/// specialization; all other steps are identical across vendors.
///
/// ```rust
/// use netweave::compiler::{RouterCompiler, Vendor};
/// use netweave::example_models::SmallIsp;
/// use netweave::render::RenderStore;
///
/// let model = SmallIsp::model();
/// let mut store = RenderStore::from_model(&model);
/// let zurich = model.device_by_name("zurich").unwrap();
///
/// // assign pass-through interface identifiers, then compile
/// store.assign_edge_ids(zurich, (0..).map(|i| format!("eth{}", i))).unwrap();
/// RouterCompiler::new(&model, Vendor::Generic).compile(&mut store, zurich).unwrap();
///
/// let config = store.device(zurich).unwrap().config.as_ref().unwrap();
/// assert_eq!(config.interfaces.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RouterCompiler<'a> {
    model: &'a NetworkModel,
    vendor: Vendor,
}

impl<'a> RouterCompiler<'a> {
    /// Create a new compiler over the given model and vendor specialization.
    pub fn new(model: &'a NetworkModel, vendor: Vendor) -> Self {
        Self { model, vendor }
    }

    /// Compile one device and attach the finished record to its render store entry. The record
    /// is only attached if every step succeeds; a failing device leaves no partial output.
    pub fn compile(&self, store: &mut RenderStore, device: DeviceId) -> Result<(), CompileError> {
        let dev = self.device(device)?;
        debug!("Compiling configuration record for {}", dev.name);

        let base = self.interfaces(store, device)?;
        let mut interfaces = vendor::build_interfaces(self.vendor, self.model, device, base)?;
        interfaces.sort_by(|a, b| a.id.cmp(&b.id));

        let ospf = if self.model.is_ospf_member(device) {
            Some(self.ospf(device)?)
        } else {
            None
        };
        let bgp = if self.model.is_bgp_member(device) {
            Some(self.bgp(device)?)
        } else {
            None
        };

        store.set_config(device, DeviceConfig { interfaces, ospf, bgp })
    }

    /// Build the generic interface set: one descriptor per incident physical link, with the
    /// identifier resolved from the render store and the addressing from the IP overlay.
    fn interfaces(
        &self,
        store: &RenderStore,
        device: DeviceId,
    ) -> Result<Vec<(LinkId, Interface)>, CompileError> {
        let dev = self.device(device)?;
        let mut interfaces = Vec::new();
        for (link, neighbor) in self.model.links(device) {
            let ip_link =
                self.model.ip_link(link).ok_or(CompileError::MissingIpLink(device, link))?;
            let ip_address =
                ip_link.addr(device).ok_or(CompileError::MissingIpLink(device, link))?;
            let id = store
                .edge_id(device, link)
                .ok_or(CompileError::MissingInterfaceId(device, link))?
                .to_string();
            let neigh = self.device(neighbor)?;
            interfaces.push((
                link,
                Interface {
                    id,
                    description: format!("{} to {}", dev.name, neigh.name),
                    ip_address,
                    subnet: ip_link.subnet(),
                    ospf_cost: None,
                },
            ));
        }
        Ok(interfaces)
    }

    /// Build the OSPF section: one entry per incident OSPF link, keyed and ordered by the
    /// destination network. Two links colliding on the same network are rejected.
    fn ospf(&self, device: DeviceId) -> Result<OspfConfig, CompileError> {
        let mut links: BTreeMap<Ipv4Net, OspfLinkEntry> = BTreeMap::new();
        for (link, _, data) in self.model.ospf_links(device) {
            let ip_link =
                self.model.ip_link(link).ok_or(CompileError::MissingIpLink(device, link))?;
            let network = ip_link.subnet();
            let entry = OspfLinkEntry { network, area: data.area };
            if links.insert(network, entry).is_some() {
                return Err(CompileError::DuplicateOspfNetwork(device, network));
            }
        }
        Ok(OspfConfig {
            process_id: OSPF_PROCESS_ID,
            links: links.into_iter().map(|(_, entry)| entry).collect(),
        })
    }

    /// Build the BGP section: the advertised subnets of the AS, and every incident session
    /// classified into exactly one of the four neighbor buckets. Each bucket is an ordered map
    /// keyed by the neighbor name, so the resulting sequences are sorted and duplicates are
    /// rejected.
    fn bgp(&self, device: DeviceId) -> Result<BgpConfig, CompileError> {
        let dev = self.device(device)?;
        let advertise_subnets = self
            .model
            .asn_block(dev.asn)
            .ok_or(CompileError::MissingAsnBlock(dev.asn))?
            .to_vec();

        let mut ibgp_rr_clients: BTreeMap<String, BgpNeighbor> = BTreeMap::new();
        let mut ibgp_rr_parents: BTreeMap<String, BgpNeighbor> = BTreeMap::new();
        let mut ibgp_neighbors: BTreeMap<String, BgpNeighbor> = BTreeMap::new();
        let mut ebgp_neighbors: BTreeMap<String, BgpNeighbor> = BTreeMap::new();

        for session in self.model.bgp_sessions(device) {
            let neigh = self.device(session.dst)?;
            let loopback = self
                .model
                .loopback(session.dst)
                .ok_or(CompileError::MissingLoopback(session.dst))?;
            let entry = BgpNeighbor {
                neighbor: neigh.name.clone(),
                loopback,
                update_source: BGP_UPDATE_SOURCE.to_string(),
            };
            let bucket = match (session.session_type, session.direction) {
                (BgpSessionType::IBgp, Some(RrDirection::Down)) => &mut ibgp_rr_clients,
                (BgpSessionType::IBgp, Some(RrDirection::Up)) => &mut ibgp_rr_parents,
                (BgpSessionType::IBgp, None) => &mut ibgp_neighbors,
                (BgpSessionType::EBgp, _) => &mut ebgp_neighbors,
            };
            if bucket.insert(entry.neighbor.clone(), entry).is_some() {
                return Err(CompileError::DuplicateBgpSession(device, neigh.name.clone()));
            }
        }

        fn into_sorted(bucket: BTreeMap<String, BgpNeighbor>) -> Vec<BgpNeighbor> {
            bucket.into_iter().map(|(_, entry)| entry).collect()
        }

        Ok(BgpConfig {
            advertise_subnets,
            ibgp_rr_clients: into_sorted(ibgp_rr_clients),
            ibgp_rr_parents: into_sorted(ibgp_rr_parents),
            ibgp_neighbors: into_sorted(ibgp_neighbors),
            ebgp_neighbors: into_sorted(ebgp_neighbors),
        })
    }

    fn device(&self, device: DeviceId) -> Result<&Device, CompileError> {
        self.model.device(device).ok_or(CompileError::DeviceNotFound(device))
    }
}
