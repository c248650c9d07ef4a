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

//! # Overlay Snapshots

use crate::Result;
use netweave::model::{DeviceId, NetworkModel};
use serde::Serialize;
use std::collections::HashMap;

/// The overlay to snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Physical topology
    Phy,
    /// IP addressing
    Ip,
    /// OSPF adjacency
    Ospf,
    /// BGP peering
    Bgp,
}

impl Overlay {
    /// Name of the overlay, as used in the serialized snapshot
    pub fn name(&self) -> &'static str {
        match self {
            Self::Phy => "phy",
            Self::Ip => "ip",
            Self::Ospf => "ospf",
            Self::Bgp => "bgp",
        }
    }
}

/// A single node of a snapshot
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeData {
    /// Human readable label of the device
    pub label: String,
    /// Device type (`"router"` or `"server"`)
    pub device_type: String,
    /// Canvas x coordinate, normalized so the smallest coordinate of the snapshot is zero
    pub x: i32,
    /// Canvas y coordinate, normalized so the smallest coordinate of the snapshot is zero
    pub y: i32,
}

/// A single link of a snapshot. `source` and `target` index into the node list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinkData {
    /// Index of the source node
    pub source: usize,
    /// Index of the target node
    pub target: usize,
    /// Subnet of the link (IP overlay only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    /// OSPF area of the link (OSPF overlay only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<u32>,
    /// Session type, `"ibgp"` or `"ebgp"` (BGP overlay only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_type: Option<String>,
}

/// # Overlay Snapshot
///
/// The serializable node-link representation of one overlay. Nodes are the overlay members in
/// ascending device index order; links carry the overlay attribute relevant to the snapshot.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Snapshot {
    /// Name of the snapshotted overlay
    pub overlay: String,
    /// Nodes of the overlay
    pub nodes: Vec<NodeData>,
    /// Links of the overlay
    pub links: Vec<LinkData>,
}

impl Snapshot {
    /// Create the snapshot of one overlay of the model.
    pub fn new(model: &NetworkModel, overlay: Overlay) -> Self {
        let members: Vec<DeviceId> = model
            .devices()
            .into_iter()
            .filter(|d| match overlay {
                Overlay::Phy | Overlay::Ip => true,
                Overlay::Ospf => model.is_ospf_member(*d),
                Overlay::Bgp => model.is_bgp_member(*d),
            })
            .collect();
        let index: HashMap<DeviceId, usize> =
            members.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let nodes = Self::nodes(model, &members);
        let links = match overlay {
            Overlay::Phy => model
                .all_links()
                .into_iter()
                .map(|(_, a, b)| LinkData {
                    source: index[&a],
                    target: index[&b],
                    subnet: None,
                    area: None,
                    session_type: None,
                })
                .collect(),
            Overlay::Ip => model
                .all_links()
                .into_iter()
                .filter_map(|(link, a, b)| {
                    model.ip_link(link).map(|ip| LinkData {
                        source: index[&a],
                        target: index[&b],
                        subnet: Some(ip.subnet().to_string()),
                        area: None,
                        session_type: None,
                    })
                })
                .collect(),
            Overlay::Ospf => model
                .all_links()
                .into_iter()
                .filter_map(|(link, a, b)| {
                    model.ospf_link(link).map(|data| LinkData {
                        source: index[&a],
                        target: index[&b],
                        subnet: None,
                        area: Some(data.area),
                        session_type: None,
                    })
                })
                .collect(),
            Overlay::Bgp => members
                .iter()
                .flat_map(|d| model.bgp_sessions(*d))
                .map(|session| LinkData {
                    source: index[&session.src],
                    target: index[&session.dst],
                    subnet: None,
                    area: None,
                    session_type: Some(
                        if session.session_type.is_ibgp() { "ibgp" } else { "ebgp" }.to_string(),
                    ),
                })
                .collect(),
        };

        Self { overlay: overlay.name().to_string(), nodes, links }
    }

    /// Build the node list, normalizing the canvas coordinates so that the smallest x and y of
    /// the snapshot are zero.
    fn nodes(model: &NetworkModel, members: &[DeviceId]) -> Vec<NodeData> {
        let positions: Vec<(i32, i32)> = members
            .iter()
            .map(|d| model.device(*d).and_then(|dev| dev.position).unwrap_or((0, 0)))
            .collect();
        let x_min = positions.iter().map(|(x, _)| *x).min().unwrap_or(0);
        let y_min = positions.iter().map(|(_, y)| *y).min().unwrap_or(0);

        members
            .iter()
            .zip(positions.iter())
            .map(|(d, (x, y))| {
                let dev = model.device(*d).expect("member of the overlay");
                NodeData {
                    label: dev.name.clone(),
                    device_type: if dev.is_router { "router" } else { "server" }.to_string(),
                    x: x - x_min,
                    y: y - y_min,
                }
            })
            .collect()
    }

    /// Serialize the snapshot to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the snapshot to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
