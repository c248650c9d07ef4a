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

use crate::model::{AsId, BgpSessionType::*, Ipv4Net, NetworkModel, RrDirection, Syntax};
use maplit::hashmap;
use std::net::Ipv4Addr;

/// # SmallIsp
///
/// A small two-AS model, fully addressed, with all four overlays populated:
///
/// - **AS 1**: `zurich` (Junos, route reflector), `basel` (Junos) and `bern` (IOS), fully meshed
///   in the physical overlay, OSPF area 0 on all internal links, iBGP route reflection with
///   `zurich` on top. `filesrv` is a non-router device attached to `zurich`.
/// - **AS 2**: `geneva` (IOS), connected to `basel` with an eBGP peering.
///
/// All routers live on the emulation host `"zoo"`, so one Junosphere pass and one Dynagen pass
/// over that host together compile the whole model.
#[derive(Debug)]
pub struct SmallIsp;

impl SmallIsp {
    /// Build the model.
    pub fn model() -> NetworkModel {
        let mut model = NetworkModel::new();

        // physical overlay
        let zurich = model.add_router("zurich", AsId(1), "zoo", Syntax::Junos);
        let basel = model.add_router("basel", AsId(1), "zoo", Syntax::Junos);
        let bern = model.add_router("bern", AsId(1), "zoo", Syntax::Ios);
        let geneva = model.add_router("geneva", AsId(2), "zoo", Syntax::Ios);
        let filesrv = model.add_server("filesrv", AsId(1), "zoo", Syntax::Junos);

        model.set_position(zurich, 100, 100).unwrap();
        model.set_position(basel, 200, 100).unwrap();
        model.set_position(bern, 150, 200).unwrap();
        model.set_position(geneva, 300, 200).unwrap();
        model.set_position(filesrv, 100, 300).unwrap();

        let zurich_basel = model.add_link(zurich, basel).unwrap();
        let zurich_bern = model.add_link(zurich, bern).unwrap();
        let basel_bern = model.add_link(basel, bern).unwrap();
        let basel_geneva = model.add_link(basel, geneva).unwrap();
        let zurich_filesrv = model.add_link(zurich, filesrv).unwrap();

        // IP overlay
        model.set_loopback(zurich, addr("192.168.0.1")).unwrap();
        model.set_loopback(basel, addr("192.168.0.2")).unwrap();
        model.set_loopback(bern, addr("192.168.0.3")).unwrap();
        model.set_loopback(geneva, addr("192.168.1.1")).unwrap();

        model
            .set_ip_link(zurich_basel, addr("10.0.0.1"), addr("10.0.0.2"), net("10.0.0.0", 30))
            .unwrap();
        model
            .set_ip_link(zurich_bern, addr("10.0.0.5"), addr("10.0.0.6"), net("10.0.0.4", 30))
            .unwrap();
        model
            .set_ip_link(basel_bern, addr("10.0.0.9"), addr("10.0.0.10"), net("10.0.0.8", 30))
            .unwrap();
        model
            .set_ip_link(basel_geneva, addr("10.1.0.1"), addr("10.1.0.2"), net("10.1.0.0", 30))
            .unwrap();
        model
            .set_ip_link(zurich_filesrv, addr("10.0.1.1"), addr("10.0.1.2"), net("10.0.1.0", 24))
            .unwrap();

        model.set_asn_blocks(hashmap! {
            AsId(1) => vec![net("10.0.0.0", 16)],
            AsId(2) => vec![net("10.1.0.0", 16)],
        });

        // OSPF overlay: area 0 inside AS 1
        model.enable_ospf(zurich).unwrap();
        model.enable_ospf(basel).unwrap();
        model.enable_ospf(bern).unwrap();
        model.set_ospf_link(zurich_basel, 0, 10).unwrap();
        model.set_ospf_link(zurich_bern, 0, 20).unwrap();
        model.set_ospf_link(basel_bern, 0, 10).unwrap();

        // BGP overlay: route reflection in AS 1, one eBGP peering towards AS 2
        model.enable_bgp(zurich).unwrap();
        model.enable_bgp(basel).unwrap();
        model.enable_bgp(bern).unwrap();
        model.enable_bgp(geneva).unwrap();
        model.add_bgp_session(zurich, basel, IBgp, Some(RrDirection::Down)).unwrap();
        model.add_bgp_session(basel, zurich, IBgp, Some(RrDirection::Up)).unwrap();
        model.add_bgp_session(zurich, bern, IBgp, Some(RrDirection::Down)).unwrap();
        model.add_bgp_session(bern, zurich, IBgp, Some(RrDirection::Up)).unwrap();
        model.add_bgp_session(basel, geneva, EBgp, None).unwrap();
        model.add_bgp_session(geneva, basel, EBgp, None).unwrap();

        model
    }
}

fn addr(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

fn net(s: &str, prefix_len: u8) -> Ipv4Net {
    Ipv4Net::new(s.parse().unwrap(), prefix_len)
}
