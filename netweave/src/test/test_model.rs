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

use crate::example_models::SmallIsp;
use crate::model::{
    AsId, BgpSessionType::*, Ipv4Net, ModelError, NetworkModel, RrDirection, Syntax,
};

fn addr(s: &str) -> std::net::Ipv4Addr {
    s.parse().unwrap()
}

#[test]
fn device_queries() {
    let model = SmallIsp::model();
    let zurich = model.device_by_name("zurich").unwrap();
    let dev = model.device(zurich).unwrap();
    assert_eq!(dev.name, "zurich");
    assert_eq!(dev.asn, AsId(1));
    assert_eq!(dev.host, "zoo");
    assert_eq!(dev.syntax, Syntax::Junos);
    assert!(dev.is_router);
    assert!(model.device_by_name("lausanne").is_none());
}

#[test]
fn router_selection() {
    let model = SmallIsp::model();
    let junos: Vec<String> = model
        .routers("zoo", Syntax::Junos)
        .into_iter()
        .map(|d| model.device(d).unwrap().name.clone())
        .collect();
    let ios: Vec<String> = model
        .routers("zoo", Syntax::Ios)
        .into_iter()
        .map(|d| model.device(d).unwrap().name.clone())
        .collect();
    // filesrv is a non-router and must not appear, even though it is junos on the same host
    assert_eq!(junos, vec!["zurich", "basel"]);
    assert_eq!(ios, vec!["bern", "geneva"]);
    assert!(model.routers("unknown_host", Syntax::Junos).is_empty());
}

#[test]
fn incident_links_sorted() {
    let model = SmallIsp::model();
    let zurich = model.device_by_name("zurich").unwrap();
    let links = model.links(zurich);
    assert_eq!(links.len(), 3);
    // ascending link index order
    for pair in links.windows(2) {
        assert!(pair[0].0 < pair[1].0);
    }
    let neighbors: Vec<String> =
        links.iter().map(|(_, n)| model.device(*n).unwrap().name.clone()).collect();
    assert_eq!(neighbors, vec!["basel", "bern", "filesrv"]);
}

#[test]
fn ip_link_addresses() {
    let model = SmallIsp::model();
    let zurich = model.device_by_name("zurich").unwrap();
    let basel = model.device_by_name("basel").unwrap();
    let geneva = model.device_by_name("geneva").unwrap();
    let (link, _) = model.links(zurich)[0];
    let ip_link = model.ip_link(link).unwrap();
    assert_eq!(ip_link.subnet(), Ipv4Net::new(addr("10.0.0.0"), 30));
    assert_eq!(ip_link.addr(zurich), Some(addr("10.0.0.1")));
    assert_eq!(ip_link.addr(basel), Some(addr("10.0.0.2")));
    assert_eq!(ip_link.addr(geneva), None);
}

#[test]
fn overlay_membership() {
    let model = SmallIsp::model();
    let bern = model.device_by_name("bern").unwrap();
    let geneva = model.device_by_name("geneva").unwrap();
    let filesrv = model.device_by_name("filesrv").unwrap();
    assert!(model.is_ospf_member(bern));
    assert!(!model.is_ospf_member(geneva));
    assert!(model.is_bgp_member(geneva));
    assert!(!model.is_bgp_member(filesrv));
}

#[test]
fn ospf_links_require_membership() {
    let mut model = NetworkModel::new();
    let r1 = model.add_router("r1", AsId(1), "lab", Syntax::Ios);
    let r2 = model.add_router("r2", AsId(1), "lab", Syntax::Ios);
    let link = model.add_link(r1, r2).unwrap();

    assert_eq!(model.set_ospf_link(link, 0, 10), Err(ModelError::NotOspfMember(r1)));
    model.enable_ospf(r1).unwrap();
    assert_eq!(model.set_ospf_link(link, 0, 10), Err(ModelError::NotOspfMember(r2)));
    model.enable_ospf(r2).unwrap();
    model.set_ospf_link(link, 0, 10).unwrap();
    // a link can carry OSPF data only once
    assert_eq!(model.set_ospf_link(link, 0, 20), Err(ModelError::OspfLinkExists(link)));
}

#[test]
fn bgp_sessions_require_membership() {
    let mut model = NetworkModel::new();
    let r1 = model.add_router("r1", AsId(1), "lab", Syntax::Ios);
    let r2 = model.add_router("r2", AsId(1), "lab", Syntax::Ios);

    assert_eq!(
        model.add_bgp_session(r1, r2, IBgp, Some(RrDirection::Down)),
        Err(ModelError::NotBgpMember(r1))
    );
    model.enable_bgp(r1).unwrap();
    assert_eq!(
        model.add_bgp_session(r1, r2, IBgp, Some(RrDirection::Down)),
        Err(ModelError::NotBgpMember(r2))
    );
    model.enable_bgp(r2).unwrap();
    model.add_bgp_session(r1, r2, IBgp, Some(RrDirection::Down)).unwrap();
    assert_eq!(model.bgp_sessions(r1).len(), 1);
    assert!(model.bgp_sessions(r2).is_empty());
}

#[test]
fn ip_link_data_is_unique() {
    let mut model = NetworkModel::new();
    let r1 = model.add_router("r1", AsId(1), "lab", Syntax::Ios);
    let r2 = model.add_router("r2", AsId(1), "lab", Syntax::Ios);
    let link = model.add_link(r1, r2).unwrap();
    let subnet = Ipv4Net::new(addr("10.0.0.0"), 30);
    model.set_ip_link(link, addr("10.0.0.1"), addr("10.0.0.2"), subnet).unwrap();
    assert_eq!(
        model.set_ip_link(link, addr("10.0.0.1"), addr("10.0.0.2"), subnet),
        Err(ModelError::IpLinkExists(link))
    );
}
