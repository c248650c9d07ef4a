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

use crate::compiler::{RouterCompiler, Vendor, BGP_UPDATE_SOURCE, OSPF_PROCESS_ID};
use crate::error::CompileError;
use crate::model::{
    AsId, BgpSessionType::*, DeviceId, Ipv4Net, LinkId, NetworkModel, RrDirection, Syntax,
};
use crate::render::RenderStore;
use maplit::hashmap;
use std::net::Ipv4Addr;

fn addr(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

fn net(s: &str, prefix_len: u8) -> Ipv4Net {
    Ipv4Net::new(s.parse().unwrap(), prefix_len)
}

/// Device `d` with physical links to `n1` (10.0.0.0/30) and `n2` (10.0.0.4/30), OSPF area 0 on
/// both links (costs 10 and 20), one iBGP session pointing down to `n1` and one eBGP session to
/// `n2`.
fn scenario() -> (NetworkModel, DeviceId, (LinkId, LinkId)) {
    let mut model = NetworkModel::new();
    let d = model.add_router("d", AsId(1), "lab", Syntax::Ios);
    let n1 = model.add_router("n1", AsId(1), "lab", Syntax::Ios);
    let n2 = model.add_router("n2", AsId(2), "lab", Syntax::Ios);
    let l1 = model.add_link(d, n1).unwrap();
    let l2 = model.add_link(d, n2).unwrap();

    model.set_loopback(d, addr("192.168.0.1")).unwrap();
    model.set_loopback(n1, addr("192.168.0.2")).unwrap();
    model.set_loopback(n2, addr("192.168.1.1")).unwrap();
    model.set_ip_link(l1, addr("10.0.0.1"), addr("10.0.0.2"), net("10.0.0.0", 30)).unwrap();
    model.set_ip_link(l2, addr("10.0.0.5"), addr("10.0.0.6"), net("10.0.0.4", 30)).unwrap();
    model.set_asn_blocks(hashmap! {
        AsId(1) => vec![net("10.0.0.0", 16)],
        AsId(2) => vec![net("10.1.0.0", 16)],
    });

    model.enable_ospf(d).unwrap();
    model.enable_ospf(n1).unwrap();
    model.enable_ospf(n2).unwrap();
    model.set_ospf_link(l1, 0, 10).unwrap();
    model.set_ospf_link(l2, 0, 20).unwrap();

    model.enable_bgp(d).unwrap();
    model.enable_bgp(n1).unwrap();
    model.enable_bgp(n2).unwrap();
    model.add_bgp_session(d, n1, IBgp, Some(RrDirection::Down)).unwrap();
    model.add_bgp_session(d, n2, EBgp, None).unwrap();

    (model, d, (l1, l2))
}

fn eth_names() -> impl Iterator<Item = String> {
    (0..).map(|i| format!("eth{}", i))
}

#[test]
fn generic_interfaces() {
    let (model, d, _) = scenario();
    let mut store = RenderStore::from_model(&model);
    store.assign_edge_ids(d, eth_names()).unwrap();
    RouterCompiler::new(&model, Vendor::Generic).compile(&mut store, d).unwrap();

    let config = store.device(d).unwrap().config.as_ref().unwrap();
    assert_eq!(config.interfaces.len(), 2);

    let eth0 = &config.interfaces[0];
    assert_eq!(eth0.id, "eth0");
    assert_eq!(eth0.description, "d to n1");
    assert_eq!(eth0.ip_address, addr("10.0.0.1"));
    assert_eq!(eth0.subnet, net("10.0.0.0", 30));
    assert_eq!(eth0.ospf_cost, None);

    let eth1 = &config.interfaces[1];
    assert_eq!(eth1.id, "eth1");
    assert_eq!(eth1.description, "d to n2");
    assert_eq!(eth1.ip_address, addr("10.0.0.5"));
    assert_eq!(eth1.subnet, net("10.0.0.4", 30));
    assert_eq!(eth1.ospf_cost, None);
}

#[test]
fn ospf_section() {
    let (model, d, _) = scenario();
    let mut store = RenderStore::from_model(&model);
    store.assign_edge_ids(d, eth_names()).unwrap();
    RouterCompiler::new(&model, Vendor::Generic).compile(&mut store, d).unwrap();

    let config = store.device(d).unwrap().config.as_ref().unwrap();
    let ospf = config.ospf.as_ref().unwrap();
    assert_eq!(ospf.process_id, OSPF_PROCESS_ID);
    assert_eq!(ospf.links.len(), 2);
    assert_eq!(ospf.links[0].network, net("10.0.0.0", 30));
    assert_eq!(ospf.links[0].area, 0);
    assert_eq!(ospf.links[1].network, net("10.0.0.4", 30));
    assert_eq!(ospf.links[1].area, 0);
}

#[test]
fn bgp_buckets() {
    let (model, d, _) = scenario();
    let mut store = RenderStore::from_model(&model);
    store.assign_edge_ids(d, eth_names()).unwrap();
    RouterCompiler::new(&model, Vendor::Generic).compile(&mut store, d).unwrap();

    let config = store.device(d).unwrap().config.as_ref().unwrap();
    let bgp = config.bgp.as_ref().unwrap();
    assert_eq!(bgp.advertise_subnets, vec![net("10.0.0.0", 16)]);

    assert_eq!(bgp.ibgp_rr_clients.len(), 1);
    assert_eq!(bgp.ibgp_rr_clients[0].neighbor, "n1");
    assert_eq!(bgp.ibgp_rr_clients[0].loopback, addr("192.168.0.2"));
    assert_eq!(bgp.ibgp_rr_clients[0].update_source, BGP_UPDATE_SOURCE);

    assert_eq!(bgp.ebgp_neighbors.len(), 1);
    assert_eq!(bgp.ebgp_neighbors[0].neighbor, "n2");
    assert_eq!(bgp.ebgp_neighbors[0].loopback, addr("192.168.1.1"));
    assert_eq!(bgp.ebgp_neighbors[0].update_source, BGP_UPDATE_SOURCE);

    assert!(bgp.ibgp_rr_parents.is_empty());
    assert!(bgp.ibgp_neighbors.is_empty());
}

#[test]
fn bgp_classification_is_exhaustive() {
    // one session of every kind; each must land in exactly one bucket
    let mut model = NetworkModel::new();
    let d = model.add_router("d", AsId(1), "lab", Syntax::Ios);
    let down = model.add_router("down", AsId(1), "lab", Syntax::Ios);
    let up = model.add_router("up", AsId(1), "lab", Syntax::Ios);
    let peer = model.add_router("peer", AsId(1), "lab", Syntax::Ios);
    let ext = model.add_router("ext", AsId(2), "lab", Syntax::Ios);
    let loopbacks = [
        (d, "192.168.0.1"),
        (down, "192.168.0.2"),
        (up, "192.168.0.3"),
        (peer, "192.168.0.4"),
        (ext, "192.168.1.1"),
    ];
    for (device, loopback) in loopbacks.iter() {
        model.set_loopback(*device, addr(loopback)).unwrap();
        model.enable_bgp(*device).unwrap();
    }
    model.set_asn_blocks(hashmap! { AsId(1) => vec![net("10.0.0.0", 16)] });
    model.add_bgp_session(d, down, IBgp, Some(RrDirection::Down)).unwrap();
    model.add_bgp_session(d, up, IBgp, Some(RrDirection::Up)).unwrap();
    model.add_bgp_session(d, peer, IBgp, None).unwrap();
    model.add_bgp_session(d, ext, EBgp, None).unwrap();

    let mut store = RenderStore::from_model(&model);
    RouterCompiler::new(&model, Vendor::Generic).compile(&mut store, d).unwrap();

    let config = store.device(d).unwrap().config.as_ref().unwrap();
    let bgp = config.bgp.as_ref().unwrap();
    let buckets = [
        (&bgp.ibgp_rr_clients, "down"),
        (&bgp.ibgp_rr_parents, "up"),
        (&bgp.ibgp_neighbors, "peer"),
        (&bgp.ebgp_neighbors, "ext"),
    ];
    for (bucket, neighbor) in buckets.iter() {
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket[0].neighbor, *neighbor);
    }
}

#[test]
fn sections_omitted_for_non_members() {
    let mut model = NetworkModel::new();
    let r1 = model.add_router("r1", AsId(1), "lab", Syntax::Ios);
    let r2 = model.add_router("r2", AsId(1), "lab", Syntax::Ios);
    let link = model.add_link(r1, r2).unwrap();
    model.set_ip_link(link, addr("10.0.0.1"), addr("10.0.0.2"), net("10.0.0.0", 30)).unwrap();

    let mut store = RenderStore::from_model(&model);
    store.assign_edge_ids(r1, eth_names()).unwrap();
    RouterCompiler::new(&model, Vendor::Generic).compile(&mut store, r1).unwrap();

    let config = store.device(r1).unwrap().config.as_ref().unwrap();
    assert_eq!(config.interfaces.len(), 1);
    assert!(config.ospf.is_none());
    assert!(config.bgp.is_none());
}

#[test]
fn ios_costs_and_loopback() {
    let (model, d, _) = scenario();
    let mut store = RenderStore::from_model(&model);
    store.assign_edge_ids(d, eth_names()).unwrap();
    RouterCompiler::new(&model, Vendor::Ios).compile(&mut store, d).unwrap();

    let config = store.device(d).unwrap().config.as_ref().unwrap();
    assert_eq!(config.interfaces.len(), 3);
    assert_eq!(config.interfaces[0].id, "eth0");
    assert_eq!(config.interfaces[0].ospf_cost, Some(10));
    assert_eq!(config.interfaces[1].id, "eth1");
    assert_eq!(config.interfaces[1].ospf_cost, Some(20));

    let lo0 = &config.interfaces[2];
    assert_eq!(lo0.id, "lo0");
    assert_eq!(lo0.description, "Loopback");
    assert_eq!(lo0.ip_address, addr("192.168.0.1"));
    assert_eq!(lo0.subnet, Ipv4Net::host(addr("192.168.0.1")));
    assert_eq!(lo0.ospf_cost, None);
}

#[test]
fn ios_cost_absent_outside_ospf() {
    let mut model = NetworkModel::new();
    let r1 = model.add_router("r1", AsId(1), "lab", Syntax::Ios);
    let r2 = model.add_router("r2", AsId(1), "lab", Syntax::Ios);
    let link = model.add_link(r1, r2).unwrap();
    model.set_loopback(r1, addr("192.168.0.1")).unwrap();
    model.set_ip_link(link, addr("10.0.0.1"), addr("10.0.0.2"), net("10.0.0.0", 30)).unwrap();

    let mut store = RenderStore::from_model(&model);
    store.assign_edge_ids(r1, eth_names()).unwrap();
    RouterCompiler::new(&model, Vendor::Ios).compile(&mut store, r1).unwrap();

    let config = store.device(r1).unwrap().config.as_ref().unwrap();
    assert_eq!(config.interfaces[0].ospf_cost, None);
}

#[test]
fn junos_equals_generic() {
    let (model, d, _) = scenario();

    let mut store_a = RenderStore::from_model(&model);
    store_a.assign_edge_ids(d, eth_names()).unwrap();
    RouterCompiler::new(&model, Vendor::Generic).compile(&mut store_a, d).unwrap();

    let mut store_b = RenderStore::from_model(&model);
    store_b.assign_edge_ids(d, eth_names()).unwrap();
    RouterCompiler::new(&model, Vendor::Junos).compile(&mut store_b, d).unwrap();

    assert_eq!(store_a.device(d).unwrap().config, store_b.device(d).unwrap().config);
}

#[test]
fn recompilation_is_deterministic() {
    let (model, d, _) = scenario();

    let mut store_a = RenderStore::from_model(&model);
    store_a.assign_edge_ids(d, eth_names()).unwrap();
    RouterCompiler::new(&model, Vendor::Ios).compile(&mut store_a, d).unwrap();
    let first = store_a.device(d).unwrap().config.clone().unwrap();

    RouterCompiler::new(&model, Vendor::Ios).compile(&mut store_a, d).unwrap();
    let second = store_a.device(d).unwrap().config.clone().unwrap();

    assert_eq!(first, second);
}

#[test]
fn duplicate_ospf_network_rejected() {
    let (mut model, d, _) = scenario();
    let n1 = model.device_by_name("n1").unwrap();
    // parallel link colliding on the same destination network
    let extra = model.add_link(d, n1).unwrap();
    model.set_ip_link(extra, addr("10.0.0.1"), addr("10.0.0.2"), net("10.0.0.0", 30)).unwrap();
    model.set_ospf_link(extra, 0, 5).unwrap();

    let mut store = RenderStore::from_model(&model);
    store.assign_edge_ids(d, eth_names()).unwrap();
    assert_eq!(
        RouterCompiler::new(&model, Vendor::Generic).compile(&mut store, d),
        Err(CompileError::DuplicateOspfNetwork(d, net("10.0.0.0", 30)))
    );
    // fail-fast: no partial record is attached
    assert!(store.device(d).unwrap().config.is_none());
}

#[test]
fn duplicate_bgp_session_rejected() {
    let (mut model, d, _) = scenario();
    let n1 = model.device_by_name("n1").unwrap();
    model.add_bgp_session(d, n1, IBgp, Some(RrDirection::Down)).unwrap();

    let mut store = RenderStore::from_model(&model);
    store.assign_edge_ids(d, eth_names()).unwrap();
    assert_eq!(
        RouterCompiler::new(&model, Vendor::Generic).compile(&mut store, d),
        Err(CompileError::DuplicateBgpSession(d, "n1".to_string()))
    );
}

#[test]
fn missing_ip_link_is_fatal() {
    let mut model = NetworkModel::new();
    let r1 = model.add_router("r1", AsId(1), "lab", Syntax::Ios);
    let r2 = model.add_router("r2", AsId(1), "lab", Syntax::Ios);
    let link = model.add_link(r1, r2).unwrap();

    let mut store = RenderStore::from_model(&model);
    store.assign_edge_ids(r1, eth_names()).unwrap();
    assert_eq!(
        RouterCompiler::new(&model, Vendor::Generic).compile(&mut store, r1),
        Err(CompileError::MissingIpLink(r1, link))
    );
}

#[test]
fn missing_interface_id_is_fatal() {
    let (model, d, (l1, _)) = scenario();
    let mut store = RenderStore::from_model(&model);
    // no identifiers assigned
    assert_eq!(
        RouterCompiler::new(&model, Vendor::Generic).compile(&mut store, d),
        Err(CompileError::MissingInterfaceId(d, l1))
    );
}

#[test]
fn missing_asn_block_is_fatal() {
    let (mut model, d, _) = scenario();
    model.set_asn_blocks(hashmap! { AsId(2) => vec![net("10.1.0.0", 16)] });

    let mut store = RenderStore::from_model(&model);
    store.assign_edge_ids(d, eth_names()).unwrap();
    assert_eq!(
        RouterCompiler::new(&model, Vendor::Generic).compile(&mut store, d),
        Err(CompileError::MissingAsnBlock(AsId(1)))
    );
}

#[test]
fn missing_loopback_is_fatal() {
    // the Ios specialization needs the loopback of the device itself
    let mut model = NetworkModel::new();
    let r1 = model.add_router("r1", AsId(1), "lab", Syntax::Ios);

    let mut store = RenderStore::from_model(&model);
    assert_eq!(
        RouterCompiler::new(&model, Vendor::Ios).compile(&mut store, r1),
        Err(CompileError::MissingLoopback(r1))
    );
}
