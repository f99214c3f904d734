// NetLab: Compiling Lab Topologies into Network Namespaces
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

use crate::example_topologies::*;
use crate::topology::*;

#[test]
fn circuit_address_inference() {
    let mut t = Topology::new();
    t.add_segment("LAN");
    t.add_device("R1");
    t.add_device("R2");
    t.add_circuit("R1", "LAN", "10.0.0.1/24");
    t.add_circuit("R1", "R2", "10.0.1.");

    let circuits: Vec<&Circuit> = t.circuits().collect();
    assert_eq!(circuits[0].address, CircuitAddress::Bridge("10.0.0.1/24".to_string()));
    assert_eq!(circuits[1].address, CircuitAddress::PointToPoint("10.0.1.".to_string()));
    assert_eq!(*circuits[0], Circuit::bridged("R1", "LAN", "10.0.0.1/24"));
    assert_eq!(*circuits[1], Circuit::point_to_point("R1", "R2", "10.0.1."));
}

#[test]
fn endpoint_addresses() {
    let p2p = CircuitAddress::PointToPoint("192.168.1.".to_string());
    assert_eq!(
        p2p.endpoint_addresses(),
        ("192.168.1.0/31".to_string(), Some("192.168.1.1/31".to_string()))
    );
    let bridge = CircuitAddress::Bridge("192.168.100.1/24".to_string());
    assert_eq!(bridge.endpoint_addresses(), ("192.168.100.1/24".to_string(), None));
}

#[test]
fn declaration_order() {
    let t = ReferenceLab::topology();
    assert_eq!(
        t.devices().map(|d| d.name.as_str()).collect::<Vec<_>>(),
        vec!["S1", "S2", "R1", "R2", "R3", "R4", "R5", "R6"]
    );
    assert_eq!(t.segments().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["LANA", "LANB"]);
    let first = t.circuits().next().unwrap();
    assert_eq!(first, &Circuit::bridged("S1", "LANA", "192.168.100.100/24"));
    let last = t.circuits().last().unwrap();
    assert_eq!(last, &Circuit::bridged("R6", "LANB", "192.168.200.2/24"));
    assert_eq!(t.circuits().filter(|c| c.address.is_bridge()).count(), 6);
}

#[test]
fn endpoint_lookup() {
    let t = TwoRouterLan::topology();
    assert_eq!(t.endpoint("L"), Some(Endpoint::Segment("L")));
    assert_eq!(t.endpoint("X"), Some(Endpoint::Device("X")));
    assert_eq!(t.endpoint("Z"), None);
    assert!(t.endpoint("L").unwrap().is_segment());
    assert_eq!(t.endpoint("Y").unwrap().name(), "Y");
}

#[test]
fn examples_are_valid() {
    assert_eq!(ReferenceLab::topology().validate(), Ok(()));
    assert_eq!(TwoRouterLan::topology().validate(), Ok(()));
    assert_eq!(Topology::new().validate(), Ok(()));
}

#[test]
fn unknown_endpoint() {
    let mut t = TwoRouterLan::topology();
    t.add_circuit("Y", "Z", "10.0.2.");
    assert_eq!(
        t.validate(),
        Err(ValidationError::UnknownEndpoint { circuit: 2, name: "Z".to_string() })
    );

    let mut t = TwoRouterLan::topology();
    t.add_circuit("W", "X", "10.0.2.");
    assert_eq!(
        t.validate(),
        Err(ValidationError::UnknownEndpoint { circuit: 2, name: "W".to_string() })
    );
}

#[test]
fn duplicate_names() {
    let mut t = TwoRouterLan::topology();
    t.add_device("X");
    assert_eq!(t.validate(), Err(ValidationError::DuplicateName("X".to_string())));

    let mut t = TwoRouterLan::topology();
    t.add_device("L");
    assert_eq!(t.validate(), Err(ValidationError::DuplicateName("L".to_string())));
}

#[test]
fn invalid_names() {
    let mut t = Topology::new();
    t.add_device("");
    assert_eq!(t.validate(), Err(ValidationError::InvalidName("".to_string())));

    for name in ["my lan", "-n", "--all", ".", "..", "a/b"].iter() {
        let mut t = Topology::new();
        t.add_segment(*name);
        assert_eq!(
            t.validate(),
            Err(ValidationError::InvalidName(name.to_string())),
            "name {:?} should be rejected",
            name
        );
    }

    // dashes and dots inside a name are fine
    let mut t = Topology::new();
    t.add_device("core-1.lab");
    assert_eq!(t.validate(), Ok(()));
}

#[test]
fn segment_initiates_circuit() {
    let mut t = TwoRouterLan::topology();
    t.push_circuit(Circuit::bridged("L", "Y", "10.0.0.2/24"));
    assert_eq!(
        t.validate(),
        Err(ValidationError::SegmentInitiatesCircuit { circuit: 2, name: "L".to_string() })
    );
}

#[test]
fn self_loop() {
    let mut t = TwoRouterLan::topology();
    t.add_circuit("Y", "Y", "10.0.2.");
    assert_eq!(t.validate(), Err(ValidationError::SelfLoop { circuit: 2, name: "Y".to_string() }));
}

#[test]
fn address_kind_mismatch() {
    let mut t = TwoRouterLan::topology();
    t.push_circuit(Circuit::point_to_point("Y", "L", "10.0.2."));
    assert!(matches!(
        t.validate(),
        Err(ValidationError::AddressKindMismatch { circuit: 2, .. })
    ));

    let mut t = TwoRouterLan::topology();
    t.push_circuit(Circuit::bridged("Y", "X", "10.0.2.1/24"));
    assert!(matches!(
        t.validate(),
        Err(ValidationError::AddressKindMismatch { circuit: 2, .. })
    ));
}

#[test]
fn invalid_addresses() {
    for addr in ["10.0.2", "10.0.2.1.", "10.0..", "10.0.256.", "a.b.c.", "10.0.2.0/31"].iter() {
        let mut t = TwoRouterLan::topology();
        t.add_circuit("Y", "Z", *addr);
        t.add_device("Z");
        assert_eq!(
            t.validate(),
            Err(ValidationError::InvalidAddress { circuit: 2, address: addr.to_string() }),
            "prefix {:?} should be rejected",
            addr
        );
    }

    for addr in ["10.0.0.2", "10.0.0.2/33", "10.0.0/24", "10.0.0.300/24", "10.0.0.", "10.0.0.1/+24", "10.0.0.1/"]
        .iter() {
        let mut t = TwoRouterLan::topology();
        t.add_device("Z");
        t.add_circuit("Z", "L", *addr);
        assert_eq!(
            t.validate(),
            Err(ValidationError::InvalidAddress { circuit: 2, address: addr.to_string() }),
            "bridge address {:?} should be rejected",
            addr
        );
    }
}

#[test]
fn interface_name_collision() {
    let mut t = TwoRouterLan::topology();
    t.add_circuit("X", "Y", "10.0.2.");
    assert_eq!(
        t.validate(),
        Err(ValidationError::InterfaceNameCollision {
            name: "X-Y".to_string(),
            first: 1,
            second: 2
        })
    );

    // the reverse direction produces the same two names
    let mut t = TwoRouterLan::topology();
    t.add_circuit("Y", "X", "10.0.2.");
    assert_eq!(
        t.validate(),
        Err(ValidationError::InterfaceNameCollision {
            name: "Y-X".to_string(),
            first: 1,
            second: 2
        })
    );

    // names built from different endpoints may still collide
    let mut t = Topology::new();
    for d in ["a-b", "c", "a", "b-c"].iter() {
        t.add_device(*d);
    }
    t.add_circuit("a-b", "c", "10.0.0.");
    t.add_circuit("a", "b-c", "10.0.1.");
    assert!(matches!(t.validate(), Err(ValidationError::InterfaceNameCollision { .. })));
}

#[test]
fn interface_name_too_long() {
    let mut t = Topology::new();
    t.add_device("router-frankfurt");
    t.add_device("R2");
    t.add_circuit("router-frankfurt", "R2", "10.0.0.");
    assert_eq!(
        t.validate(),
        Err(ValidationError::InterfaceNameTooLong("router-frankfurt-R2".to_string()))
    );
}
