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

use crate::operation::Operation::*;
use crate::printer::*;

fn s(x: &str) -> String {
    x.to_string()
}

#[test]
fn command_lines() {
    assert_eq!(command_line(&CreateNamespace { name: s("R1") }), "ip netns add R1");
    assert_eq!(
        command_line(&CreateBridge { namespace: s("LANA"), bridge: s("br0") }),
        "ip netns exec LANA ip link add name br0 type bridge"
    );
    assert_eq!(
        command_line(&SetInterfaceUp { namespace: s("LANA"), interface: s("br0") }),
        "ip netns exec LANA ip link set up dev br0"
    );
    assert_eq!(
        command_line(&EnableForwarding { namespace: s("R1") }),
        "ip netns exec R1 bash -c \"for i in /proc/sys/net/ipv4/conf/*; do echo 1 > $i/forwarding; done\""
    );
    assert_eq!(
        command_line(&DisableReversePathFilter { namespace: s("R1") }),
        "ip netns exec R1 bash -c \"for i in /proc/sys/net/ipv4/conf/*; do echo 0 > $i/rp_filter; done\""
    );
    assert_eq!(
        command_line(&CreateVethPair { end_a: s("R1-R2"), end_b: s("R2-R1") }),
        "ip link add R1-R2 type veth peer name R2-R1"
    );
    assert_eq!(
        command_line(&MoveInterfaceToNamespace { interface: s("R1-R2"), namespace: s("R1") }),
        "ip link set R1-R2 netns R1"
    );
    assert_eq!(
        command_line(&AttachToBridge {
            namespace: s("LANA"),
            interface: s("LANA-R1"),
            bridge: s("br0")
        }),
        "ip netns exec LANA ip link set LANA-R1 master br0"
    );
    assert_eq!(
        command_line(&AssignAddress {
            namespace: s("R1"),
            interface: s("R1-LANA"),
            address: s("192.168.100.1/24")
        }),
        "ip netns exec R1 ip addr add 192.168.100.1/24 dev R1-LANA"
    );
}

#[test]
fn command_arguments() {
    let cmd = command(&EnableForwarding { namespace: s("R1") });
    assert_eq!(cmd.len(), 7);
    assert_eq!(cmd[0], "ip");
    assert_eq!(&cmd[4..6], &[s("bash"), s("-c")]);
    // the script is passed as a single argument, without quotes
    assert!(cmd[6].starts_with("for i in"));

    assert_eq!(command(&CreateNamespace { name: s("R1") }), vec!["ip", "netns", "add", "R1"]);
}

#[test]
fn operation_namespace() {
    assert_eq!(CreateNamespace { name: s("R1") }.namespace(), Some("R1"));
    assert_eq!(CreateVethPair { end_a: s("a"), end_b: s("b") }.namespace(), None);
    assert_eq!(
        MoveInterfaceToNamespace { interface: s("a"), namespace: s("R2") }.namespace(),
        Some("R2")
    );
    assert!(CreateBridge { namespace: s("L"), bridge: s("br0") }.is_creation());
    assert!(!AssignAddress { namespace: s("L"), interface: s("a"), address: s("b") }.is_creation());
}
