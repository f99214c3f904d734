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

//! # Helper (printer) functions for operations
//! Render each [`Operation`] as the `ip` command realizing it on a linux host. The commands are
//! returned as argument vectors (for execution) or as a single shell line (for printing).

use crate::operation::Operation;

use itertools::Itertools;

/// Shell snippet setting `forwarding` to 1 on all interfaces currently known to the namespace.
const FORWARDING_SCRIPT: &str =
    "for i in /proc/sys/net/ipv4/conf/*; do echo 1 > $i/forwarding; done";
/// Shell snippet setting `rp_filter` to 0 on all interfaces currently known to the namespace.
const RP_FILTER_SCRIPT: &str =
    "for i in /proc/sys/net/ipv4/conf/*; do echo 0 > $i/rp_filter; done";

/// Returns the argument vector of the command realizing the operation. The first element is the
/// program to execute (always `ip`).
pub fn command(op: &Operation) -> Vec<String> {
    match op {
        Operation::CreateNamespace { name } => args(&["ip", "netns", "add", name.as_str()]),
        Operation::CreateBridge { namespace, bridge } => netns_exec(
            namespace,
            &["ip", "link", "add", "name", bridge.as_str(), "type", "bridge"],
        ),
        Operation::SetInterfaceUp { namespace, interface } => {
            netns_exec(namespace, &["ip", "link", "set", "up", "dev", interface.as_str()])
        }
        Operation::EnableForwarding { namespace } => {
            netns_exec(namespace, &["bash", "-c", FORWARDING_SCRIPT])
        }
        Operation::DisableReversePathFilter { namespace } => {
            netns_exec(namespace, &["bash", "-c", RP_FILTER_SCRIPT])
        }
        Operation::CreateVethPair { end_a, end_b } => args(&[
            "ip",
            "link",
            "add",
            end_a.as_str(),
            "type",
            "veth",
            "peer",
            "name",
            end_b.as_str(),
        ]),
        Operation::MoveInterfaceToNamespace { interface, namespace } => {
            args(&["ip", "link", "set", interface.as_str(), "netns", namespace.as_str()])
        }
        Operation::AttachToBridge { namespace, interface, bridge } => netns_exec(
            namespace,
            &["ip", "link", "set", interface.as_str(), "master", bridge.as_str()],
        ),
        Operation::AssignAddress { namespace, interface, address } => netns_exec(
            namespace,
            &["ip", "addr", "add", address.as_str(), "dev", interface.as_str()],
        ),
    }
}

/// Returns the command as a single line, as it would be typed into a shell. Arguments containing
/// spaces are wrapped in double quotes.
pub fn command_line(op: &Operation) -> String {
    command(op)
        .iter()
        .map(|a| if a.contains(' ') { format!("\"{}\"", a) } else { a.clone() })
        .join(" ")
}

/// Render all operations, one command per line.
pub fn script<'a>(ops: impl IntoIterator<Item = &'a Operation>) -> String {
    ops.into_iter().map(command_line).map(|l| l + "\n").collect()
}

fn args(a: &[&str]) -> Vec<String> {
    a.iter().map(|s| s.to_string()).collect()
}

fn netns_exec(namespace: &str, cmd: &[&str]) -> Vec<String> {
    let mut result = args(&["ip", "netns", "exec", namespace]);
    result.extend(cmd.iter().map(|s| s.to_string()));
    result
}
