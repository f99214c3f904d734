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

//! # Provisioning Compiler
//!
//! Translates a [`Topology`] into the ordered list of [`Operation`]s needed to instantiate it. The
//! compilation is performed in three phases, which are always emitted in the following order:
//!
//! 1. [`Phase::Segments`]: For each segment, create the namespace, create the bridge
//!    [`BRIDGE_NAME`] inside of it, and set the bridge up.
//! 2. [`Phase::Devices`]: For each device, create the namespace, enable forwarding and disable
//!    reverse path filtering. These settings only affect the interfaces existing at this point
//!    (i.e., the loopback interface).
//! 3. [`Phase::Circuits`]: For each circuit, create the veth pair, move both ends into their
//!    namespaces, set them up and assign the addresses (see [`realize_circuit`]).
//!
//! Within each phase, the declaration order of the topology is preserved. The compiler performs
//! no checks and cannot fail. Call [`Topology::validate`] first.

use crate::operation::Operation;
use crate::sink::OperationSink;
use crate::topology::{Circuit, CircuitAddress, Device, Segment, Topology};

use log::*;
use std::fmt;

/// Name of the bridge created in every segment namespace.
pub const BRIDGE_NAME: &str = "br0";

/// Compilation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Segment namespaces and bridges
    Segments,
    /// Device namespaces and their forwarding settings
    Devices,
    /// Veth pairs, bridge attachments and addresses
    Circuits,
}

impl Phase {
    /// All phases in the order in which they are emitted
    pub const ALL: [Phase; 3] = [Phase::Segments, Phase::Devices, Phase::Circuits];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Segments => write!(f, "segments"),
            Phase::Devices => write!(f, "devices"),
            Phase::Circuits => write!(f, "circuits"),
        }
    }
}

/// Compile the entire topology into a single stream of operations.
pub fn compile(topo: &Topology) -> Vec<Operation> {
    compile_phases(topo).into_iter().flat_map(|(_, ops)| ops).collect()
}

/// Compile the topology, but keep the operations of each phase separate.
pub fn compile_phases(topo: &Topology) -> Vec<(Phase, Vec<Operation>)> {
    Phase::ALL.iter().map(|phase| (*phase, compile_phase(topo, *phase))).collect()
}

/// Compile only a single phase of the topology.
pub fn compile_phase(topo: &Topology, phase: Phase) -> Vec<Operation> {
    match phase {
        Phase::Segments => compile_segments(topo.segments()),
        Phase::Devices => compile_devices(topo.devices()),
        Phase::Circuits => compile_circuits(topo.circuits()),
    }
}

/// Operations for all segments.
pub fn compile_segments<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> Vec<Operation> {
    segments
        .into_iter()
        .flat_map(|s| {
            vec![
                Operation::CreateNamespace { name: s.name.clone() },
                Operation::CreateBridge {
                    namespace: s.name.clone(),
                    bridge: BRIDGE_NAME.to_string(),
                },
                Operation::SetInterfaceUp {
                    namespace: s.name.clone(),
                    interface: BRIDGE_NAME.to_string(),
                },
            ]
        })
        .collect()
}

/// Operations for all devices.
pub fn compile_devices<'a>(devices: impl IntoIterator<Item = &'a Device>) -> Vec<Operation> {
    devices
        .into_iter()
        .flat_map(|d| {
            vec![
                Operation::CreateNamespace { name: d.name.clone() },
                Operation::EnableForwarding { namespace: d.name.clone() },
                Operation::DisableReversePathFilter { namespace: d.name.clone() },
            ]
        })
        .collect()
}

/// Operations for all circuits.
pub fn compile_circuits<'a>(circuits: impl IntoIterator<Item = &'a Circuit>) -> Vec<Operation> {
    circuits.into_iter().flat_map(realize_circuit).collect()
}

/// Names of the two veth ends of a circuit. The first one (`"<a>-<b>"`) ends up in namespace `a`,
/// the second one (`"<b>-<a>"`) in namespace `b`.
pub fn interface_names(circuit: &Circuit) -> (String, String) {
    (format!("{}-{}", circuit.a, circuit.b), format!("{}-{}", circuit.b, circuit.a))
}

/// # Circuit realization
///
/// Generate the operations for a single circuit:
///
/// 1. create the veth pair, named by [`interface_names`],
/// 2. move the first end into `a` and set it up, then move the second end into `b` and set it up,
/// 3. assign the addresses:
///    - [`CircuitAddress::Bridge`]: attach the `b` end to the bridge of the segment, and assign the
///      address verbatim to the `a` end. The `b` end carries no address.
///    - [`CircuitAddress::PointToPoint`]: assign `<prefix>0/31` to the `a` end and `<prefix>1/31` to
///      the `b` end.
pub fn realize_circuit(circuit: &Circuit) -> Vec<Operation> {
    let (x, y) = interface_names(circuit);

    let mut ops = Vec::with_capacity(8);
    ops.push(Operation::CreateVethPair { end_a: x.clone(), end_b: y.clone() });
    ops.push(Operation::MoveInterfaceToNamespace {
        interface: x.clone(),
        namespace: circuit.a.clone(),
    });
    ops.push(Operation::SetInterfaceUp { namespace: circuit.a.clone(), interface: x.clone() });
    ops.push(Operation::MoveInterfaceToNamespace {
        interface: y.clone(),
        namespace: circuit.b.clone(),
    });
    ops.push(Operation::SetInterfaceUp { namespace: circuit.b.clone(), interface: y.clone() });

    match &circuit.address {
        CircuitAddress::Bridge(addr) => {
            ops.push(Operation::AttachToBridge {
                namespace: circuit.b.clone(),
                interface: y,
                bridge: BRIDGE_NAME.to_string(),
            });
            ops.push(Operation::AssignAddress {
                namespace: circuit.a.clone(),
                interface: x,
                address: addr.clone(),
            });
        }
        CircuitAddress::PointToPoint(_) => {
            let (addr_a, addr_b) = circuit.address.endpoint_addresses();
            ops.push(Operation::AssignAddress {
                namespace: circuit.a.clone(),
                interface: x,
                address: addr_a,
            });
            if let Some(addr_b) = addr_b {
                ops.push(Operation::AssignAddress {
                    namespace: circuit.b.clone(),
                    interface: y,
                    address: addr_b,
                });
            }
        }
    }

    ops
}

/// Compile the topology and apply every operation to the sink, in order. Stops at the first
/// operation the sink cannot apply, and returns its error. On success, the number of applied
/// operations is returned.
pub fn provision<S: OperationSink>(topo: &Topology, sink: &mut S) -> Result<usize, S::Error> {
    let mut applied = 0;
    for (phase, ops) in compile_phases(topo) {
        info!("Provisioning {} ({} operations)", phase, ops.len());
        for op in ops.iter() {
            debug!("{}", op);
            sink.apply(op)?;
            applied += 1;
        }
    }
    Ok(applied)
}
