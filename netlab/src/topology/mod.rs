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

//! # Topology Model
//! This module describes the lab network that should be instantiated. There are three kinds of
//! entities:
//!
//! - [`Device`]: A routing device (L3). Each device becomes its own network namespace.
//! - [`Segment`]: A broadcast segment (L2). Each segment becomes a network namespace hosting a
//!   bridge.
//! - [`Circuit`]: A link between two endpoints, realized as a virtual ethernet pair. The `a` side
//!   is always a device, while the `b` side may be a device or a segment.
//!
//! The [`Topology`] keeps all three lists in declaration order. It performs no checks while it is
//! built. Use [`Topology::validate`] to reject inconsistent topologies before compiling them.
//!
//! # Example Usage
//!
//! ```rust
//! use netlab::topology::{Circuit, Topology};
//!
//! let mut t = Topology::new();
//! t.add_segment("L");
//! t.add_device("X");
//! t.add_device("Y");
//! t.add_circuit("X", "L", "10.0.0.1/24");
//! t.push_circuit(Circuit::point_to_point("X", "Y", "10.0.1."));
//!
//! assert!(t.validate().is_ok());
//! assert_eq!(t.circuits().count(), 2);
//! ```

mod validate;
pub use validate::{ValidationError, MAX_INTERFACE_NAME_LEN};

use std::fmt;

/// Routing device (L3), realized as a network namespace with forwarding enabled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Device {
    /// Name of the device, which is also the name of its namespace
    pub name: String,
}

/// Broadcast segment (L2), realized as a network namespace containing a single bridge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Name of the segment, which is also the name of its namespace
    pub name: String,
}

/// Reference to a declared entity, tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint<'a> {
    /// The name refers to a device
    Device(&'a str),
    /// The name refers to a segment
    Segment(&'a str),
}

impl<'a> Endpoint<'a> {
    /// Name of the endpoint
    pub fn name(&self) -> &'a str {
        match self {
            Self::Device(n) | Self::Segment(n) => n,
        }
    }

    /// Returns true if and only if the endpoint is a segment
    pub fn is_segment(&self) -> bool {
        matches!(self, Self::Segment(_))
    }
}

/// # Circuit Address
/// How the two ends of a circuit get their addresses. The variant is fixed when the circuit is
/// constructed, such that the compiler never needs to look at the kind of the endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CircuitAddress {
    /// The `b` side is attached to a bridge. The string is a full address with prefix length (like
    /// `192.168.100.1/24`), assigned verbatim to the `a` side. The `b` side stays unaddressed.
    Bridge(String),
    /// Point-to-point link. The string contains the first three octets including the trailing dot
    /// (like `192.168.1.`). The `a` side gets `<prefix>0/31`, and the `b` side `<prefix>1/31`.
    PointToPoint(String),
}

impl CircuitAddress {
    /// Returns the address of the `a` side, and the address of the `b` side (if any).
    pub fn endpoint_addresses(&self) -> (String, Option<String>) {
        match self {
            Self::Bridge(addr) => (addr.clone(), None),
            Self::PointToPoint(prefix) => {
                (format!("{}0/31", prefix), Some(format!("{}1/31", prefix)))
            }
        }
    }

    /// Returns the raw string, as it was written in the topology.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bridge(s) | Self::PointToPoint(s) => s.as_str(),
        }
    }

    /// Returns true if and only if the address attaches the `b` side to a bridge.
    pub fn is_bridge(&self) -> bool {
        matches!(self, Self::Bridge(_))
    }
}

impl fmt::Display for CircuitAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bridge(s) => write!(f, "{} (bridged)", s),
            Self::PointToPoint(s) => write!(f, "{}0/31 <-> {}1/31", s, s),
        }
    }
}

/// Link between device `a` and either a device or a segment `b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Circuit {
    /// Name of the device initiating the circuit
    pub a: String,
    /// Name of the device or segment on the other end
    pub b: String,
    /// Addressing of the circuit
    pub address: CircuitAddress,
}

impl Circuit {
    /// Create a circuit from device `a` to `segment`, where `a` gets the address `addr` (including
    /// the prefix length).
    pub fn bridged(
        a: impl Into<String>,
        segment: impl Into<String>,
        addr: impl Into<String>,
    ) -> Self {
        Self { a: a.into(), b: segment.into(), address: CircuitAddress::Bridge(addr.into()) }
    }

    /// Create a point-to-point circuit between device `a` and device `b`, numbered out of the /31
    /// subnets of `prefix` (three octets with the trailing dot).
    pub fn point_to_point(
        a: impl Into<String>,
        b: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self { a: a.into(), b: b.into(), address: CircuitAddress::PointToPoint(prefix.into()) }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --- {}: {}", self.a, self.b, self.address)
    }
}

/// # Topology
/// Ordered collection of devices, segments and circuits. The order of declaration determines the
/// order in which the provisioning operations are emitted, but has no other effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    devices: Vec<Device>,
    segments: Vec<Segment>,
    circuits: Vec<Circuit>,
}

impl Topology {
    /// Create an empty topology
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new device.
    pub fn add_device(&mut self, name: impl Into<String>) {
        self.devices.push(Device { name: name.into() });
    }

    /// Declare a new segment.
    pub fn add_segment(&mut self, name: impl Into<String>) {
        self.segments.push(Segment { name: name.into() });
    }

    /// Add a circuit from the untyped address notation. If `b` is a declared segment, `address` is
    /// taken as a bridge address, otherwise as a point-to-point prefix. Because of this, all
    /// segments must be declared before the circuits referencing them.
    pub fn add_circuit(
        &mut self,
        a: impl Into<String>,
        b: impl Into<String>,
        address: impl Into<String>,
    ) {
        let b = b.into();
        let circuit = if self.is_segment(&b) {
            Circuit::bridged(a, b, address)
        } else {
            Circuit::point_to_point(a, b, address)
        };
        self.circuits.push(circuit);
    }

    /// Add an already constructed circuit.
    pub fn push_circuit(&mut self, circuit: Circuit) {
        self.circuits.push(circuit);
    }

    /// Iterate over all devices in declaration order
    pub fn devices(&self) -> impl Iterator<Item = &Device> + '_ {
        self.devices.iter()
    }

    /// Iterate over all segments in declaration order
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter()
    }

    /// Iterate over all circuits in declaration order
    pub fn circuits(&self) -> impl Iterator<Item = &Circuit> + '_ {
        self.circuits.iter()
    }

    /// Number of namespaces needed for this topology (one per device and per segment).
    pub fn num_namespaces(&self) -> usize {
        self.devices.len() + self.segments.len()
    }

    /// Returns true if there is a device with the given name.
    pub fn is_device(&self, name: &str) -> bool {
        self.devices.iter().any(|d| d.name == name)
    }

    /// Returns true if there is a segment with the given name.
    pub fn is_segment(&self, name: &str) -> bool {
        self.segments.iter().any(|s| s.name == name)
    }

    /// Resolve a name. Segments take precedence over devices if the name is declared twice (which
    /// [`Topology::validate`] rejects anyways).
    pub fn endpoint<'a>(&'a self, name: &str) -> Option<Endpoint<'a>> {
        if let Some(s) = self.segments.iter().find(|s| s.name == name) {
            Some(Endpoint::Segment(s.name.as_str()))
        } else {
            self.devices.iter().find(|d| d.name == name).map(|d| Endpoint::Device(d.name.as_str()))
        }
    }

    /// Names of all namespaces, segments first, then devices. This is the order in which they are
    /// created.
    pub fn namespaces(&self) -> Vec<&str> {
        self.segments
            .iter()
            .map(|s| s.name.as_str())
            .chain(self.devices.iter().map(|d| d.name.as_str()))
            .collect()
    }
}
