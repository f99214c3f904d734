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

//! Validation of a topology, performed before compilation.

use super::{CircuitAddress, Endpoint, Topology};
use crate::compiler::interface_names;

use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;
use thiserror::Error;

/// Maximum length of an interface name accepted by the kernel (`IFNAMSIZ - 1`).
pub const MAX_INTERFACE_NAME_LEN: usize = 15;

/// Reasons why a topology cannot be compiled.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Names must be non-empty, must not start with `-`, must not be `.` or `..`, and must not
    /// contain whitespace or `/`.
    #[error("Invalid name: {0:?}")]
    InvalidName(String),
    /// The same name is declared twice (as device or as segment).
    #[error("Name is declared more than once: {0}")]
    DuplicateName(String),
    /// A circuit references a name which is neither a device nor a segment.
    #[error("Circuit {circuit} references an unknown endpoint: {name}")]
    UnknownEndpoint {
        /// Index of the circuit in the topology
        circuit: usize,
        /// Name that could not be resolved
        name: String,
    },
    /// The `a` side of a circuit must always be a device.
    #[error("Circuit {circuit} is initiated by the segment {name}")]
    SegmentInitiatesCircuit {
        /// Index of the circuit in the topology
        circuit: usize,
        /// Name of the segment
        name: String,
    },
    /// Both ends of the circuit are the same entity.
    #[error("Circuit {circuit} connects {name} to itself")]
    SelfLoop {
        /// Index of the circuit in the topology
        circuit: usize,
        /// Name of the endpoint
        name: String,
    },
    /// Bridge addresses are only valid towards segments, and point-to-point prefixes only between
    /// two devices.
    #[error("Circuit {circuit}: address {address} does not match the endpoint {b}")]
    AddressKindMismatch {
        /// Index of the circuit in the topology
        circuit: usize,
        /// `b` side of the circuit
        b: String,
        /// Address of the circuit
        address: CircuitAddress,
    },
    /// The address cannot be parsed.
    #[error("Circuit {circuit}: invalid address {address:?}")]
    InvalidAddress {
        /// Index of the circuit in the topology
        circuit: usize,
        /// The address string
        address: String,
    },
    /// Two circuits would create an interface with the same name.
    #[error("Interface {name} is created by circuit {first} and circuit {second}")]
    InterfaceNameCollision {
        /// Generated interface name
        name: String,
        /// Index of the first circuit creating the interface
        first: usize,
        /// Index of the second circuit creating the interface
        second: usize,
    },
    /// The generated interface name is longer than the kernel allows.
    #[error("Interface name {0} is longer than {} characters", MAX_INTERFACE_NAME_LEN)]
    InterfaceNameTooLong(String),
}

impl Topology {
    /// Check that the topology can be compiled and instantiated. The first violation is
    /// returned. This function is independent of the compilation, which never fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut declared: HashSet<&str> = HashSet::new();
        for name in self.namespaces() {
            if !is_valid_name(name) {
                return Err(ValidationError::InvalidName(name.to_string()));
            }
            if !declared.insert(name) {
                return Err(ValidationError::DuplicateName(name.to_string()));
            }
        }

        let mut iface_owner: HashMap<String, usize> = HashMap::new();

        for (idx, circuit) in self.circuits().enumerate() {
            let a = self.endpoint(&circuit.a).ok_or_else(|| ValidationError::UnknownEndpoint {
                circuit: idx,
                name: circuit.a.clone(),
            })?;
            let b = self.endpoint(&circuit.b).ok_or_else(|| ValidationError::UnknownEndpoint {
                circuit: idx,
                name: circuit.b.clone(),
            })?;

            if let Endpoint::Segment(name) = a {
                return Err(ValidationError::SegmentInitiatesCircuit {
                    circuit: idx,
                    name: name.to_string(),
                });
            }

            if a == b {
                return Err(ValidationError::SelfLoop { circuit: idx, name: circuit.a.clone() });
            }

            if b.is_segment() != circuit.address.is_bridge() {
                return Err(ValidationError::AddressKindMismatch {
                    circuit: idx,
                    b: circuit.b.clone(),
                    address: circuit.address.clone(),
                });
            }

            let valid = match &circuit.address {
                CircuitAddress::Bridge(addr) => is_address_with_prefix(addr),
                CircuitAddress::PointToPoint(prefix) => is_three_octet_prefix(prefix),
            };
            if !valid {
                return Err(ValidationError::InvalidAddress {
                    circuit: idx,
                    address: circuit.address.as_str().to_string(),
                });
            }

            let (x, y) = interface_names(circuit);
            for name in [x, y].iter() {
                if name.len() > MAX_INTERFACE_NAME_LEN {
                    return Err(ValidationError::InterfaceNameTooLong(name.clone()));
                }
                if let Some(first) = iface_owner.insert(name.clone(), idx) {
                    return Err(ValidationError::InterfaceNameCollision {
                        name: name.clone(),
                        first,
                        second: idx,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Names become namespace names and command arguments. They must not be empty, must not be read
/// as an option (leading `-`), and must not contain whitespace or `/`. `.` and `..` are refused
/// as they refer to directories under `/run/netns`.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && name != "."
        && name != ".."
        && !name.chars().any(|c| c.is_whitespace() || c == '/')
}

/// Checks addresses like `192.168.100.1/24`.
pub(crate) fn is_address_with_prefix(s: &str) -> bool {
    match s.split_once('/') {
        Some((addr, len)) => {
            addr.parse::<Ipv4Addr>().is_ok()
                && !len.is_empty()
                && len.chars().all(|c| c.is_ascii_digit())
                && len.parse::<u8>().map(|l| l <= 32).unwrap_or(false)
        }
        None => false,
    }
}

/// Checks prefixes like `192.168.1.` (three octets, followed by a dot).
pub(crate) fn is_three_octet_prefix(s: &str) -> bool {
    match s.strip_suffix('.') {
        Some(octets) => {
            let parts: Vec<&str> = octets.split('.').collect();
            parts.len() == 3
                && parts.iter().all(|p| {
                    !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()) && p.parse::<u8>().is_ok()
                })
        }
        None => false,
    }
}
