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

//! # Operation Sinks
//!
//! An [`OperationSink`] consumes the operations emitted by the compiler, one at a time. This module
//! provides three sinks:
//!
//! - `Vec<Operation>`: collects all operations.
//! - [`CommandPrinter`]: writes the command for each operation into a writer (dry run).
//! - [`HostState`]: in-memory model of a linux host, which detects collisions and references to
//!   missing namespaces or interfaces.
//!
//! The sink executing the commands on the actual host lives in `netlab_runtime`.

use crate::operation::Operation;
use crate::printer::command_line;

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use thiserror::Error;

/// Consumer of the operation stream.
pub trait OperationSink {
    /// Error returned if an operation cannot be applied
    type Error;

    /// Apply a single operation.
    fn apply(&mut self, op: &Operation) -> Result<(), Self::Error>;
}

impl OperationSink for Vec<Operation> {
    type Error = std::convert::Infallible;

    fn apply(&mut self, op: &Operation) -> Result<(), Self::Error> {
        self.push(op.clone());
        Ok(())
    }
}

/// Writes the command line of every operation to the writer, without executing anything.
#[derive(Debug)]
pub struct CommandPrinter<W: Write> {
    writer: W,
}

impl<W: Write> CommandPrinter<W> {
    /// Create a new printer writing into `writer`
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OperationSink for CommandPrinter<W> {
    type Error = std::io::Error;

    fn apply(&mut self, op: &Operation) -> Result<(), Self::Error> {
        writeln!(self.writer, "{}", command_line(op))
    }
}

/// Name used in errors to refer to the root namespace.
pub const ROOT_NAMESPACE: &str = "<root>";
/// Name of the loopback interface, which exists in every new namespace.
pub const LOOPBACK: &str = "lo";

/// Errors reported by [`HostState`]
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SinkError {
    /// The namespace does already exist
    #[error("Namespace {0} already exists")]
    NamespaceExists(String),
    /// The namespace does not exist
    #[error("Namespace {0} does not exist")]
    UnknownNamespace(String),
    /// An interface with the same name does already exist in the namespace
    #[error("Interface {interface} already exists in namespace {namespace}")]
    InterfaceExists {
        /// Namespace containing the interface
        namespace: String,
        /// Interface name
        interface: String,
    },
    /// The interface does not exist in the namespace
    #[error("Interface {interface} does not exist in namespace {namespace}")]
    UnknownInterface {
        /// Namespace that was searched
        namespace: String,
        /// Interface name
        interface: String,
    },
    /// A bridge with the same name does already exist in the namespace
    #[error("Bridge {bridge} already exists in namespace {namespace}")]
    BridgeExists {
        /// Namespace containing the bridge
        namespace: String,
        /// Bridge name
        bridge: String,
    },
    /// The bridge does not exist in the namespace
    #[error("Bridge {bridge} does not exist in namespace {namespace}")]
    UnknownBridge {
        /// Namespace that was searched
        namespace: String,
        /// Bridge name
        bridge: String,
    },
    /// The interface already carries that address
    #[error("Address {address} is already assigned to {interface} in namespace {namespace}")]
    AddressExists {
        /// Namespace of the interface
        namespace: String,
        /// Interface name
        interface: String,
        /// Address with prefix length
        address: String,
    },
}

/// Kind of an interface known to the [`HostState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceKind {
    /// Loopback interface
    Loopback,
    /// Software bridge
    Bridge,
    /// One end of a veth pair
    Veth {
        /// Name of the other end
        peer: String,
    },
}

/// State of a single interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceState {
    /// Kind of the interface
    pub kind: InterfaceKind,
    /// Administrative state
    pub up: bool,
    /// Bridge to which the interface is attached
    pub master: Option<String>,
    /// Assigned addresses, in the order of assignment
    pub addresses: Vec<String>,
    /// IPv4 forwarding
    pub forwarding: bool,
    /// Reverse path filtering
    pub rp_filter: bool,
}

impl InterfaceState {
    fn new(kind: InterfaceKind) -> Self {
        Self {
            kind,
            up: false,
            master: None,
            addresses: Vec::new(),
            forwarding: false,
            rp_filter: true,
        }
    }
}

/// # Host State
///
/// In-memory model of the namespaces and interfaces on a host. Applying an operation either
/// updates the model, or fails with a [`SinkError`] without changing anything. Applying the same
/// operation stream twice thus fails on the first creation of a namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostState {
    root: BTreeMap<String, InterfaceState>,
    namespaces: BTreeMap<String, BTreeMap<String, InterfaceState>>,
}

impl HostState {
    /// Create an empty host (without any network namespaces)
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over all namespace names (sorted)
    pub fn namespaces(&self) -> impl Iterator<Item = &str> + '_ {
        self.namespaces.keys().map(|s| s.as_str())
    }

    /// Returns true if the namespace exists
    pub fn has_namespace(&self, name: &str) -> bool {
        self.namespaces.contains_key(name)
    }

    /// Returns the names of all interfaces in the namespace.
    pub fn interfaces(&self, namespace: &str) -> Option<BTreeSet<&str>> {
        self.namespaces.get(namespace).map(|n| n.keys().map(|s| s.as_str()).collect())
    }

    /// Returns the state of an interface
    pub fn interface(&self, namespace: &str, interface: &str) -> Option<&InterfaceState> {
        self.namespaces.get(namespace).and_then(|n| n.get(interface))
    }

    /// Returns the interfaces that still live in the root namespace.
    pub fn root_interfaces(&self) -> impl Iterator<Item = &str> + '_ {
        self.root.keys().map(|s| s.as_str())
    }

    fn namespace_mut(
        &mut self,
        namespace: &str,
    ) -> Result<&mut BTreeMap<String, InterfaceState>, SinkError> {
        self.namespaces
            .get_mut(namespace)
            .ok_or_else(|| SinkError::UnknownNamespace(namespace.to_string()))
    }

    fn interface_mut(
        &mut self,
        namespace: &str,
        interface: &str,
    ) -> Result<&mut InterfaceState, SinkError> {
        self.namespace_mut(namespace)?.get_mut(interface).ok_or_else(|| {
            SinkError::UnknownInterface {
                namespace: namespace.to_string(),
                interface: interface.to_string(),
            }
        })
    }
}

impl OperationSink for HostState {
    type Error = SinkError;

    fn apply(&mut self, op: &Operation) -> Result<(), Self::Error> {
        match op {
            Operation::CreateNamespace { name } => {
                if self.namespaces.contains_key(name) {
                    return Err(SinkError::NamespaceExists(name.clone()));
                }
                let mut ifaces = BTreeMap::new();
                ifaces.insert(LOOPBACK.to_string(), InterfaceState::new(InterfaceKind::Loopback));
                self.namespaces.insert(name.clone(), ifaces);
            }
            Operation::CreateBridge { namespace, bridge } => {
                let ns = self.namespace_mut(namespace)?;
                match ns.get(bridge).map(|i| &i.kind) {
                    Some(InterfaceKind::Bridge) => {
                        return Err(SinkError::BridgeExists {
                            namespace: namespace.clone(),
                            bridge: bridge.clone(),
                        });
                    }
                    Some(_) => {
                        return Err(SinkError::InterfaceExists {
                            namespace: namespace.clone(),
                            interface: bridge.clone(),
                        });
                    }
                    None => {}
                }
                ns.insert(bridge.clone(), InterfaceState::new(InterfaceKind::Bridge));
            }
            Operation::SetInterfaceUp { namespace, interface } => {
                self.interface_mut(namespace, interface)?.up = true;
            }
            Operation::EnableForwarding { namespace } => {
                self.namespace_mut(namespace)?.values_mut().for_each(|i| i.forwarding = true);
            }
            Operation::DisableReversePathFilter { namespace } => {
                self.namespace_mut(namespace)?.values_mut().for_each(|i| i.rp_filter = false);
            }
            Operation::CreateVethPair { end_a, end_b } => {
                for end in [end_a, end_b].iter() {
                    if self.root.contains_key(end.as_str()) {
                        return Err(SinkError::InterfaceExists {
                            namespace: ROOT_NAMESPACE.to_string(),
                            interface: end.to_string(),
                        });
                    }
                }
                if end_a == end_b {
                    return Err(SinkError::InterfaceExists {
                        namespace: ROOT_NAMESPACE.to_string(),
                        interface: end_b.clone(),
                    });
                }
                self.root.insert(
                    end_a.clone(),
                    InterfaceState::new(InterfaceKind::Veth { peer: end_b.clone() }),
                );
                self.root.insert(
                    end_b.clone(),
                    InterfaceState::new(InterfaceKind::Veth { peer: end_a.clone() }),
                );
            }
            Operation::MoveInterfaceToNamespace { interface, namespace } => {
                if !self.root.contains_key(interface) {
                    return Err(SinkError::UnknownInterface {
                        namespace: ROOT_NAMESPACE.to_string(),
                        interface: interface.clone(),
                    });
                }
                let ns = self.namespace_mut(namespace)?;
                if ns.contains_key(interface) {
                    return Err(SinkError::InterfaceExists {
                        namespace: namespace.clone(),
                        interface: interface.clone(),
                    });
                }
                // moving an interface resets its administrative state
                if let Some(mut state) = self.root.remove(interface) {
                    state.up = false;
                    self.namespace_mut(namespace)?.insert(interface.clone(), state);
                }
            }
            Operation::AttachToBridge { namespace, interface, bridge } => {
                let ns = self.namespace_mut(namespace)?;
                let is_bridge = ns.get(bridge).map(|b| b.kind == InterfaceKind::Bridge);
                if is_bridge != Some(true) {
                    return Err(SinkError::UnknownBridge {
                        namespace: namespace.clone(),
                        bridge: bridge.clone(),
                    });
                }
                self.interface_mut(namespace, interface)?.master = Some(bridge.clone());
            }
            Operation::AssignAddress { namespace, interface, address } => {
                let iface = self.interface_mut(namespace, interface)?;
                if iface.addresses.contains(address) {
                    return Err(SinkError::AddressExists {
                        namespace: namespace.clone(),
                        interface: interface.clone(),
                        address: address.clone(),
                    });
                }
                iface.addresses.push(address.clone());
            }
        }
        Ok(())
    }
}
