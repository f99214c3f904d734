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

//! # Operations
//! Low-level configuration operations emitted by the [compiler](crate::compiler). Each operation
//! is a single step on the host, which can be rendered as a command using the
//! [printer](crate::printer), or applied by any [`OperationSink`](crate::sink::OperationSink).

use std::fmt;

/// Single host configuration step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create a new network namespace
    CreateNamespace {
        /// Name of the namespace
        name: String,
    },
    /// Create a bridge inside a namespace
    CreateBridge {
        /// Namespace in which the bridge is created
        namespace: String,
        /// Name of the bridge interface
        bridge: String,
    },
    /// Set the administrative state of an interface to up
    SetInterfaceUp {
        /// Namespace of the interface
        namespace: String,
        /// Interface name
        interface: String,
    },
    /// Enable IPv4 forwarding on all current interfaces of the namespace
    EnableForwarding {
        /// Namespace to configure
        namespace: String,
    },
    /// Disable reverse path filtering on all current interfaces of the namespace
    DisableReversePathFilter {
        /// Namespace to configure
        namespace: String,
    },
    /// Create a virtual ethernet pair in the root namespace
    CreateVethPair {
        /// Name of the first end
        end_a: String,
        /// Name of the second end
        end_b: String,
    },
    /// Move an interface from the root namespace into a network namespace
    MoveInterfaceToNamespace {
        /// Interface to move
        interface: String,
        /// Target namespace
        namespace: String,
    },
    /// Enslave an interface to a bridge
    AttachToBridge {
        /// Namespace of both the interface and the bridge
        namespace: String,
        /// Interface to attach
        interface: String,
        /// Bridge name
        bridge: String,
    },
    /// Assign an address (with prefix length) to an interface
    AssignAddress {
        /// Namespace of the interface
        namespace: String,
        /// Interface name
        interface: String,
        /// Address including the prefix length, like `10.0.0.1/24`
        address: String,
    },
}

impl Operation {
    /// Returns the namespace in which this operation takes effect. For
    /// [`Operation::CreateVethPair`], this is `None`, since the pair is created in the root
    /// namespace.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::CreateNamespace { name } => Some(name),
            Self::CreateBridge { namespace, .. }
            | Self::SetInterfaceUp { namespace, .. }
            | Self::EnableForwarding { namespace }
            | Self::DisableReversePathFilter { namespace }
            | Self::MoveInterfaceToNamespace { namespace, .. }
            | Self::AttachToBridge { namespace, .. }
            | Self::AssignAddress { namespace, .. } => Some(namespace),
            Self::CreateVethPair { .. } => None,
        }
    }

    /// Returns true if the operation creates something (namespace, bridge or veth pair). These are
    /// the operations failing when the topology is provisioned a second time.
    pub fn is_creation(&self) -> bool {
        matches!(
            self,
            Self::CreateNamespace { .. } | Self::CreateBridge { .. } | Self::CreateVethPair { .. }
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateNamespace { name } => write!(f, "create namespace {}", name),
            Self::CreateBridge { namespace, bridge } => {
                write!(f, "[{}] create bridge {}", namespace, bridge)
            }
            Self::SetInterfaceUp { namespace, interface } => {
                write!(f, "[{}] set {} up", namespace, interface)
            }
            Self::EnableForwarding { namespace } => write!(f, "[{}] enable forwarding", namespace),
            Self::DisableReversePathFilter { namespace } => {
                write!(f, "[{}] disable rp_filter", namespace)
            }
            Self::CreateVethPair { end_a, end_b } => {
                write!(f, "create veth pair {} <-> {}", end_a, end_b)
            }
            Self::MoveInterfaceToNamespace { interface, namespace } => {
                write!(f, "move {} into {}", interface, namespace)
            }
            Self::AttachToBridge { namespace, interface, bridge } => {
                write!(f, "[{}] attach {} to {}", namespace, interface, bridge)
            }
            Self::AssignAddress { namespace, interface, address } => {
                write!(f, "[{}] assign {} to {}", namespace, address, interface)
            }
        }
    }
}
