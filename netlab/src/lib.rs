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

#![deny(missing_docs)]

//! # NetLab: Compiling Lab Topologies into Network Namespaces
//! This is a library for turning a declarative description of a small network into the ordered
//! list of configuration steps that instantiate it on a single linux host, using network
//! namespaces, veth pairs and bridges. No physical hardware is needed to run a multi-router lab.
//!
//! ## Structure
//!
//! - **[`Topology`](topology)**: Devices (L3), segments (L2) and the circuits connecting them,
//!   together with the [validation pass](topology::Topology::validate).
//!
//! - **[`Compiler`](compiler)**: Transforms the topology into a stream of
//!   [`Operations`](operation::Operation), in three phases (segments, devices and circuits).
//!
//! - **[`Sinks`](sink)**: Consumers of the operation stream. A printer for dry runs, and an
//!   in-memory host model detecting collisions.
//!
//! - **[`Printer`](printer)**: Renders operations as `ip` commands.
//!
//! - **[`ExampleTopologies`](example_topologies)**: Prepared topologies.
//!
//! ## Usage
//!
//! ```
//! use netlab::example_topologies::{ExampleTopology, TwoRouterLan};
//! use netlab::sink::HostState;
//! use netlab::{compile_validated, provision, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let topo = TwoRouterLan::topology();
//!
//!     // validate and compile
//!     let ops = compile_validated(&topo)?;
//!
//!     // apply the operations on a simulated host
//!     let mut host = HostState::new();
//!     let applied = provision(&topo, &mut host)?;
//!     assert_eq!(applied, ops.len());
//!     assert!(host.has_namespace("L"));
//!     Ok(())
//! }
//! ```

pub mod compiler;
mod error;
pub mod example_topologies;
pub mod operation;
pub mod printer;
pub mod sink;
pub mod topology;

#[cfg(test)]
mod test;

pub use compiler::{compile, provision, Phase, BRIDGE_NAME};
pub use error::Error;
pub use operation::Operation;
pub use sink::{HostState, OperationSink};
pub use topology::{Circuit, CircuitAddress, Topology, ValidationError};

/// Validate the topology, and compile it if it is valid.
pub fn compile_validated(topo: &Topology) -> Result<Vec<Operation>, ValidationError> {
    topo.validate()?;
    Ok(compile(topo))
}

/// Validate the topology, and apply it on an empty [`HostState`]. The resulting host state is
/// returned.
pub fn check(topo: &Topology) -> Result<HostState, Error> {
    topo.validate()?;
    let mut host = HostState::new();
    provision(topo, &mut host)?;
    Ok(host)
}
