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

//! # Runtime System
//!
//! This crate realizes a topology on the local host. It can read topologies from JSON files, check
//! the host for existing namespaces, and execute the commands generated by `netlab`. For
//! simplified usage, check the function [`perform_provisioning`].

#![deny(missing_docs, missing_debug_implementations)]

pub mod executor;
pub mod topology_file;

use executor::{check_collisions, existing_namespaces, CommandExecutor, ExecError};
use netlab::sink::{CommandPrinter, SinkError};
use netlab::{provision, HostState, Topology, ValidationError};
use topology_file::TopologyFileError;

use log::*;
use std::io::Write;
use thiserror::Error;

/// Errors of the runtime system
#[derive(Debug, Error)]
pub enum Error {
    /// The topology is rejected by the validation pass
    #[error("Invalid topology: {0}")]
    ValidationError(#[from] ValidationError),
    /// The host model rejected an operation
    #[error("Check failed: {0}")]
    SinkError(#[from] SinkError),
    /// Executing a command failed
    #[error("Execution failed: {0}")]
    ExecError(#[from] ExecError),
    /// Reading the topology failed
    #[error("Topology file error: {0}")]
    TopologyFileError(#[from] TopologyFileError),
    /// Writing the commands failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to do with the compiled operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Print the commands to stdout, without executing anything
    DryRun,
    /// Apply the commands to an empty in-memory host, to detect collisions
    Check,
    /// Execute the commands on this host
    Execute,
}

/// # Provision the topology
///
/// Validates the topology, compiles it and passes the operations to the sink selected by `mode`.
/// Returns the number of operations applied.
///
/// In [`ExecutionMode::Execute`], the host is first checked for namespaces that already exist,
/// which would make the provisioning fail halfway through. Execution stops at the first failing
/// command. Nothing that was already created is removed again.
pub fn perform_provisioning(topo: &Topology, mode: ExecutionMode) -> Result<usize, Error> {
    topo.validate()?;
    info!(
        "Topology with {} devices, {} segments and {} circuits",
        topo.devices().count(),
        topo.segments().count(),
        topo.circuits().count()
    );

    let applied = match mode {
        ExecutionMode::DryRun => {
            let stdout = std::io::stdout();
            let mut printer = CommandPrinter::new(stdout.lock());
            let applied = provision(topo, &mut printer)?;
            printer.into_inner().flush()?;
            applied
        }
        ExecutionMode::Check => {
            let mut host = HostState::new();
            let applied = provision(topo, &mut host)?;
            info!(
                "Check passed: {} namespaces, {} operations",
                host.namespaces().count(),
                applied
            );
            applied
        }
        ExecutionMode::Execute => {
            check_collisions(topo, &existing_namespaces()?)?;
            let mut executor = CommandExecutor::new();
            let applied = provision(topo, &mut executor)?;
            info!("Executed {} commands", executor.num_executed());
            applied
        }
    };

    Ok(applied)
}
