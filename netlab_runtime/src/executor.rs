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

//! Execution of the operation stream on the local host.

use netlab::printer::{command, command_line};
use netlab::{Operation, OperationSink, Topology};

use lazy_static::lazy_static;
use log::*;
use regex::Regex;
use std::process::Command;
use thiserror::Error;

/// Errors while executing commands on the host
#[derive(Debug, Error)]
pub enum ExecError {
    /// The command could not be started
    #[error("Cannot run command: {0}")]
    Io(#[from] std::io::Error),
    /// The command exited with a non-zero status
    #[error("Command `{command}` failed with status {status:?}: {stderr}")]
    CommandFailed {
        /// Command line that was executed
        command: String,
        /// Exit code, if the command was not terminated by a signal
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },
    /// A namespace of the topology already exists on the host
    #[error("Namespace {0} already exists on the host")]
    NamespaceCollision(String),
    /// Cannot parse the output of `ip netns list`
    #[error("Unexpected line in the namespace list: {0:?}")]
    UnexpectedNamespaceListing(String),
}

lazy_static! {
    static ref NETNS_LINE_RE: Regex = Regex::new(r"^(\S+)( \(id: \d+\))?$").unwrap();
}

/// # Command Executor
///
/// Runs the `ip` command of every operation on the local host, and waits for it to finish. This
/// requires the permission to manage network namespaces (usually root). Execution is strictly
/// sequential.
#[derive(Debug, Default)]
pub struct CommandExecutor {
    executed: usize,
}

impl CommandExecutor {
    /// Create a new executor
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commands that were successfully executed
    pub fn num_executed(&self) -> usize {
        self.executed
    }
}

impl OperationSink for CommandExecutor {
    type Error = ExecError;

    fn apply(&mut self, op: &Operation) -> Result<(), Self::Error> {
        let args = command(op);
        debug!("executing: {}", command_line(op));
        let output = Command::new(&args[0]).args(&args[1..]).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("`{}` failed: {}", command_line(op), stderr);
            return Err(ExecError::CommandFailed {
                command: command_line(op),
                status: output.status.code(),
                stderr,
            });
        }
        self.executed += 1;
        Ok(())
    }
}

/// Returns the names of all network namespaces that currently exist on the host.
pub fn existing_namespaces() -> Result<Vec<String>, ExecError> {
    let output = Command::new("ip").args(&["netns", "list"]).output()?;
    if !output.status.success() {
        return Err(ExecError::CommandFailed {
            command: "ip netns list".to_string(),
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    parse_netns_list(&String::from_utf8_lossy(&output.stdout))
}

/// Parse the output of `ip netns list`. Each line contains the name of the namespace, optionally
/// followed by its id, like `R1 (id: 3)`.
pub fn parse_netns_list(listing: &str) -> Result<Vec<String>, ExecError> {
    listing
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| {
            NETNS_LINE_RE
                .captures(l)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .ok_or_else(|| ExecError::UnexpectedNamespaceListing(l.to_string()))
        })
        .collect()
}

/// Make sure that none of the namespaces of the topology is already present on the host.
pub fn check_collisions(topo: &Topology, existing: &[String]) -> Result<(), ExecError> {
    let collision =
        topo.namespaces().into_iter().find(|ns| existing.iter().any(|e| e.as_str() == *ns));
    match collision {
        Some(ns) => Err(ExecError::NamespaceCollision(ns.to_string())),
        None => Ok(()),
    }
}
