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

//! # Topology Files
//!
//! Topologies can be stored as JSON files of the following form:
//!
//! ```json
//! {
//!   "devices": ["X", "Y"],
//!   "segments": ["L"],
//!   "circuits": [
//!     { "a": "X", "b": "L", "address": "10.0.0.1/24" },
//!     { "a": "X", "b": "Y", "address": "10.0.1." }
//!   ]
//! }
//! ```
//!
//! The address of a circuit is a bridge address if `b` is one of the segments, and a
//! point-to-point prefix otherwise (see [`Topology::add_circuit`]).

use netlab::Topology;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors while reading or writing topology files
#[derive(Debug, Error)]
pub enum TopologyFileError {
    /// Cannot read the file
    #[error("Cannot read the topology file: {0}")]
    Io(#[from] std::io::Error),
    /// Cannot parse the JSON content
    #[error("Cannot parse the topology: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct TopologyFile {
    #[serde(default)]
    devices: Vec<String>,
    #[serde(default)]
    segments: Vec<String>,
    #[serde(default)]
    circuits: Vec<CircuitEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CircuitEntry {
    a: String,
    b: String,
    address: String,
}

impl From<TopologyFile> for Topology {
    fn from(file: TopologyFile) -> Self {
        let mut t = Topology::new();
        file.devices.into_iter().for_each(|d| t.add_device(d));
        file.segments.into_iter().for_each(|s| t.add_segment(s));
        for c in file.circuits {
            t.add_circuit(c.a, c.b, c.address);
        }
        t
    }
}

impl From<&Topology> for TopologyFile {
    fn from(topo: &Topology) -> Self {
        Self {
            devices: topo.devices().map(|d| d.name.clone()).collect(),
            segments: topo.segments().map(|s| s.name.clone()).collect(),
            circuits: topo
                .circuits()
                .map(|c| CircuitEntry {
                    a: c.a.clone(),
                    b: c.b.clone(),
                    address: c.address.as_str().to_string(),
                })
                .collect(),
        }
    }
}

/// Parse a topology from its JSON representation. The topology is not validated.
pub fn parse_topology(json: &str) -> Result<Topology, TopologyFileError> {
    let file: TopologyFile = serde_json::from_str(json)?;
    Ok(file.into())
}

/// Read and parse a topology file. The topology is not validated.
pub fn load_topology(path: impl AsRef<Path>) -> Result<Topology, TopologyFileError> {
    let json = std::fs::read_to_string(path)?;
    parse_topology(&json)
}

/// Serialize the topology as (pretty-printed) JSON.
pub fn to_json(topo: &Topology) -> Result<String, TopologyFileError> {
    Ok(serde_json::to_string_pretty(&TopologyFile::from(topo))?)
}
