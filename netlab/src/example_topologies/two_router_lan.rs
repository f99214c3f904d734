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

//! Two routers sharing a segment

use super::ExampleTopology;
use crate::topology::{Circuit, Topology};

/// # Two Router LAN
///
/// Router `X` is attached to the segment `L` and has a point-to-point link to router `Y`.
///
/// ```text
/// L --- X --- Y
/// ```
pub struct TwoRouterLan;

impl ExampleTopology for TwoRouterLan {
    fn topology() -> Topology {
        let mut t = Topology::new();
        t.add_segment("L");
        t.add_device("X");
        t.add_device("Y");
        t.push_circuit(Circuit::bridged("X", "L", "10.0.0.1/24"));
        t.push_circuit(Circuit::point_to_point("X", "Y", "10.0.1."));
        t
    }
}
