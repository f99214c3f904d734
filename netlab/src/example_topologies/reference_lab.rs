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

//! Reference Lab

use super::ExampleTopology;
use crate::topology::Topology;

/// # Reference Lab
///
/// Six routers `R1` to `R6` in three stages of two routers each. Every router is connected to both
/// routers of the next stage, and the two routers of the first and of the last stage are connected
/// to each other. The first stage shares the segment `LANA` with host `S1`, and the last stage
/// shares `LANB` with host `S2`.
///
/// ```text
///          .--- R1 ---- R3 ---- R5 ---.
///          |    |  \  /    \  /  |    |
///  S1 --- LANA  |   \/      \/   |  LANB --- S2
///          |    |   /\      /\   |    |
///          '--- R2 ---- R4 ---- R6 ---'
/// ```
///
/// - `LANA`: `192.168.100.0/24`, with `S1` at `.100`, `R1` at `.1` and `R2` at `.2`.
/// - `LANB`: `192.168.200.0/24`, with `S2` at `.100`, `R5` at `.1` and `R6` at `.2`.
/// - Backbone links are numbered `192.168.1.0/31` to `192.168.10.0/31`.
pub struct ReferenceLab;

impl ExampleTopology for ReferenceLab {
    fn topology() -> Topology {
        let mut t = Topology::new();

        for d in ["S1", "S2", "R1", "R2", "R3", "R4", "R5", "R6"].iter() {
            t.add_device(*d);
        }
        t.add_segment("LANA");
        t.add_segment("LANB");

        // left segment
        t.add_circuit("S1", "LANA", "192.168.100.100/24");
        t.add_circuit("R1", "LANA", "192.168.100.1/24");
        t.add_circuit("R2", "LANA", "192.168.100.2/24");

        // backbone
        t.add_circuit("R1", "R2", "192.168.1.");
        t.add_circuit("R1", "R3", "192.168.2.");
        t.add_circuit("R2", "R4", "192.168.3.");
        t.add_circuit("R1", "R4", "192.168.4.");
        t.add_circuit("R2", "R3", "192.168.5.");

        t.add_circuit("R3", "R5", "192.168.6.");
        t.add_circuit("R4", "R6", "192.168.7.");
        t.add_circuit("R3", "R6", "192.168.8.");
        t.add_circuit("R4", "R5", "192.168.9.");

        t.add_circuit("R5", "R6", "192.168.10.");

        // right segment
        t.add_circuit("S2", "LANB", "192.168.200.100/24");
        t.add_circuit("R5", "LANB", "192.168.200.1/24");
        t.add_circuit("R6", "LANB", "192.168.200.2/24");

        t
    }
}
