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

use netlab::example_topologies::{ExampleTopology, ReferenceLab, TwoRouterLan};
use netlab::Topology;
use netlab_runtime::topology_file::{load_topology, to_json};
use netlab_runtime::{perform_provisioning, ExecutionMode};

use clap::{ArgEnum, Parser};
use log::*;
use std::error::Error;

mod mode;
use mode::{Mode, ModeError};

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the env logger
    pretty_env_logger::init();
    // run clap
    let args = CommandLineArguments::parse();

    let topo = get_topo(&args)?;

    if args.dump_json {
        println!("{}", to_json(&topo)?);
        return Ok(());
    }

    match args.mode {
        Mode::Create => {
            let exec_mode = if args.execute {
                ExecutionMode::Execute
            } else if args.check {
                ExecutionMode::Check
            } else {
                ExecutionMode::DryRun
            };
            let applied = perform_provisioning(&topo, exec_mode)?;
            info!("Provisioning done ({} operations)", applied);
        }
        Mode::Destroy => return Err(ModeError::UnsupportedMode(Mode::Destroy).into()),
    }

    Ok(())
}

fn get_topo(args: &CommandLineArguments) -> Result<Topology, Box<dyn Error>> {
    match &args.topology {
        Some(filename) => {
            info!("Reading the topology from {}", filename);
            Ok(load_topology(filename)?)
        }
        None => Ok(args.example.topology()),
    }
}

/// Built-in topologies selectable on the command line
#[derive(ArgEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Example {
    /// Six routers and two hosts on two segments
    #[clap(name = "reference-lab")]
    ReferenceLab,
    /// Two routers, one of them attached to a segment
    #[clap(name = "two-router-lan")]
    TwoRouterLan,
}

impl Example {
    fn topology(&self) -> Topology {
        match self {
            Example::ReferenceLab => ReferenceLab::topology(),
            Example::TwoRouterLan => TwoRouterLan::topology(),
        }
    }
}

/// Compile a lab topology into the commands creating it with network namespaces, veth pairs and
/// bridges. By default, the commands are only printed.
#[derive(Parser, Debug)]
#[clap(name = "netlab", author = "Tibor Schneider")]
struct CommandLineArguments {
    /// Operating mode (`create` or `destroy`)
    #[clap(short = 'm', long, default_value = "create")]
    mode: Mode,
    /// JSON file describing the topology
    #[clap(short = 't', long)]
    topology: Option<String>,
    /// Built-in topology, used if no file is given
    #[clap(arg_enum, short = 'e', long, default_value = "reference-lab")]
    example: Example,
    /// Execute the commands on this host (requires root)
    #[clap(short = 'x', long, conflicts_with = "check")]
    execute: bool,
    /// Apply the commands to a simulated host instead of printing them
    #[clap(short = 'c', long)]
    check: bool,
    /// Print the topology as JSON and exit
    #[clap(long)]
    dump_json: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn select_example() {
        let args = CommandLineArguments::try_parse_from(&["netlab"]).unwrap();
        assert_eq!(args.example, Example::ReferenceLab);
        assert_eq!(args.mode, Mode::Create);

        let args =
            CommandLineArguments::try_parse_from(&["netlab", "-e", "two-router-lan"]).unwrap();
        assert_eq!(args.example, Example::TwoRouterLan);
        assert_eq!(get_topo(&args).unwrap(), TwoRouterLan::topology());
    }

    #[test]
    fn reject_unknown_values() {
        assert!(CommandLineArguments::try_parse_from(&["netlab", "--example", "abilene"]).is_err());
        assert!(CommandLineArguments::try_parse_from(&["netlab", "--mode", "delete"]).is_err());
        let args = CommandLineArguments::try_parse_from(&["netlab", "--mode", "destroy"]).unwrap();
        assert_eq!(args.mode, Mode::Destroy);
    }
}
