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

//! Operating mode selected on the command line

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Operating mode of the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Instantiate the topology
    Create,
    /// Tear the topology down again. Not supported.
    Destroy,
}

/// Errors while selecting the mode
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeError {
    /// The mode is not known at all
    #[error("Unknown mode: {0:?} (expected `create` or `destroy`)")]
    UnknownMode(String),
    /// The mode is known, but not implemented
    #[error("Mode {0} is not supported")]
    UnsupportedMode(Mode),
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Mode::Create),
            "destroy" => Ok(Mode::Destroy),
            other => Err(ModeError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Create => write!(f, "create"),
            Mode::Destroy => write!(f, "destroy"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_mode() {
        assert_eq!("create".parse::<Mode>(), Ok(Mode::Create));
        assert_eq!("destroy".parse::<Mode>(), Ok(Mode::Destroy));
        assert_eq!("Create".parse::<Mode>(), Err(ModeError::UnknownMode("Create".to_string())));
        assert_eq!("".parse::<Mode>(), Err(ModeError::UnknownMode(String::new())));
    }

    #[test]
    fn display() {
        assert_eq!(Mode::Destroy.to_string(), "destroy");
        assert_eq!(
            ModeError::UnsupportedMode(Mode::Destroy).to_string(),
            "Mode destroy is not supported"
        );
    }
}
