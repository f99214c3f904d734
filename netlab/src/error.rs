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

//! Module containing all error types

use crate::sink::SinkError;
use crate::topology::ValidationError;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The topology is rejected by the validation pass
    #[error("Invalid topology: {0}")]
    ValidationError(#[from] ValidationError),
    /// The host model cannot apply an operation
    #[error("Cannot apply operation: {0}")]
    SinkError(#[from] SinkError),
}
