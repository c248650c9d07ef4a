// NetWeave: Compiling Abstract Network Models into Device Configurations
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

use crate::model::{AsId, DeviceId, Ipv4Net, LinkId, ModelError};
use thiserror::Error;

/// Main error type
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Error in the overlay model
    #[error("Model Error: {0}")]
    ModelError(#[from] ModelError),
    /// Error during compilation of a device
    #[error("Compile Error: {0}")]
    CompileError(#[from] CompileError),
}

/// Errors raised while compiling a single device. All variants are fatal model inconsistencies:
/// they abort the compilation of the device, and thereby the entire platform pass. Overlay
/// non-membership is never an error (the corresponding record section is simply omitted).
#[derive(Debug, Error, PartialEq)]
pub enum CompileError {
    /// Device is not present in the render store or the model
    #[error("Device was not found: {0:?}")]
    DeviceNotFound(DeviceId),
    /// A physical link has no IP overlay data (or no address for this endpoint)
    #[error("Physical link {1:?} of device {0:?} has no IP overlay data")]
    MissingIpLink(DeviceId, LinkId),
    /// A render edge has no interface identifier assigned
    #[error("Render edge {1:?} of device {0:?} has no interface identifier")]
    MissingInterfaceId(DeviceId, LinkId),
    /// The device has no loopback address in the IP overlay
    #[error("Device {0:?} has no loopback address")]
    MissingLoopback(DeviceId),
    /// The AS of the device has no advertised-subnet block
    #[error("No advertised-subnet block for {0:?}")]
    MissingAsnBlock(AsId),
    /// Two OSPF links of one device collide on the same destination network
    #[error("Device {0:?} has two OSPF links with the same network {1}")]
    DuplicateOspfNetwork(DeviceId, Ipv4Net),
    /// Two BGP sessions of one device land in the same neighbor bucket
    #[error("Device {0:?} has two BGP sessions to neighbor {1}")]
    DuplicateBgpSession(DeviceId, String),
    /// The interface name source ran out of names before all render edges were assigned
    #[error("Interface names exhausted while assigning edges of device {0:?}")]
    InterfaceNamesExhausted(DeviceId),
}
