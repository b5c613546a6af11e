/*
 * SPDX-FileCopyrightText: 2022 Empo Inc.
 *
 * SPDX-License-Identifier: GPL-3.0-or-later
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

//! Control-plane wrapper around the WireGuard command line tools.
//!
//! Keys come from `wg genkey`/`wg pubkey`, interfaces are configured by
//! writing a config file and handing it to `wg setconf` (Linux) or
//! `wg-quick` (macOS), and status is scraped from `wg show`. All of it is
//! blocking and single threaded.

#[macro_use]
extern crate lazy_static;

mod backend;
pub mod error;
pub mod exec;
mod file;
pub mod interface;
pub mod keys;
pub mod peer;
pub mod platform_specific;
pub mod status;
pub mod wgconf;

#[cfg(test)]
mod test_util;

pub use backend::Backend;
pub use error::WgError;
pub use exec::{CommandOutput, CommandRunner, Elevation, SystemRunner};
pub use interface::{InterfaceOptions, NetInterface};
pub use keys::KeyPair;
pub use peer::Peer;
pub use platform_specific::{PlatformOps, PlatformSpecificFactory};
pub use status::{get_info, query_status, InterfaceInfo};
