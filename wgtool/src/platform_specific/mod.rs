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

// Platform common
pub(crate) mod common;

mod linux;
mod macos;
mod unsupported;

pub use self::common::PlatformOps;
pub use self::linux::Linux;
pub use self::macos::Macos;
pub use self::unsupported::Unsupported;

pub struct PlatformSpecificFactory;

impl PlatformSpecificFactory {
    /// Picks the implementation for an OS name as reported by
    /// `std::env::consts::OS`. Unknown names get [`Unsupported`].
    pub fn get_platform(os: &str) -> Box<dyn PlatformOps> {
        match os {
            "linux" => Box::new(Linux),
            "macos" | "darwin" => Box::new(Macos),
            other => Box::new(Unsupported::new(other)),
        }
    }

    pub fn get_current() -> Box<dyn PlatformOps> {
        Self::get_platform(std::env::consts::OS)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_factory_selection() {
        assert_eq!(PlatformSpecificFactory::get_platform("linux").os(), "linux");
        assert_eq!(PlatformSpecificFactory::get_platform("darwin").os(), "macos");

        let other = PlatformSpecificFactory::get_platform("plan9");
        assert_eq!(other.os(), "plan9");
        assert!(other.default_config_dir().is_err());
    }
}
