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

use crate::exec::{CommandRunner, Elevation, SystemRunner};
use crate::platform_specific::{PlatformOps, PlatformSpecificFactory};

/// The platform commands together with the runner that executes them.
pub struct Backend {
    platform: Box<dyn PlatformOps>,
    runner: Box<dyn CommandRunner>,
}

impl Backend {
    pub fn new(platform: Box<dyn PlatformOps>, runner: Box<dyn CommandRunner>) -> Backend {
        Backend { platform, runner }
    }

    /// Current OS, real processes.
    pub fn system(elevation: Elevation) -> Backend {
        Backend::new(
            PlatformSpecificFactory::get_current(),
            Box::new(SystemRunner::new(elevation)),
        )
    }

    pub fn for_os(os: &str, runner: Box<dyn CommandRunner>) -> Backend {
        Backend::new(PlatformSpecificFactory::get_platform(os), runner)
    }

    pub fn platform(&self) -> &dyn PlatformOps {
        &*self.platform
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        &*self.runner
    }
}
