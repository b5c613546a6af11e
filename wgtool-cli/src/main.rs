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

use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use serde::Serialize;
use wgtool::{query_status, Backend, Elevation, InterfaceInfo, KeyPair};

#[macro_use]
extern crate lazy_static;

mod config;
mod error;
mod profile;

use config::Config;
use error::CliError;

lazy_static! {
    static ref ARGS: Args = Args::parse();
}

#[derive(clap::Parser)]
#[clap(about, version, author)]
struct Args {
    #[clap(long, short = 'c', value_name = "CONFIG")]
    config: Option<String>,

    /// Run every external command through sudo
    #[clap(long, global = true)]
    sudo: bool,

    #[clap(long, short = 'v', global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug, PartialEq)]
enum Command {
    /// Show interfaces and peers as reported by `wg show`
    Status {
        #[clap(value_name = "NAME")]
        name: Option<String>,
    },
    /// Generate a key pair into the key directory
    Genkey {
        #[clap(long, value_name = "DIR")]
        dir: Option<String>,
    },
    /// Create the interface from a profile, with fresh keys, and bring it up
    Up {
        #[clap(long, short = 'p', value_name = "PROFILE")]
        profile: String,
    },
    /// Re-apply a profile to an interface created earlier
    Apply {
        #[clap(long, short = 'p', value_name = "PROFILE")]
        profile: String,
    },
    /// Bring the interface of a profile down
    Down {
        #[clap(long, short = 'p', value_name = "PROFILE")]
        profile: String,
    },
    /// Print the config file a profile would produce
    Render {
        #[clap(long, short = 'p', value_name = "PROFILE")]
        profile: String,
    },
}

#[derive(Serialize)]
struct StatusReport {
    interface: Vec<InterfaceInfo>,
}

/// `--sudo` wins over the settings file; it can only raise elevation.
fn elevation(sudo: bool, cfg: &Config) -> Elevation {
    match sudo {
        true => Elevation::Sudo,
        false => cfg.elevation(),
    }
}

fn backend(cfg: &Config) -> Backend {
    Backend::system(elevation(ARGS.sudo, cfg))
}

fn run(cfg: &Config) -> Result<(), CliError> {
    let options = cfg.interface_options();

    match &ARGS.command {
        Command::Status { name } => {
            let report = StatusReport {
                interface: query_status(&backend(cfg), name.as_deref())?,
            };
            print!("{}", toml::to_string(&report)?);
        }
        Command::Genkey { dir } => {
            let dir = match dir {
                Some(x) => PathBuf::from(x),
                None => options.key_dir.clone(),
            };
            let keys = KeyPair::generate(backend(cfg).runner(), &dir)?;
            println!("{}", keys.public_key());
        }
        Command::Up { profile: path } => {
            let profile = profile::read_profile(path)?;
            let iface = profile.create(backend(cfg), &options)?;
            iface.apply()?;
            println!("{}", iface.public_key());
        }
        Command::Apply { profile: path } => {
            let profile = profile::read_profile(path)?;
            profile.attach(backend(cfg), &options)?.apply()?;
        }
        Command::Down { profile: path } => {
            let profile = profile::read_profile(path)?;
            profile.attach(backend(cfg), &options)?.down()?;
        }
        Command::Render { profile: path } => {
            let profile = profile::read_profile(path)?;
            print!("{}", profile.attach(backend(cfg), &options)?.render()?);
        }
    }

    Ok(())
}

fn main() {
    let cfg = config::read_config(ARGS.config.as_deref());

    let level = match (&cfg, ARGS.verbose) {
        (_, true) => "debug",
        (Ok(x), false) => x.log_level(),
        (Err(_), false) => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let cfg = match cfg {
        Ok(x) => x,
        Err(e) => {
            log::error!("{}", e);
            exit(2);
        }
    };

    if let Err(e) = run(&cfg) {
        log::error!("{}", e);
        exit(1);
    }
}
