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

use std::fs::{self, DirBuilder, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Creates or truncates `path` and writes `contents` synchronously.
///
/// `mode` only applies when the file is created; an existing file keeps
/// its permissions.
pub(crate) fn write_truncate(path: &Path, contents: &[u8], mode: u32) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    Ok(())
}

/// Like [`write_truncate`] with mode 0600, also tightening a file that
/// already existed with looser permissions.
pub(crate) fn write_secret(path: &Path, contents: &[u8]) -> Result<()> {
    write_truncate(path, contents, 0o600)?;
    set_mode(path, 0o600)
}

/// Creates `path` and any missing parents. `mode` applies to the
/// directories created here, never to ones already present.
pub(crate) fn create_dir(path: &Path, mode: u32) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }

    builder.create(path)?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_write_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wg0.conf");

        write_truncate(&path, b"a much longer first version\n", 0o644).unwrap();
        write_truncate(&path, b"short\n", 0o644).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_secret_is_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("private.key");

        write_truncate(&path, b"x", 0o644).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        write_secret(&path, b"y").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&path).unwrap(), "y");
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_modes_are_kept() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("conf");
        let path = conf.join("wg0.conf");
        fs::create_dir(&conf).unwrap();
        fs::set_permissions(&conf, fs::Permissions::from_mode(0o700)).unwrap();
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        create_dir(&conf, 0o755).unwrap();
        write_truncate(&path, b"new\n", 0o644).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&conf), 0o700);
        assert_eq!(mode(&path), 0o600);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_create_dir_makes_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c");

        create_dir(&path, 0o755).unwrap();
        create_dir(&path, 0o755).unwrap();

        assert!(path.is_dir());
    }
}
