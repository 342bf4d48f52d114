//! Finding a default `sigrok-cli` executable.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Standard install locations of the Windows sigrok-cli installer.
pub const WINDOWS_CANDIDATES: [&str; 2] = [
    r"C:\Program Files\sigrok\sigrok-cli\sigrok-cli.exe",
    r"C:\Program Files (x86)\sigrok\sigrok-cli\sigrok-cli.exe",
];

#[cfg(windows)]
const EXE_NAME: &str = "sigrok-cli.exe";
#[cfg(not(windows))]
const EXE_NAME: &str = "sigrok-cli";

/// Look for `name` in every directory of a `PATH`-style list.
pub fn search_path_list(path_list: &OsStr, name: &str) -> Option<PathBuf> {
    std::env::split_paths(path_list)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Best guess for the sigrok-cli path: known install folders, then `PATH`.
/// `None` when nothing is found.
pub fn find_sigrok_default() -> Option<PathBuf> {
    if let Some(found) = WINDOWS_CANDIDATES
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
    {
        return Some(found.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    search_path_list(&path_var, EXE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_executable_in_path_list() {
        let dir = std::env::temp_dir().join(format!("dmm_locate_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("fake-tool"), b"").unwrap();

        let missing = std::env::temp_dir().join("dmm_locate_missing");
        let list = std::env::join_paths([missing, dir.clone()]).unwrap();
        assert_eq!(search_path_list(&list, "fake-tool"), Some(dir.join("fake-tool")));
        assert_eq!(search_path_list(&list, "other-tool"), None);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
