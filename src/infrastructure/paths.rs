//! Sandbox path helpers.
//!
//! Inside the Zellij plugin sandbox the host filesystem is reachable under
//! `/host`, which points at the cwd of the last focused terminal (usually the
//! user's home directory).

use std::path::PathBuf;

/// Directory holding the trace log: `/host/.local/share/zellij/zadmin`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zadmin")
}

/// Maps `~` and `~/...` onto the sandbox's `/host` mount. Other paths pass
/// through untouched.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_lives_under_zellij_share() {
        assert_eq!(get_data_dir(), PathBuf::from("/host/.local/share/zellij/zadmin"));
    }

    #[test]
    fn tilde_maps_to_host_mount() {
        assert_eq!(expand_tilde("~/themes/night.toml"), "/host/themes/night.toml");
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("/etc/zadmin.toml"), "/etc/zadmin.toml");
        assert_eq!(expand_tilde("~other/x"), "~other/x");
    }
}
