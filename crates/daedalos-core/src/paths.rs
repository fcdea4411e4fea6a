//! Standard paths used by Daedalos tools

use std::path::PathBuf;

/// Standard Daedalos paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Config directory (~/.config/daedalos)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("daedalos");

        Self { config }
    }

    /// YAML config file for a tool
    pub fn config_file(&self, tool: &str) -> PathBuf {
        self.config.join(format!("{}.yaml", tool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let paths = Paths {
            config: PathBuf::from("/tmp/daedalos-test/config"),
        };
        assert_eq!(
            paths.config_file("passwords"),
            PathBuf::from("/tmp/daedalos-test/config/passwords.yaml")
        );
    }

    #[test]
    fn test_default_dir_is_namespaced() {
        assert!(Paths::new().config.ends_with("daedalos"));
    }
}
