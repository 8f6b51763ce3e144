// File: crates/kbar/src/host.rs
// Summary: Host environment classification used to pick a font install strategy.

use std::path::Path;

/// Where the process runs, as far as font installation is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEnvironment {
    /// Linux desktop/server with a package manager.
    DesktopLinux,
    /// Hosted notebook runtime (Colab-style) with a writable `/content`.
    NotebookHosted,
    Other,
}

impl HostEnvironment {
    /// Inspect the running process once.
    pub fn detect() -> Self {
        let env_marker = |k: &str| std::env::var_os(k).is_some();
        let notebook = env_marker("COLAB_RELEASE_TAG")
            || env_marker("COLAB_GPU")
            || (Path::new("/content").is_dir() && Path::new("/datalab").is_dir());
        Self::classify(notebook, cfg!(target_os = "linux"))
    }

    /// Notebook hosts win over the OS check, mirroring the install order.
    pub fn classify(notebook: bool, linux: bool) -> Self {
        if notebook {
            HostEnvironment::NotebookHosted
        } else if linux {
            HostEnvironment::DesktopLinux
        } else {
            HostEnvironment::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notebook_wins_over_linux() {
        assert_eq!(HostEnvironment::classify(true, true), HostEnvironment::NotebookHosted);
        assert_eq!(HostEnvironment::classify(false, true), HostEnvironment::DesktopLinux);
        assert_eq!(HostEnvironment::classify(false, false), HostEnvironment::Other);
    }
}
