//! Host operating system detection.
use std::fmt;
use std::path::{Path, PathBuf};

/// Location of the avr-libc include directory inside an Arduino installation.
const AVR_INCLUDE_SUBPATH: [&str; 6] = ["hardware", "tools", "avr", "lib", "avr", "include"];

/// Detected operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-like systems.
    Linux,
    /// macOS.
    MacOs,
    /// Windows (header links unsupported).
    Windows,
}

impl Os {
    /// Relative path segments of the include directory for this family.
    ///
    /// Returns `None` for families where header links are unsupported.
    #[must_use]
    pub const fn include_subpath(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Linux | Self::MacOs => Some(&AVR_INCLUDE_SUBPATH),
            Self::Windows => None,
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with an explicit OS family.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Join the platform include subpath onto `root`.
    #[must_use]
    pub fn include_dir(&self, root: &Path) -> Option<PathBuf> {
        self.os
            .include_subpath()
            .map(|segments| segments.iter().fold(root.to_path_buf(), |p, s| p.join(s)))
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "windows") {
            Os::Windows
        } else if cfg!(target_os = "macos") {
            Os::MacOs
        } else {
            // Other Unix-like systems share the Linux layout
            Os::Linux
        }
    }
}
