//! Static system information for `--version` and `--os-version`.

use std::env::consts;

/// Which facts a system query asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemQuery {
    /// Report the program version
    pub version: bool,
    /// Report the operating system
    pub os: bool,
}

impl SystemQuery {
    /// Lines answering the query, version first.
    #[must_use]
    pub fn report(self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.version {
            lines.push(version());
        }
        if self.os {
            lines.push(os_version());
        }
        lines
    }
}

/// Program name and version, e.g. `coind v0.1.0`.
#[must_use]
pub fn version() -> String {
    format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Operating system the program was built for, e.g. `OS: linux x86_64 (unix)`.
#[must_use]
pub fn os_version() -> String {
    format!("OS: {} {} ({})", consts::OS, consts::ARCH, consts::FAMILY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_names_program_and_crate_version() {
        assert_eq!(version(), format!("coind v{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn os_version_names_build_target() {
        let line = os_version();
        assert!(line.starts_with("OS: "));
        assert!(line.contains(consts::OS));
        assert!(line.contains(consts::ARCH));
    }

    #[test]
    fn report_lists_requested_facts_in_order() {
        let both = SystemQuery {
            version: true,
            os: true,
        };
        assert_eq!(both.report(), vec![version(), os_version()]);

        let os_only = SystemQuery {
            version: false,
            os: true,
        };
        assert_eq!(os_only.report(), vec![os_version()]);
    }
}
