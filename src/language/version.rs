use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Version of Robot Framework the test data is written for. Some syntax is
/// only recognized from (or until) a given release.
///
/// A version without a patch number sorts before any version with one, so
/// that `3.0` < `3.0.0` < `3.0.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RobotVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl RobotVersion {
    pub const fn new(major: u32, minor: u32) -> RobotVersion {
        RobotVersion {
            major,
            minor,
            patch: None,
        }
    }

    pub const fn with_patch(major: u32, minor: u32, patch: u32) -> RobotVersion {
        RobotVersion {
            major,
            minor,
            patch: Some(patch),
        }
    }

    /// Pick the first `major.minor[.patch]` out of a string, which lets this
    /// accept the output of `robot --version` as well as a bare number.
    pub fn parse(text: &str) -> Option<RobotVersion> {
        let re = crate::compile!(r"(\d+)\.(\d+)(?:\.(\d+))?");
        let captures = re.captures(text)?;

        let major = captures
            .get(1)?
            .as_str()
            .parse()
            .ok()?;
        let minor = captures
            .get(2)?
            .as_str()
            .parse()
            .ok()?;
        let patch = match captures.get(3) {
            Some(value) => Some(
                value
                    .as_str()
                    .parse()
                    .ok()?,
            ),
            None => None,
        };

        Some(RobotVersion {
            major,
            minor,
            patch,
        })
    }

    pub fn is_older_than(&self, other: &RobotVersion) -> bool {
        self < other
    }

    pub fn is_newer_or_equal(&self, other: &RobotVersion) -> bool {
        self >= other
    }
}

impl Default for RobotVersion {
    fn default() -> RobotVersion {
        RobotVersion::new(3, 1)
    }
}

impl PartialOrd for RobotVersion {
    fn partial_cmp(&self, other: &RobotVersion) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RobotVersion {
    fn cmp(&self, other: &RobotVersion) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(
                self.minor
                    .cmp(&other.minor),
            )
            .then(
                self.patch
                    .cmp(&other.patch),
            )
    }
}

impl fmt::Display for RobotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn versions_are_parsed() {
        assert_eq!(RobotVersion::parse("1.2"), Some(RobotVersion::new(1, 2)));
        assert_ne!(
            RobotVersion::parse("1.2"),
            Some(RobotVersion::with_patch(1, 2, 0))
        );
        assert_eq!(
            RobotVersion::parse("Robot Framework 2.9.1 (Python 2.7.9 on win32)"),
            Some(RobotVersion::with_patch(2, 9, 1))
        );
        assert_eq!(RobotVersion::parse("1"), None);
        assert_eq!(RobotVersion::parse("version"), None);
    }

    #[test]
    fn ordering() {
        let v = |s| RobotVersion::parse(s).unwrap();

        assert!(v("1.2") < v("2.0"));
        assert!(v("1.2") < v("1.3"));
        assert!(v("1.2") < v("1.2.0"));
        assert!(v("1.2") < v("1.2.3"));
        assert!(v("1.2") > v("1.1.9"));
        assert!(v("1.2") > v("0.1"));
        assert!(v("3.0.1").is_older_than(&v("3.1")));
        assert!(v("3.1").is_newer_or_equal(&v("3.1")));
    }

    #[test]
    fn display() {
        assert_eq!(RobotVersion::new(3, 0).to_string(), "3.0");
        assert_eq!(RobotVersion::with_patch(3, 1, 2).to_string(), "3.1.2");
    }
}
