use crate::{Error, Feature, Result};
use std::fmt;

/// A las version.
///
/// Defaults to 1.2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// The major version, always 1 for recognized versions.
    pub major: u8,
    /// The minor version, between 0 and 4.
    pub minor: u8,
}

impl Version {
    /// Creates a new version.
    ///
    /// Does not check that the version is an actual las version.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Version;
    /// let version = Version::new(1, 4);
    /// ```
    pub fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }

    /// Returns true if this is a recognized las version.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Version;
    /// assert!(Version::new(1, 4).is_supported());
    /// assert!(!Version::new(1, 5).is_supported());
    /// assert!(!Version::new(2, 0).is_supported());
    /// ```
    pub fn is_supported(&self) -> bool {
        self.major == 1 && self.minor <= 4
    }

    /// Returns the size of the fixed header block for this version.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Version;
    /// assert_eq!(227, Version::new(1, 2).header_size());
    /// assert_eq!(235, Version::new(1, 3).header_size());
    /// assert_eq!(375, Version::new(1, 4).header_size());
    /// ```
    pub fn header_size(&self) -> u16 {
        if self.minor <= 2 {
            227
        } else if self.minor == 3 {
            235
        } else {
            375
        }
    }

    /// Checks whether this version supports the feature.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{feature::Waveforms, Version};
    /// assert!(Version::new(1, 4).supports::<Waveforms>());
    /// assert!(!Version::new(1, 2).supports::<Waveforms>());
    /// ```
    pub fn supports<F: Feature>(&self) -> bool {
        F::is_supported_by(*self)
    }

    /// Checks whether this version can write the given point format id.
    ///
    /// Formats 0 to 3 can be written by any version, 4 and 5 require las
    /// 1.3, and the extended formats require las 1.4.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Version;
    /// assert!(Version::new(1, 2).supports_point_format(3));
    /// assert!(!Version::new(1, 2).supports_point_format(6));
    /// assert!(Version::new(1, 4).supports_point_format(6));
    /// ```
    pub fn supports_point_format(&self, format_id: u8) -> bool {
        if self.major != 1 {
            return false;
        }
        match format_id {
            0..=3 => true,
            4..=5 => self.minor >= 3,
            6..=10 => self.minor >= 4,
            _ => false,
        }
    }

    /// Checks that this version can write the point format, returning an
    /// error if it cannot.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Version;
    /// assert!(Version::new(1, 2).verify_support_for_point_format(6).is_err());
    /// ```
    pub fn verify_support_for_point_format(&self, format_id: u8) -> Result<()> {
        if self.supports_point_format(format_id) {
            Ok(())
        } else {
            Err(Error::IncompatibleVersionAndFormat {
                version: *self,
                format_id,
            })
        }
    }
}

impl Default for Version {
    fn default() -> Version {
        Version { major: 1, minor: 2 }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl From<(u8, u8)> for Version {
    fn from((major, minor): (u8, u8)) -> Version {
        Version { major, minor }
    }
}

impl From<Version> for (u8, u8) {
    fn from(version: Version) -> (u8, u8) {
        (version.major, version.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_versions() {
        for minor in 0..=4 {
            assert!(Version::new(1, minor).is_supported());
        }
        assert!(!Version::new(1, 5).is_supported());
        assert!(!Version::new(0, 2).is_supported());
        assert!(!Version::new(2, 0).is_supported());
    }

    macro_rules! point_formats {
        ($name:ident, $minor:expr, $max_format:expr) => {
            mod $name {
                use super::*;

                #[test]
                fn point_formats() {
                    let version = Version::new(1, $minor);
                    for format_id in 0..=10 {
                        assert_eq!(
                            i16::from(format_id) <= $max_format,
                            version.supports_point_format(format_id),
                            "format {} for version {}",
                            format_id,
                            version,
                        );
                    }
                }
            }
        };
    }

    point_formats!(las_1_0, 0, 3);
    point_formats!(las_1_1, 1, 3);
    point_formats!(las_1_2, 2, 3);
    point_formats!(las_1_3, 3, 5);
    point_formats!(las_1_4, 4, 10);

    #[test]
    fn display() {
        assert_eq!("1.4", Version::new(1, 4).to_string());
    }
}
