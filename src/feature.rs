//! Programmatically determine whether a las version supports a feature.
//!
//! Features are structures that implement the [Feature] trait, checked
//! through [Version::supports]:
//!
//! ```
//! use las_codec::{feature::LargeFiles, Version};
//!
//! assert!(Version::new(1, 4).supports::<LargeFiles>());
//! assert!(!Version::new(1, 2).supports::<LargeFiles>());
//! ```

use crate::Version;

/// A version-gated capability of the las format.
pub trait Feature {
    /// Is this feature supported by this version?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{feature::{Feature, Waveforms}, Version};
    /// assert!(Waveforms::is_supported_by(Version::new(1, 3)));
    /// ```
    fn is_supported_by(version: Version) -> bool;

    /// Returns the name of this feature.
    fn name() -> &'static str;
}

macro_rules! feature {
    ($(#[$meta:meta])* $name:ident, $minor:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug)]
        pub struct $name;

        impl Feature for $name {
            fn is_supported_by(version: Version) -> bool {
                version.major == 1 && version.minor >= $minor && version.minor <= 4
            }

            fn name() -> &'static str {
                stringify!($name)
            }
        }
    };
}

feature!(
    /// The start-of-waveform-data-packet-record header field.
    Waveforms,
    3
);
feature!(
    /// 64-bit point counts and the fifteen entry by-return histogram.
    LargeFiles,
    4
);
feature!(
    /// Extended variable length records, stored after the point data.
    Evlrs,
    4
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveforms() {
        assert!(!Waveforms::is_supported_by(Version::new(1, 2)));
        assert!(Waveforms::is_supported_by(Version::new(1, 3)));
        assert!(Waveforms::is_supported_by(Version::new(1, 4)));
        assert!(!Waveforms::is_supported_by(Version::new(1, 5)));
    }

    #[test]
    fn large_files() {
        assert!(!LargeFiles::is_supported_by(Version::new(1, 3)));
        assert!(LargeFiles::is_supported_by(Version::new(1, 4)));
    }

    #[test]
    fn evlrs() {
        assert!(!Evlrs::is_supported_by(Version::new(1, 3)));
        assert!(Evlrs::is_supported_by(Version::new(1, 4)));
    }
}
