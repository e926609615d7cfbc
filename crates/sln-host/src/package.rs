//! Package-source classification of asset paths.

use serde::{Deserialize, Serialize};

/// Where the host says an asset path comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageSource {
    /// Not part of any package; lives in the project's own tree
    #[default]
    Unknown,
    BuiltIn,
    Registry,
    /// Package copied into the project
    Embedded,
    /// Package referenced from a local folder
    Local,
    LocalTarball,
    Git,
}

impl PackageSource {
    /// Whether files from this source are part of the project's own sources.
    ///
    /// Plain project files and embedded or local packages qualify; anything
    /// fetched from outside does not.
    pub fn is_internalized(&self) -> bool {
        matches!(self, Self::Unknown | Self::Embedded | Self::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PackageSource::Unknown, true)]
    #[case(PackageSource::Embedded, true)]
    #[case(PackageSource::Local, true)]
    #[case(PackageSource::BuiltIn, false)]
    #[case(PackageSource::Registry, false)]
    #[case(PackageSource::LocalTarball, false)]
    #[case(PackageSource::Git, false)]
    fn test_is_internalized(#[case] source: PackageSource, #[case] expected: bool) {
        assert_eq!(source.is_internalized(), expected);
    }
}
