//! Non-source assets grouped by owning unit.

use std::collections::BTreeMap;

use sln_fs::NormalizedPath;
use sln_host::Host;

use crate::classify::{Classifier, ScriptingLanguage, extension_of, language_for_extension};
use crate::escape::relative_escaped_path;

/// Script extensions tried, in order, to find the unit owning an asset.
const OWNER_SCRIPT_EXTENSIONS: &[&str] = &["cs", "js", "boo"];

/// Pre-rendered `<None Include=... />` entries keyed by unit base name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFragments {
    fragments: BTreeMap<String, String>,
}

impl AssetFragments {
    /// Fragment for the unit whose output base name is `unit_base_name`.
    pub fn get(&self, unit_base_name: &str) -> Option<&str> {
        self.fragments.get(unit_base_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn append(&mut self, unit_base_name: String, entry: &str) {
        self.fragments.entry(unit_base_name).or_default().push_str(entry);
    }
}

/// Scan every host asset once and group eligible non-source files by unit.
pub fn collect_asset_fragments<H: Host + ?Sized>(
    classifier: &Classifier<'_, H>,
    root: &NormalizedPath,
) -> AssetFragments {
    let host = classifier.host();
    let mut fragments = AssetFragments::default();

    for asset in host.asset_paths() {
        if classifier.is_non_internalized_package_path(&asset) {
            continue;
        }

        let extension = extension_of(&asset);
        if !classifier.is_supported_extension(&extension)
            || language_for_extension(&extension) != ScriptingLanguage::None
        {
            continue;
        }

        let Some(owner) = OWNER_SCRIPT_EXTENSIONS
            .iter()
            .find_map(|extension| host.unit_name_for_script_path(&format!("{}.{}", asset, extension)))
        else {
            tracing::debug!(asset = %asset, "no owning unit, skipping asset");
            continue;
        };

        let owner = NormalizedPath::new(&owner);
        let unit_base_name = owner.file_stem().unwrap_or_default().to_string();
        let entry = format!(
            "     <None Include=\"{}\" />\r\n",
            relative_escaped_path(&asset, root)
        );
        fragments.append(unit_base_name, &entry);
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sln_host::PackageSource;
    use sln_test_utils::FakeHost;

    fn root() -> NormalizedPath {
        NormalizedPath::new("/work/game")
    }

    #[test]
    fn test_groups_non_source_assets_by_owner() {
        let host = FakeHost::new()
            .with_asset("Assets/UI/Main.uxml")
            .with_asset("Assets/UI/Main.uss")
            .with_asset("Assets/Editor/Tools.uss")
            .with_asset("Assets/Player.cs")
            .with_asset("Assets/Logo.png")
            .with_script_root("Assets", "Assembly-CSharp.dll")
            .with_script_root("Assets/Editor", "Assembly-CSharp-Editor.dll");
        let classifier = Classifier::new(&host);

        let fragments = collect_asset_fragments(&classifier, &root());

        assert_eq!(fragments.len(), 2);
        assert_eq!(
            fragments.get("Assembly-CSharp"),
            Some(
                "     <None Include=\"Assets\\UI\\Main.uxml\" />\r\n     <None Include=\"Assets\\UI\\Main.uss\" />\r\n"
            )
        );
        assert_eq!(
            fragments.get("Assembly-CSharp-Editor"),
            Some("     <None Include=\"Assets\\Editor\\Tools.uss\" />\r\n")
        );
    }

    #[test]
    fn test_skips_remote_packages_and_unowned_assets() {
        let host = FakeHost::new()
            .with_asset("Packages/com.vendor.ui/Theme.uss")
            .with_asset("Packages/com.team.ui/Theme.uss")
            .with_asset("Orphans/Stray.shader")
            .with_package("Packages/com.vendor.ui", PackageSource::Registry)
            .with_package("Packages/com.team.ui", PackageSource::Embedded)
            .with_script_root("Packages/com.team.ui", "Team.UI.dll");
        let classifier = Classifier::new(&host);

        let fragments = collect_asset_fragments(&classifier, &root());

        assert_eq!(fragments.len(), 1);
        assert_eq!(
            fragments.get("Team.UI"),
            Some("     <None Include=\"Packages\\com.team.ui\\Theme.uss\" />\r\n")
        );
    }

    #[test]
    fn test_user_extensions_are_aggregated() {
        let host = FakeHost::new()
            .with_asset("Assets/Dialog.txt")
            .with_user_extension("txt")
            .with_default_unit("Assembly-CSharp.dll");
        let classifier = Classifier::new(&host);

        let fragments = collect_asset_fragments(&classifier, &root());
        assert_eq!(
            fragments.get("Assembly-CSharp"),
            Some("     <None Include=\"Assets\\Dialog.txt\" />\r\n")
        );
    }
}
