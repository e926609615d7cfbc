//! End-to-end sync driven by a snapshot manifest on disk
//!
//! Exercises the complete flow: manifest loading -> response-file parsing
//! -> classification -> project and solution generation.

use pretty_assertions::assert_eq;
use sln_core::{GeneratorConfig, ProjectGenerator, SyncReport};
use sln_fs::NormalizedPath;
use sln_host::SnapshotHost;
use sln_test_utils::TestProject;

fn manifest(root: &NormalizedPath) -> String {
    format!(
        r#"
root_namespace = "Game"
engine_library = "/opt/Editor/Managed/UnityEngine.dll"
editor_library = "/opt/Editor/Managed/UnityEditor.dll"
active_defines = ["UNITY_EDITOR"]
user_extensions = ["txt"]
assets = [
    "Assets/UI/Hud.uxml",
    "Assets/Docs/Readme.txt",
    "Assets/Art/Logo.png",
    "Packages/com.vendor.ui/Skin.uss",
]
internal_references = ["mscorlib.dll"]
editor_only_references = ["UnityEditor.TestRunner.dll"]
default_unit = "Assembly-CSharp.dll"

[packages]
"Packages/com.vendor.ui" = "registry"
"Packages/com.team.core" = "embedded"

[system_reference_dirs]
net46 = ['{root}/Refs']

[[units]]
output_path = "Library/ScriptAssemblies/Assembly-CSharp.dll"
source_files = ["Assets/Player.cs", "Assets/Plugins/Audio.dll"]
references = [
    "Library/ScriptAssemblies/Team.Core.dll",
    "/opt/Editor/Managed/UnityEngine.dll",
    "/opt/Mono/mscorlib.dll",
    "/opt/Extensions/UnityEditor.TestRunner.dll",
]
response_files = ["Assets/csc.rsp"]
roots = ["Assets"]

[[units]]
output_path = "Library/ScriptAssemblies/Assembly-CSharp-Editor.dll"
source_files = ["Assets/Editor/Tool.cs"]
references = [
    "Library/ScriptAssemblies/Assembly-CSharp.dll",
    "/opt/Extensions/UnityEditor.TestRunner.dll",
]
roots = ["Assets/Editor"]

[[units]]
output_path = "Library/ScriptAssemblies/Team.Core.dll"
source_files = ["Packages/com.team.core/Core.cs"]
api_compatibility_level = "net_standard20"
roots = ["Packages/com.team.core"]

[[units]]
output_path = "Library/ScriptAssemblies/Vendor.UI.dll"
source_files = ["Packages/com.vendor.ui/Skin.cs"]
roots = ["Packages/com.vendor.ui"]
"#,
        root = root
    )
}

/// Lay out a project with its manifest, a response file and referenced binaries.
fn setup() -> TestProject {
    let project = TestProject::new("Game");
    project.write("slnsync.toml", &manifest(&project.root()));
    project.write(
        "Assets/csc.rsp",
        "# extra switches\n-define:FROM_RSP\n-r:Plugins/Native.dll -r:System.Drawing.dll\n-unsafe\n-nowarn:0169\n",
    );
    project.write("Plugins/Native.dll", "");
    project.write("Refs/System.Drawing.dll", "");
    project
}

fn sync(project: &TestProject) -> SyncReport {
    let host = SnapshotHost::load(&project.root().join("slnsync.toml")).unwrap();
    let config = GeneratorConfig::from_section(project.root(), &host.snapshot().generator).unwrap();
    ProjectGenerator::new(host, config).sync().unwrap()
}

#[test]
fn generates_one_project_per_eligible_unit() {
    let project = setup();
    let report = sync(&project);

    project.assert_file_exists("Game.sln");
    project.assert_file_exists("Assembly-CSharp.csproj");
    project.assert_file_exists("Assembly-CSharp-Editor.csproj");
    project.assert_file_exists("Team.Core.csproj");
    project.assert_file_missing("Vendor.UI.csproj");
    assert_eq!(report.written.len(), 4);

    let solution = project.read("Game.sln");
    assert_eq!(solution.matches("\r\nEndProject").count(), 3);
    assert!(!solution.contains("Vendor.UI"));
}

#[test]
fn response_file_contributes_defines_references_and_unsafe() {
    let project = setup();
    let report = sync(&project);
    let root = project.root();

    let text = project.read("Assembly-CSharp.csproj");
    assert!(text.contains("<DefineConstants>DEBUG;TRACE;UNITY_EDITOR;FROM_RSP</DefineConstants>"));
    assert!(text.contains("<AllowUnsafeBlocks>True</AllowUnsafeBlocks>"));
    assert!(text.contains(&format!(
        " <HintPath>{}</HintPath>\r\n",
        root.join("Plugins/Native.dll")
    )));
    assert!(text.contains(&format!(
        " <HintPath>{}</HintPath>\r\n",
        root.join("Refs/System.Drawing.dll")
    )));

    assert_eq!(
        report.warnings,
        vec!["Assets/csc.rsp Parse Error : Unknown option '-nowarn:0169'".to_string()]
    );
}

#[test]
fn references_are_partitioned_by_build_flavour() {
    let project = setup();
    sync(&project);

    let player = project.read("Assembly-CSharp.csproj");
    assert!(player.contains("<ProjectReference Include=\"Team.Core.csproj\">"));
    assert!(!player.contains("mscorlib"));
    assert!(!player.contains("UnityEditor.TestRunner"));
    assert_eq!(player.matches("UnityEngine.dll</HintPath>").count(), 1);
    // The dll listed among the sources is a reference, not a compile item
    assert!(player.contains("<Reference Include=\"Audio\">"));
    assert!(!player.contains("<Compile Include=\"Assets\\Plugins\\Audio.dll\""));

    let editor = project.read("Assembly-CSharp-Editor.csproj");
    assert!(editor.contains("<ProjectReference Include=\"Assembly-CSharp.csproj\">"));
    assert!(editor.contains("<HintPath>/opt/Extensions/UnityEditor.TestRunner.dll</HintPath>"));
}

#[test]
fn assets_follow_script_roots_and_package_rules() {
    let project = setup();
    sync(&project);

    let player = project.read("Assembly-CSharp.csproj");
    assert!(player.contains("     <None Include=\"Assets\\UI\\Hud.uxml\" />\r\n"));
    assert!(player.contains("     <None Include=\"Assets\\Docs\\Readme.txt\" />\r\n"));
    assert!(!player.contains("Logo.png"));
    assert!(!player.contains("Skin.uss"));
}

#[test]
fn compatibility_level_selects_framework() {
    let project = setup();
    sync(&project);

    let player = project.read("Assembly-CSharp.csproj");
    assert!(player.contains("<TargetFrameworkVersion>v4.7.2</TargetFrameworkVersion>"));
    assert!(player.contains("<LangVersion>latest</LangVersion>"));

    let core = project.read("Team.Core.csproj");
    assert!(core.contains("<TargetFrameworkVersion>v3.5</TargetFrameworkVersion>"));
    assert!(core.contains("<LangVersion>4</LangVersion>"));
}

#[test]
fn json_snapshot_produces_identical_artifacts() {
    let from_toml = setup();
    sync(&from_toml);

    let from_json = setup();
    let host = SnapshotHost::load(&from_json.root().join("slnsync.toml")).unwrap();
    from_json.write(
        "slnsync.json",
        &serde_json::to_string_pretty(host.snapshot()).unwrap(),
    );
    let host = SnapshotHost::load(&from_json.root().join("slnsync.json")).unwrap();
    ProjectGenerator::new(host, GeneratorConfig::new(from_json.root()))
        .sync()
        .unwrap();

    let strip = |project: &TestProject, file: &str| {
        project
            .read(file)
            .replace(project.root().as_str(), "<root>")
    };
    for file in ["Game.sln", "Assembly-CSharp.csproj", "Team.Core.csproj"] {
        assert_eq!(strip(&from_toml, file), strip(&from_json, file), "{file}");
    }
}
