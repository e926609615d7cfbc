//! Artifact lifecycle across repeated syncs
//!
//! Covers what happens to files already on disk: preserved IDE blocks,
//! malformed leftovers, stale projects, dry runs and the editor settings.

use pretty_assertions::assert_eq;
use sln_core::{GeneratorConfig, ProjectGenerator, SyncOptions, SyncOutcome};
use sln_host::{CompilationUnit, Snapshot, SnapshotHost, UnitEntry};
use sln_test_utils::TestProject;

fn snapshot(defines: &[&str]) -> Snapshot {
    Snapshot {
        root_namespace: "Game".to_string(),
        engine_library: "/opt/Editor/Managed/UnityEngine.dll".to_string(),
        editor_library: "/opt/Editor/Managed/UnityEditor.dll".to_string(),
        units: vec![
            UnitEntry {
                unit: CompilationUnit::new("Library/ScriptAssemblies/Assembly-CSharp.dll")
                    .with_sources(["Assets/Player.cs"])
                    .with_defines(defines.iter().copied()),
                roots: vec!["Assets".to_string()],
            },
            UnitEntry {
                unit: CompilationUnit::new("Library/ScriptAssemblies/Assembly-CSharp-Editor.dll")
                    .with_sources(["Assets/Editor/Tool.cs"])
                    .with_references(["Library/ScriptAssemblies/Assembly-CSharp.dll"]),
                roots: vec!["Assets/Editor".to_string()],
            },
        ],
        ..Snapshot::default()
    }
}

fn generator(project: &TestProject, snapshot: Snapshot) -> ProjectGenerator<SnapshotHost> {
    ProjectGenerator::new(SnapshotHost::new(snapshot), GeneratorConfig::new(project.root()))
}

const EXTENSIONS: &str = "<ProjectExtensions>\r\n    <VisualStudio AllowExistingFolder=\"true\" />\r\n  </ProjectExtensions>";

#[test]
fn ide_blocks_survive_regeneration() {
    let project = TestProject::new("Game");
    generator(&project, snapshot(&[])).sync().unwrap();

    let original = project.read("Assembly-CSharp.csproj");
    project.write(
        "Assembly-CSharp.csproj",
        &original.replace("</Project>", &format!("{EXTENSIONS}\r\n</Project>")),
    );
    let solution = project.read("Game.sln").replace(
        "\t\tStartupItem = Assembly-CSharp.csproj\r\n",
        "\t\tStartupItem = Assembly-CSharp-Editor.csproj\r\n",
    );
    project.write("Game.sln", &solution);

    let report = generator(&project, snapshot(&["FEATURE_X"])).sync().unwrap();

    let regenerated = project.read("Assembly-CSharp.csproj");
    assert!(regenerated.contains("FEATURE_X"));
    assert!(regenerated.ends_with(&format!("  {EXTENSIONS}\r\n\r\n</Project>\r\n")));
    assert!(project
        .read("Game.sln")
        .contains("\t\tStartupItem = Assembly-CSharp-Editor.csproj\r\n"));
    // Only the project whose defines changed is rewritten
    assert_eq!(
        report.written,
        vec![project.root().join("Assembly-CSharp.csproj")]
    );
}

#[test]
fn malformed_project_is_replaced_without_its_blocks() {
    let project = TestProject::new("Game");
    project.write(
        "Assembly-CSharp.csproj",
        "<Project>\r\n  <ProjectExtensions>\r\n    <Broken>\r\n",
    );

    generator(&project, snapshot(&[])).sync().unwrap();

    let text = project.read("Assembly-CSharp.csproj");
    assert!(text.starts_with("<?xml"));
    assert!(!text.contains("<Broken>"));
    assert!(text.ends_with("  \r\n</Project>\r\n"));
}

#[test]
fn stale_projects_are_left_in_place() {
    let project = TestProject::new("Game");
    project.write("Removed.Unit.csproj", "<Project />\r\n");

    generator(&project, snapshot(&[])).sync().unwrap();

    assert_eq!(project.read("Removed.Unit.csproj"), "<Project />\r\n");
    assert!(!project.read("Game.sln").contains("Removed.Unit"));
}

#[test]
fn dry_run_reports_without_touching_disk() {
    let project = TestProject::new("Game");
    let report = generator(&project, snapshot(&[]))
        .with_options(SyncOptions { dry_run: true })
        .sync()
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.written.len(), 3);
    assert_eq!(
        report.created,
        vec![project.root().join(".vscode/settings.json")]
    );
    project.assert_file_missing("Game.sln");
    project.assert_file_missing("Assembly-CSharp.csproj");
    project.assert_file_missing(".vscode");
}

#[test]
fn editor_settings_are_created_once() {
    let project = TestProject::new("Game");
    let first = generator(&project, snapshot(&[])).sync().unwrap();
    assert_eq!(first.created.len(), 1);

    let settings: serde_json::Value =
        serde_json::from_str(&project.read(".vscode/settings.json")).unwrap();
    assert_eq!(settings["files.exclude"]["Library/"], serde_json::Value::Bool(true));

    project.write(".vscode/settings.json", "{ \"editor.tabSize\": 2 }");
    let second = generator(&project, snapshot(&[])).sync().unwrap();

    assert!(second.created.is_empty());
    assert_eq!(
        project.read(".vscode/settings.json"),
        "{ \"editor.tabSize\": 2 }"
    );
}

#[test]
fn change_batches_after_first_sync() {
    let project = TestProject::new("Game");
    let none: [&str; 0] = [];

    let before = generator(&project, snapshot(&[]))
        .sync_if_needed(["Assets/Player.cs"], none)
        .unwrap();
    assert!(before.is_skipped());
    project.assert_file_missing("Game.sln");

    generator(&project, snapshot(&[])).sync().unwrap();

    let outcome = generator(&project, snapshot(&["LATE"]))
        .sync_if_needed(["Assets/Player.cs"], none)
        .unwrap();
    match outcome {
        SyncOutcome::Synced(report) => {
            assert_eq!(
                report.written,
                vec![project.root().join("Assembly-CSharp.csproj")]
            );
        }
        other => panic!("expected a sync, got {other:?}"),
    }
    assert!(project.read("Assembly-CSharp.csproj").contains("LATE"));
}
