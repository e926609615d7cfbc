//! Project file serialization.
//!
//! One project file per unit, built in a fixed order: header, compiled
//! sources, aggregated assets, file references, project references and a
//! footer that carries the preserved `<ProjectExtensions>` blocks forward.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use sln_fs::NormalizedPath;
use sln_host::{ApiCompatibilityLevel, CompilationUnit, Host, ResponseFileData};

use crate::Result;
use crate::assets::AssetFragments;
use crate::classify::{Classifier, extension_of};
use crate::config::{GeneratorConfig, PROJECT_FILE_EXTENSION};
use crate::escape::{escape_markup, escaped_reference_path, relative_escaped_path};
use crate::ident::project_id;
use crate::template::Template;

pub const TOOLS_VERSION: &str = "4.0";
pub const PRODUCT_VERSION: &str = "10.0.20506";
pub const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";
pub const BASE_DIRECTORY: &str = ".";

/// Defines every project starts with.
pub const FIXED_DEFINES: &[&str] = &["DEBUG", "TRACE"];

/// Outputs of other units as the engine's build pipeline names them.
static SCRIPT_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Library.ScriptAssemblies.(?P<dllname>(?P<project>.*)\.dll)$")
        .expect("Invalid script reference regex")
});

const PROJECT_HEADER: Template = Template::new(
    "project header",
    concat!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n",
        "<Project ToolsVersion=\"{0}\" DefaultTargets=\"Build\" xmlns=\"{6}\">\r\n",
        "  <PropertyGroup>\r\n",
        "    <LangVersion>{10}</LangVersion>\r\n",
        "  </PropertyGroup>\r\n",
        "  <PropertyGroup>\r\n",
        "    <Configuration Condition=\" '$(Configuration)' == '' \">Debug</Configuration>\r\n",
        "    <Platform Condition=\" '$(Platform)' == '' \">AnyCPU</Platform>\r\n",
        "    <ProductVersion>{1}</ProductVersion>\r\n",
        "    <SchemaVersion>2.0</SchemaVersion>\r\n",
        "    <RootNamespace>{8}</RootNamespace>\r\n",
        "    <ProjectGuid>{{{2}}}</ProjectGuid>\r\n",
        "    <OutputType>Library</OutputType>\r\n",
        "    <AppDesignerFolder>Properties</AppDesignerFolder>\r\n",
        "    <AssemblyName>{7}</AssemblyName>\r\n",
        "    <TargetFrameworkVersion>{9}</TargetFrameworkVersion>\r\n",
        "    <FileAlignment>512</FileAlignment>\r\n",
        "    <BaseDirectory>{11}</BaseDirectory>\r\n",
        "  </PropertyGroup>\r\n",
        "  <PropertyGroup Condition=\" '$(Configuration)|$(Platform)' == 'Debug|AnyCPU' \">\r\n",
        "    <DebugSymbols>true</DebugSymbols>\r\n",
        "    <DebugType>full</DebugType>\r\n",
        "    <Optimize>false</Optimize>\r\n",
        "    <OutputPath>Temp\\bin\\Debug\\</OutputPath>\r\n",
        "    <DefineConstants>{5}</DefineConstants>\r\n",
        "    <ErrorReport>prompt</ErrorReport>\r\n",
        "    <WarningLevel>4</WarningLevel>\r\n",
        "    <NoWarn>0169</NoWarn>\r\n",
        "    <AllowUnsafeBlocks>{12}</AllowUnsafeBlocks>\r\n",
        "  </PropertyGroup>\r\n",
        "  <PropertyGroup Condition=\" '$(Configuration)|$(Platform)' == 'Release|AnyCPU' \">\r\n",
        "    <DebugType>pdbonly</DebugType>\r\n",
        "    <Optimize>true</Optimize>\r\n",
        "    <OutputPath>Temp\\bin\\Release\\</OutputPath>\r\n",
        "    <ErrorReport>prompt</ErrorReport>\r\n",
        "    <WarningLevel>4</WarningLevel>\r\n",
        "    <NoWarn>0169</NoWarn>\r\n",
        "    <AllowUnsafeBlocks>{12}</AllowUnsafeBlocks>\r\n",
        "  </PropertyGroup>\r\n",
        "  <PropertyGroup>\r\n",
        "    <NoConfig>true</NoConfig>\r\n",
        "    <NoStdLib>true</NoStdLib>\r\n",
        "    <AddAdditionalExplicitAssemblyReferences>false</AddAdditionalExplicitAssemblyReferences>\r\n",
        "    <ImplicitlyExpandNETStandardFacades>false</ImplicitlyExpandNETStandardFacades>\r\n",
        "    <ImplicitlyExpandDesignTimeFacades>false</ImplicitlyExpandDesignTimeFacades>\r\n",
        "  </PropertyGroup>\r\n",
        "  <ItemGroup>\r\n",
        "    <Reference Include=\"{13}\">\r\n",
        "      <HintPath>{3}</HintPath>\r\n",
        "    </Reference>\r\n",
        "    <Reference Include=\"{14}\">\r\n",
        "      <HintPath>{4}</HintPath>\r\n",
        "    </Reference>\r\n",
        "  </ItemGroup>\r\n",
        "  <ItemGroup>\r\n",
    ),
);

const PROJECT_FOOTER: Template = Template::new(
    "project footer",
    concat!(
        "  </ItemGroup>\r\n",
        "  <Import Project=\"$(MSBuildToolsPath)\\Microsoft.CSharp.targets\" />\r\n",
        "  <!-- To modify your build process, add your task inside one of the targets below and uncomment it. \r\n",
        "       Other similar extension points exist, see Microsoft.Common.targets.\r\n",
        "  <Target Name=\"BeforeBuild\">\r\n",
        "  </Target>\r\n",
        "  <Target Name=\"AfterBuild\">\r\n",
        "  </Target>\r\n",
        "  -->\r\n",
        "  {0}\r\n",
        "</Project>\r\n",
    ),
);

/// Target framework and language version for a compatibility level.
pub fn framework_for(level: ApiCompatibilityLevel) -> (&'static str, &'static str) {
    if level.is_modern() {
        ("v4.7.2", "latest")
    } else {
        ("v3.5", "4")
    }
}

/// Concatenate define groups in order, keeping the first occurrence of each.
pub fn merge_defines<'a, I>(groups: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    groups
        .into_iter()
        .filter(|define| !define.is_empty() && seen.insert(*define))
        .collect()
}

/// How a unit's references split between files and generated projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferencePlan {
    /// External binaries, as full paths
    pub files: Vec<NormalizedPath>,
    /// Base names of other generated projects
    pub projects: Vec<String>,
}

/// Renders project files for the units of one sync.
pub struct ProjectSerializer<'a, H: Host + ?Sized> {
    config: &'a GeneratorConfig,
    classifier: &'a Classifier<'a, H>,
    fragments: &'a AssetFragments,
    /// Units that receive project files in this sync
    project_units: &'a [&'a CompilationUnit],
}

impl<'a, H: Host + ?Sized> ProjectSerializer<'a, H> {
    pub fn new(
        config: &'a GeneratorConfig,
        classifier: &'a Classifier<'a, H>,
        fragments: &'a AssetFragments,
        project_units: &'a [&'a CompilationUnit],
    ) -> Self {
        Self {
            config,
            classifier,
            fragments,
            project_units,
        }
    }

    /// Render the project for `unit`, keeping the extension blocks of the
    /// project file currently on disk.
    pub fn render(&self, unit: &CompilationUnit, response_files: &[ResponseFileData]) -> Result<String> {
        let extensions = sln_blocks::read_project_extensions(&self.config.project_path(unit));
        self.render_with_extensions(unit, response_files, &extensions)
    }

    /// Render the project for `unit` with explicit preserved `extensions`.
    pub fn render_with_extensions(
        &self,
        unit: &CompilationUnit,
        response_files: &[ResponseFileData],
        extensions: &str,
    ) -> Result<String> {
        let mut text = self.header(unit, response_files)?;

        let mut dll_sources = Vec::new();
        for file in &unit.source_files {
            if !self.classifier.is_eligible_source_file(file) {
                continue;
            }
            if extension_of(file) == "dll" {
                dll_sources.push(file.as_str());
                continue;
            }
            text.push_str(&format!(
                "     <Compile Include=\"{}\" />\r\n",
                relative_escaped_path(file, &self.config.root)
            ));
        }

        if let Some(fragment) = self.fragments.get(&unit.base_name()) {
            text.push_str(fragment);
        }

        let plan = self.plan_references(unit, &dll_sources);
        for reference in &plan.files {
            append_reference(&mut text, reference);
        }
        for reference in response_files.iter().flat_map(|data| &data.full_path_references) {
            append_reference(&mut text, &NormalizedPath::new(reference));
        }

        if !plan.projects.is_empty() {
            text.push_str("  </ItemGroup>\r\n  <ItemGroup>\r\n");
            for project in &plan.projects {
                let id = project_id(&self.config.project_name, &format!("Temp/{}.dll", project));
                let project = escape_markup(project);
                text.push_str(&format!(
                    "    <ProjectReference Include=\"{}.{}\">\r\n",
                    project, PROJECT_FILE_EXTENSION
                ));
                text.push_str(&format!("      <Project>{{{}}}</Project>\r\n", id));
                text.push_str(&format!("      <Name>{}</Name>\r\n", project));
                text.push_str("    </ProjectReference>\r\n");
            }
        }

        text.push_str(&PROJECT_FOOTER.render(&[&extensions])?);
        Ok(text)
    }

    /// Header up to and including the opening of the source item group.
    pub fn header(&self, unit: &CompilationUnit, response_files: &[ResponseFileData]) -> Result<String> {
        let host = self.classifier.host();
        let (framework, language_version) = framework_for(unit.api_compatibility_level);
        let engine_library = host.engine_library_path();
        let editor_library = host.editor_library_path();

        let active_defines = host.active_defines();
        let defines = merge_defines(
            FIXED_DEFINES
                .iter()
                .copied()
                .chain(active_defines.iter().map(String::as_str))
                .chain(unit.defines.iter().map(String::as_str))
                .chain(
                    response_files
                        .iter()
                        .flat_map(|data| data.defines.iter().map(String::as_str)),
                ),
        )
        .join(";");

        let allow_unsafe = unit.allow_unsafe || response_files.iter().any(|data| data.unsafe_code);
        let allow_unsafe = if allow_unsafe { "True" } else { "False" };

        PROJECT_HEADER.render(&[
            &TOOLS_VERSION,
            &PRODUCT_VERSION,
            &project_id(&self.config.project_name, &unit.output_path),
            &escaped_reference_path(&engine_library),
            &escaped_reference_path(&editor_library),
            &escape_markup(&defines),
            &MSBUILD_NAMESPACE,
            &escape_markup(&unit.base_name()),
            &escape_markup(&host.root_namespace()),
            &framework,
            &language_version,
            &BASE_DIRECTORY,
            &allow_unsafe,
            &escape_markup(engine_library.file_stem().unwrap_or_default()),
            &escape_markup(editor_library.file_stem().unwrap_or_default()),
        ])
    }

    /// Partition `dll_sources` and the unit's declared references.
    ///
    /// Engine libraries are dropped (the header references them already), as
    /// are references the host supplies implicitly. Outputs of units in this
    /// sync become project references.
    pub fn plan_references(&self, unit: &CompilationUnit, dll_sources: &[&str]) -> ReferencePlan {
        let host = self.classifier.host();
        let engine_libraries: Vec<String> = [host.engine_library_path(), host.editor_library_path()]
            .iter()
            .filter_map(|path| path.file_name().map(str::to_string))
            .collect();

        let mut candidates: Vec<&str> = Vec::new();
        for reference in dll_sources
            .iter()
            .copied()
            .chain(unit.references.iter().map(String::as_str))
        {
            if !candidates.contains(&reference) {
                candidates.push(reference);
            }
        }

        let mut plan = ReferencePlan::default();
        for reference in candidates {
            let path = NormalizedPath::new(reference);
            let file_name = path.file_name().unwrap_or_default();
            if engine_libraries.iter().any(|name| name == file_name) {
                continue;
            }

            let relative = path.strip_root(&self.config.root).unwrap_or(path.as_str());
            if let Some(captures) = SCRIPT_REFERENCE_REGEX.captures(relative) {
                let dll_name = &captures["dllname"];
                if self
                    .project_units
                    .iter()
                    .any(|other| other.output_file_name() == dll_name)
                {
                    plan.projects.push(captures["project"].to_string());
                    continue;
                }
            }

            let full = self.config.root.join(path.as_str());
            if host.is_internal_reference(&full, unit.is_editor()) {
                tracing::debug!(unit = %unit.output_file_name(), reference = %full, "internal reference skipped");
                continue;
            }
            plan.files.push(full);
        }

        plan
    }
}

fn append_reference(text: &mut String, reference: &NormalizedPath) {
    text.push_str(&format!(
        " <Reference Include=\"{}\">\r\n",
        escape_markup(reference.file_stem().unwrap_or_default())
    ));
    text.push_str(&format!(
        " <HintPath>{}</HintPath>\r\n",
        escaped_reference_path(reference)
    ));
    text.push_str(" </Reference>\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sln_test_utils::FakeHost;

    fn config() -> GeneratorConfig {
        GeneratorConfig::new("/work/Game")
    }

    fn game_unit() -> CompilationUnit {
        CompilationUnit::new("Library/ScriptAssemblies/Assembly-CSharp.dll")
            .with_sources(["/work/Game/Assets/Player.cs", "Assets/Enemy.cs"])
    }

    fn render(host: &FakeHost, unit: &CompilationUnit, units: &[&CompilationUnit], response: &[ResponseFileData]) -> String {
        let config = config();
        let classifier = Classifier::new(host);
        let fragments = AssetFragments::default();
        let serializer = ProjectSerializer::new(&config, &classifier, &fragments, units);
        serializer
            .render_with_extensions(unit, response, "")
            .unwrap()
    }

    #[test]
    fn test_header_arity_matches_arguments() {
        assert_eq!(PROJECT_HEADER.arity().unwrap(), 15);
        assert_eq!(PROJECT_FOOTER.arity().unwrap(), 1);
    }

    #[test]
    fn test_defines_deduplicated_in_first_seen_order() {
        let host = FakeHost::new().with_active_define("A");
        let unit = game_unit().with_defines(["A", "B"]);
        let response = ResponseFileData {
            defines: vec!["B".to_string(), "C".to_string()],
            ..ResponseFileData::default()
        };

        let text = render(&host, &unit, &[&unit], &[response]);
        assert!(text.contains("<DefineConstants>DEBUG;TRACE;A;B;C</DefineConstants>"));
    }

    #[test]
    fn test_merge_defines_skips_empty() {
        assert_eq!(merge_defines(["DEBUG", "", "X", "DEBUG"]), vec!["DEBUG", "X"]);
    }

    #[test]
    fn test_framework_follows_compatibility_level() {
        assert_eq!(framework_for(ApiCompatibilityLevel::Net46), ("v4.7.2", "latest"));
        assert_eq!(framework_for(ApiCompatibilityLevel::NetStandard20), ("v3.5", "4"));

        let host = FakeHost::new();
        let legacy = game_unit().with_compatibility(ApiCompatibilityLevel::Net20);
        let text = render(&host, &legacy, &[&legacy], &[]);
        assert!(text.contains("<TargetFrameworkVersion>v3.5</TargetFrameworkVersion>"));
        assert!(text.contains("<LangVersion>4</LangVersion>"));
    }

    #[test]
    fn test_unsafe_from_unit_or_response_file() {
        let host = FakeHost::new();
        let unit = game_unit();
        let safe = render(&host, &unit, &[&unit], &[]);
        assert!(safe.contains("<AllowUnsafeBlocks>False</AllowUnsafeBlocks>"));

        let response = ResponseFileData {
            unsafe_code: true,
            ..ResponseFileData::default()
        };
        let from_response = render(&host, &unit, &[&unit], &[ResponseFileData::default(), response]);
        assert!(from_response.contains("<AllowUnsafeBlocks>True</AllowUnsafeBlocks>"));

        let unsafe_unit = game_unit().with_unsafe(true);
        let from_unit = render(&host, &unsafe_unit, &[&unsafe_unit], &[]);
        assert!(from_unit.contains("<AllowUnsafeBlocks>True</AllowUnsafeBlocks>"));
    }

    #[test]
    fn test_sources_and_dll_diversion() {
        let host = FakeHost::new();
        let unit = game_unit().with_sources(["Assets/Plugins/Native.dll", "Assets/Logo.png"]);
        let text = render(&host, &unit, &[&unit], &[]);

        assert!(text.contains("     <Compile Include=\"Assets\\Player.cs\" />\r\n"));
        assert!(text.contains("     <Compile Include=\"Assets\\Enemy.cs\" />\r\n"));
        assert!(!text.contains("Logo.png"));
        assert!(!text.contains("<Compile Include=\"Assets\\Plugins\\Native.dll\""));
        assert!(text.contains(
            " <Reference Include=\"Native\">\r\n <HintPath>/work/Game/Assets/Plugins/Native.dll</HintPath>\r\n </Reference>\r\n"
        ));
    }

    #[test]
    fn test_engine_and_internal_references_dropped() {
        let host = FakeHost::new().with_internal_reference("mscorlib.dll");
        let unit = game_unit().with_references([
            "/opt/Editor/Managed/UnityEngine.dll",
            "C:\\Program Files\\Editor\\UnityEditor.dll",
            "/opt/Editor/Mono/mscorlib.dll",
            "/opt/Editor/Mono/System.Xml.dll",
        ]);
        let config = config();
        let classifier = Classifier::new(&host);
        let fragments = AssetFragments::default();
        let units = [&unit];
        let serializer = ProjectSerializer::new(&config, &classifier, &fragments, &units);

        let plan = serializer.plan_references(&unit, &[]);
        assert_eq!(plan.files, vec![NormalizedPath::new("/opt/Editor/Mono/System.Xml.dll")]);
        assert!(plan.projects.is_empty());
    }

    #[test]
    fn test_script_assembly_reference_to_generated_unit_becomes_project_reference() {
        let host = FakeHost::new();
        let runtime = CompilationUnit::new("Library/ScriptAssemblies/Game.Runtime.dll")
            .with_sources(["Assets/Runtime/Core.cs"]);
        let unit = game_unit().with_references([
            "Library/ScriptAssemblies/Game.Runtime.dll",
            "/work/Game/Library/ScriptAssemblies/Vendor.Tools.dll",
        ]);

        // Vendor.Tools is not generated in this sync, so it stays a file reference
        let text = render(&host, &unit, &[&unit, &runtime], &[]);

        let expected_id = project_id("Game", &runtime.output_path);
        assert!(text.contains(&format!(
            "  </ItemGroup>\r\n  <ItemGroup>\r\n    <ProjectReference Include=\"Game.Runtime.csproj\">\r\n      <Project>{{{}}}</Project>\r\n      <Name>Game.Runtime</Name>\r\n    </ProjectReference>\r\n",
            expected_id
        )));
        assert!(text.contains(
            " <HintPath>/work/Game/Library/ScriptAssemblies/Vendor.Tools.dll</HintPath>\r\n"
        ));
        assert!(!text.contains("<ProjectReference Include=\"Vendor.Tools.csproj\">"));
    }

    #[test]
    fn test_response_file_references_always_file_references() {
        let host = FakeHost::new();
        let unit = game_unit();
        let response = ResponseFileData {
            full_path_references: vec!["/work/Game/Library/ScriptAssemblies/Assembly-CSharp.dll".to_string()],
            ..ResponseFileData::default()
        };
        let text = render(&host, &unit, &[&unit], &[response]);
        assert!(text.contains("<Reference Include=\"Assembly-CSharp\">"));
        assert!(!text.contains("<ProjectReference"));
    }

    #[test]
    fn test_asset_fragment_and_preserved_extensions() {
        let host = FakeHost::new()
            .with_asset("Assets/UI/Main.uxml")
            .with_default_unit("Assembly-CSharp.dll");
        let config = config();
        let classifier = Classifier::new(&host);
        let fragments = crate::assets::collect_asset_fragments(&classifier, &config.root);
        let unit = game_unit();
        let units = [&unit];
        let serializer = ProjectSerializer::new(&config, &classifier, &fragments, &units);

        let extensions = "<ProjectExtensions><VisualStudio /></ProjectExtensions>\r\n";
        let text = serializer.render_with_extensions(&unit, &[], extensions).unwrap();

        assert!(text.contains("     <None Include=\"Assets\\UI\\Main.uxml\" />\r\n"));
        assert!(text.ends_with(
            "  -->\r\n  <ProjectExtensions><VisualStudio /></ProjectExtensions>\r\n\r\n</Project>\r\n"
        ));
    }

    #[test]
    fn test_header_identity_and_escaping() {
        let host = FakeHost::new().with_root_namespace("R&D");
        let unit = game_unit();
        let text = render(&host, &unit, &[&unit], &[]);

        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n<Project ToolsVersion=\"4.0\""));
        assert!(text.contains(&format!(
            "    <ProjectGuid>{{{}}}</ProjectGuid>\r\n",
            project_id("Game", "Assembly-CSharp.dll")
        )));
        assert!(text.contains("<RootNamespace>R&amp;D</RootNamespace>"));
        assert!(text.contains("<AssemblyName>Assembly-CSharp</AssemblyName>"));
        assert!(text.contains(
            "    <Reference Include=\"UnityEngine\">\r\n      <HintPath>/opt/Editor/Managed/UnityEngine.dll</HintPath>\r\n"
        ));
        assert!(!text.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_header_with_missing_argument_is_fatal() {
        let arg: &dyn std::fmt::Display = &"x";
        let args = [arg; 14];
        let err = PROJECT_HEADER.render(&args).unwrap_err();

        match err {
            crate::Error::TemplateArguments {
                template,
                expected,
                provided,
            } => {
                assert_eq!(template, "project header");
                assert_eq!(expected, 15);
                assert_eq!(provided, 14);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(PROJECT_HEADER.arity().unwrap(), 15);
    }

    #[test]
    fn test_footer_matches_msbuild_template() {
        let footer = PROJECT_FOOTER.render(&[&""]).unwrap();
        assert!(footer.contains(
            "  <!-- To modify your build process, add your task inside one of the targets below and uncomment it. \r\n       Other similar"
        ));
        assert!(footer.ends_with("  -->\r\n  \r\n</Project>\r\n"));
    }
}
