//! Solution file serialization.

use sln_host::CompilationUnit;

use crate::Result;
use crate::classify::extension_of;
use crate::config::{GeneratorConfig, project_file_name};
use crate::ident::{project_id, solution_type_id};
use crate::template::Template;

pub const FORMAT_VERSION: &str = "11.00";
pub const VISUAL_STUDIO_VERSION: &str = "2010";

/// Properties block written when no previous solution carries one.
pub const DEFAULT_SOLUTION_PROPERTIES: &str = concat!(
    "\tGlobalSection(MonoDevelopProperties) = preSolution\r\n",
    "\t\tStartupItem = Assembly-CSharp.csproj\r\n",
    "\tEndGlobalSection",
);

const SOLUTION: Template = Template::new(
    "solution",
    concat!(
        "\r\n",
        "Microsoft Visual Studio Solution File, Format Version {0}\r\n",
        "# Visual Studio {1}\r\n",
        "{2}\r\n",
        "Global\r\n",
        "\tGlobalSection(SolutionConfigurationPlatforms) = preSolution\r\n",
        "\t\tDebug|Any CPU = Debug|Any CPU\r\n",
        "\t\tRelease|Any CPU = Release|Any CPU\r\n",
        "\tEndGlobalSection\r\n",
        "\tGlobalSection(ProjectConfigurationPlatforms) = postSolution\r\n",
        "{3}\r\n",
        "\tEndGlobalSection\r\n",
        "\tGlobalSection(SolutionProperties) = preSolution\r\n",
        "\t\tHideSolutionNode = FALSE\r\n",
        "\tEndGlobalSection\r\n",
        "{4}\r\n",
        "EndGlobal\r\n",
    ),
);

const PROJECT_ENTRY: Template = Template::new(
    "solution project entry",
    "Project(\"{{{0}}}\") = \"{1}\", \"{2}\", \"{{{3}}}\"\r\nEndProject",
);

const PROJECT_CONFIGURATIONS: Template = Template::new(
    "solution project configurations",
    concat!(
        "\t\t{{{0}}}.Debug|Any CPU.ActiveCfg = Debug|Any CPU\r\n",
        "\t\t{{{0}}}.Debug|Any CPU.Build.0 = Debug|Any CPU\r\n",
        "\t\t{{{0}}}.Release|Any CPU.ActiveCfg = Release|Any CPU\r\n",
        "\t\t{{{0}}}.Release|Any CPU.Build.0 = Release|Any CPU",
    ),
);

/// Renders the solution file for the units of one sync.
pub struct SolutionSerializer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> SolutionSerializer<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Render the solution, keeping the properties sections of the solution
    /// currently on disk.
    pub fn render(&self, units: &[&CompilationUnit]) -> Result<String> {
        let properties = sln_blocks::read_solution_properties(&self.config.solution_path());
        self.render_with_properties(units, properties.as_deref())
    }

    /// Render the solution with explicit preserved `properties`.
    ///
    /// `None` falls back to [`DEFAULT_SOLUTION_PROPERTIES`].
    pub fn render_with_properties(
        &self,
        units: &[&CompilationUnit],
        properties: Option<&str>,
    ) -> Result<String> {
        let entries = units
            .iter()
            .map(|unit| self.project_entry(unit))
            .collect::<Result<Vec<_>>>()?
            .join("\r\n");

        let configurations = units
            .iter()
            .map(|unit| {
                PROJECT_CONFIGURATIONS.render(&[&project_id(&self.config.project_name, &unit.output_path)])
            })
            .collect::<Result<Vec<_>>>()?
            .join("\r\n");

        SOLUTION.render(&[
            &FORMAT_VERSION,
            &VISUAL_STUDIO_VERSION,
            &entries,
            &configurations,
            &properties.unwrap_or(DEFAULT_SOLUTION_PROPERTIES),
        ])
    }

    fn project_entry(&self, unit: &CompilationUnit) -> Result<String> {
        let extension = unit
            .source_files
            .first()
            .map(|file| extension_of(file))
            .unwrap_or_default();

        PROJECT_ENTRY.render(&[
            &solution_type_id(&self.config.project_name, &extension),
            &unit.base_name(),
            &project_file_name(unit),
            &project_id(&self.config.project_name, &unit.output_path),
        ])
    }
}
