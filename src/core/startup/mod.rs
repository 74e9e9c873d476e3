pub mod arg_file;
pub mod reconcile;

use serde::{Deserialize, Serialize};

use crate::core::version::{Argument, OsType};

pub use arg_file::{ArgFileParser, ArgumentList, MainClassPatterns};
pub use reconcile::{combine_argument_lists, consolidate};

/// Stands in for the platform path separator inside path lists.
pub const CLASSPATH_SEPARATOR: &str = "${classpath_separator}";
/// Stands in for the libraries directory of an installation.
pub const LIBRARY_DIRECTORY: &str = "${library_directory}";

/// Startup command line of one side (client or server).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupArguments {
    pub jvm_args: Vec<Argument>,
    pub program_args: Vec<Argument>,
    pub main_class: String,
}

/// A concrete command line for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommandLine {
    pub jvm_args: Vec<String>,
    pub main_class: String,
    pub program_args: Vec<String>,
}

impl StartupArguments {
    /// Keep the arguments that apply on `os` and substitute the path placeholders.
    pub fn resolve(&self, os: OsType, library_directory: &str) -> ResolvedCommandLine {
        ResolvedCommandLine {
            jvm_args: resolve_arguments(&self.jvm_args, os, library_directory),
            main_class: self.main_class.clone(),
            program_args: resolve_arguments(&self.program_args, os, library_directory),
        }
    }
}

fn resolve_arguments(args: &[Argument], os: OsType, library_directory: &str) -> Vec<String> {
    let separator = os.classpath_separator().to_string();
    args.iter()
        .filter(|arg| arg.applies_to(os))
        .flat_map(Argument::values)
        .map(|value| {
            value
                .replace(CLASSPATH_SEPARATOR, &separator)
                .replace(LIBRARY_DIRECTORY, library_directory)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const UNIX: &str = "-a\n-b\n-cp L1:L2\nMain\nx\n";
    const WINDOWS: &str = "-a\n-cp L1;L2\nMain\ny\n";

    fn reconciled() -> StartupArguments {
        let parser = ArgFileParser::new(MainClassPatterns::new(["Main"]).unwrap());
        consolidate(
            parser.parse(UNIX, ':').unwrap(),
            parser.parse(WINDOWS, ';').unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn reconciles_divergent_arg_files() {
        let args = reconciled();

        assert_eq!(args.main_class, "Main");
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            serde_json::json!({
                "jvmArgs": [
                    "-a",
                    {
                        "value": ["-b"],
                        "rules": [
                            {"action": "allow", "os": {"name": "linux"}},
                            {"action": "allow", "os": {"name": "osx"}}
                        ]
                    },
                    "-cp",
                    "L1${classpath_separator}L2"
                ],
                "programArgs": [
                    {
                        "value": ["x"],
                        "rules": [
                            {"action": "allow", "os": {"name": "linux"}},
                            {"action": "allow", "os": {"name": "osx"}}
                        ]
                    },
                    {
                        "value": ["y"],
                        "rules": [{"action": "allow", "os": {"name": "windows"}}]
                    }
                ],
                "mainClass": "Main"
            })
        );
    }

    #[test]
    fn resolving_reproduces_each_platform() {
        let args = reconciled();

        let linux = args.resolve(OsType::Linux, "libraries");
        assert_eq!(linux.jvm_args, ["-a", "-b", "-cp", "L1:L2"]);
        assert_eq!(linux.program_args, ["x"]);

        let windows = args.resolve(OsType::Windows, "libraries");
        assert_eq!(windows.jvm_args, ["-a", "-cp", "L1;L2"]);
        assert_eq!(windows.program_args, ["y"]);
        assert_eq!(windows.main_class, "Main");
    }

    #[test]
    fn resolving_substitutes_library_directory() {
        let args = StartupArguments {
            jvm_args: vec![
                Argument::common("-p"),
                Argument::common("${library_directory}/a/a-1.jar${classpath_separator}${library_directory}/b/b-1.jar"),
            ],
            program_args: vec![],
            main_class: "Main".into(),
        };

        let resolved = args.resolve(OsType::Mac, "/srv/libraries");
        assert_eq!(
            resolved.jvm_args[1],
            "/srv/libraries/a/a-1.jar:/srv/libraries/b/b-1.jar"
        );
    }

    #[test]
    fn round_trips_through_json() {
        let args = reconciled();
        let json = serde_json::to_string(&args).unwrap();
        let parsed: StartupArguments = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, args);
    }
}
