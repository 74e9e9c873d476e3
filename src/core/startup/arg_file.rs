// ─── Server Arg-Files ───
// Parses `data/unix_args.txt` / `data/win_args.txt` into a flat command line.

use std::sync::LazyLock;

use regex::Regex;

use super::{CLASSPATH_SEPARATOR, LIBRARY_DIRECTORY};
use crate::core::error::{MetaError, MetaResult};

// An option has the form `-option-abc` or `--option-abc`, followed by spaces and a value.
static OPTION_WITH_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-{1,2}[a-z-]*[a-z])\s+(\S.*)$").expect("Invalid regex")
});

const LIBRARY_DIRECTORY_PROPERTY: &str = "-DlibraryDirectory=";
const LEGACY_CLASSPATH_PROPERTY: &str = "-DlegacyClassPath=";
const PATH_FLAGS: [&str; 4] = ["-p", "--module-path", "-cp", "-classpath"];

/// Ordered main-class patterns. The first token fully matching any of them is
/// the main class.
#[derive(Debug, Clone)]
pub struct MainClassPatterns(Vec<Regex>);

impl MainClassPatterns {
    /// Patterns are anchored to match whole tokens.
    pub fn new<'a>(patterns: impl IntoIterator<Item = &'a str>) -> MetaResult<Self> {
        patterns
            .into_iter()
            .map(|p| {
                Regex::new(&format!("^(?:{p})$"))
                    .map_err(|e| MetaError::InvalidMainClassPattern(e.to_string()))
            })
            .collect::<MetaResult<Vec<_>>>()
            .map(Self)
    }

    pub fn find(&self, tokens: &[String]) -> Option<usize> {
        tokens
            .iter()
            .position(|token| self.0.iter().any(|pattern| pattern.is_match(token)))
    }
}

impl Default for MainClassPatterns {
    // NeoForge has only ever used a handful of server main classes.
    fn default() -> Self {
        let patterns = [
            regex::escape("cpw.mods.bootstraplauncher.BootstrapLauncher"),
            format!("{}[A-Z][a-zA-Z0-9]*", regex::escape("net.neoforged.fml.startup.")),
        ];
        Self(
            patterns
                .iter()
                .map(|p| Regex::new(&format!("^(?:{p})$")).expect("Invalid regex"))
                .collect(),
        )
    }
}

/// One platform's command line split at the main class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentList {
    pub jvm_args: Vec<String>,
    pub main_class: String,
    pub program_args: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ArgFileParser {
    main_class_patterns: MainClassPatterns,
}

impl ArgFileParser {
    pub fn new(main_class_patterns: MainClassPatterns) -> Self {
        Self {
            main_class_patterns,
        }
    }

    /// Parse an arg-file written for a platform whose path separator is
    /// `path_separator`.
    ///
    /// Paths under the library directory and the separators between path
    /// entries are replaced with placeholders, so equivalent files for
    /// different platforms yield equal tokens.
    pub fn parse(&self, content: &str, path_separator: char) -> MetaResult<ArgumentList> {
        let mut tokens = split_tokens(content);
        let library_directory = replace_library_directory(&mut tokens);

        for i in 0..tokens.len() {
            let rewritten = if let Some(value) = tokens[i].strip_prefix(LEGACY_CLASSPATH_PROPERTY) {
                let value = translate_path_list(value, path_separator, library_directory.as_deref());
                Some(format!("{LEGACY_CLASSPATH_PROPERTY}{value}"))
            } else if i > 0 && PATH_FLAGS.contains(&tokens[i - 1].as_str()) {
                Some(translate_path_list(
                    &tokens[i],
                    path_separator,
                    library_directory.as_deref(),
                ))
            } else {
                None
            };

            if let Some(rewritten) = rewritten {
                tokens[i] = rewritten;
            }
        }

        let main_class_idx = self
            .main_class_patterns
            .find(&tokens)
            .ok_or_else(|| MetaError::MainClassNotFound {
                tokens: tokens.clone(),
            })?;

        let program_args = tokens.split_off(main_class_idx + 1);
        let main_class = tokens.pop().unwrap_or_default();

        Ok(ArgumentList {
            jvm_args: tokens,
            main_class,
            program_args,
        })
    }
}

/// One token per line, except that `-option value` lines are split in two.
/// Older arg-files did not consistently put one argument per line.
fn split_tokens(content: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for line in content.lines().filter(|line| !line.trim().is_empty()) {
        match OPTION_WITH_VALUE.captures(line) {
            Some(caps) => {
                tokens.push(caps[1].to_string());
                tokens.push(caps[2].to_string());
            }
            None => tokens.push(line.to_string()),
        }
    }
    tokens
}

/// Record the `-DlibraryDirectory=` value (last one wins) and replace it with
/// the placeholder.
fn replace_library_directory(tokens: &mut [String]) -> Option<String> {
    let mut library_directory = None;
    for token in tokens.iter_mut() {
        if let Some(value) = token.strip_prefix(LIBRARY_DIRECTORY_PROPERTY) {
            library_directory = Some(value.to_string());
            *token = format!("{LIBRARY_DIRECTORY_PROPERTY}{LIBRARY_DIRECTORY}");
        }
    }
    library_directory
}

fn translate_path_list(value: &str, path_separator: char, library_directory: Option<&str>) -> String {
    let mut items: Vec<&str> = value.split(path_separator).collect();
    while items.last().is_some_and(|item| item.is_empty()) {
        items.pop();
    }

    items
        .into_iter()
        .map(|item| match library_directory {
            Some(dir) if item.starts_with(&format!("{dir}/")) => {
                format!("{LIBRARY_DIRECTORY}{}", &item[dir.len()..])
            }
            _ => item.to_string(),
        })
        .collect::<Vec<_>>()
        .join(CLASSPATH_SEPARATOR)
}
