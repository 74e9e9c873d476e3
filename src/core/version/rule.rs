// ─── Rules ───
// Activation predicates attached to conditional launch arguments.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform identifiers as they appear in rule `os.name` fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OsType {
    Windows,
    #[serde(rename = "osx")]
    Mac,
    Linux,
}

impl OsType {
    pub const ALL: [OsType; 3] = [OsType::Windows, OsType::Mac, OsType::Linux];

    pub fn name(self) -> &'static str {
        match self {
            OsType::Windows => "windows",
            OsType::Mac => "osx",
            OsType::Linux => "linux",
        }
    }

    /// Separator between classpath / module-path entries on this platform.
    pub fn classpath_separator(self) -> char {
        match self {
            OsType::Windows => ';',
            OsType::Mac | OsType::Linux => ':',
        }
    }

    /// The platform this process was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            OsType::Windows
        } else if cfg!(target_os = "macos") {
            OsType::Mac
        } else {
            OsType::Linux
        }
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Disallow,
}

/// OS condition of a rule. Only `name` takes part in evaluation; `arch` and
/// `version` are carried through as found.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OsCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl OsCondition {
    pub fn named(os: OsType) -> Self {
        Self {
            name: Some(os.name().to_string()),
            arch: None,
            version: None,
        }
    }

    pub fn platform_matches(&self, os: OsType) -> bool {
        match &self.name {
            None => true,
            Some(name) => name == os.name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    pub action: RuleAction,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<OsCondition>,
}

impl Rule {
    /// `allow` restricted to a single platform.
    pub fn allow_on(os: OsType) -> Self {
        Self {
            action: RuleAction::Allow,
            features: BTreeMap::new(),
            os: Some(OsCondition::named(os)),
        }
    }

    /// Whether the rule's conditions hold on `os`.
    ///
    /// Feature-gated rules never match: no launcher features are assumed.
    pub fn matches(&self, os: OsType) -> bool {
        self.features.is_empty() && self.os.as_ref().map_or(true, |c| c.platform_matches(os))
    }
}

/// Evaluate a rule list the way the launcher does.
///
/// - If no rules → allowed.
/// - Otherwise start with "excluded".
/// - Process rules top-to-bottom; every rule whose conditions hold on `os`
///   sets the state to its action.
/// - Final state determines inclusion.
pub fn rules_allow(rules: &[Rule], os: OsType) -> bool {
    if rules.is_empty() {
        return true;
    }

    let mut allowed = false;
    for rule in rules {
        if rule.matches(os) {
            allowed = rule.action == RuleAction::Allow;
        }
    }
    allowed
}
