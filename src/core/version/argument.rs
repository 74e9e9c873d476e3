// ─── Launch Arguments ───
// A launch argument is either a bare value or a rule-conditioned batch.
//
// Wire form:
//   "--add-modules"                                   → Argument::Value
//   { "value": ["-XstartOnFirstThread"], "rules": [..] } → Argument::Conditional
//   { "value": "-XstartOnFirstThread", "rules": [..] }   → normalized to a one-element batch

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::rule::{rules_allow, OsType, Rule};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawArgument")]
pub enum Argument {
    /// Always passed.
    Value(String),
    /// Passed, in order, only where `rules` allow it.
    Conditional { value: Vec<String>, rules: Vec<Rule> },
}

/// Which platforms an argument is active on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformSet {
    pub windows: bool,
    pub linux: bool,
    pub osx: bool,
}

impl Argument {
    pub fn common(value: impl Into<String>) -> Self {
        Argument::Value(value.into())
    }

    pub fn conditional(value: Vec<String>, rules: Vec<Rule>) -> Self {
        Argument::Conditional { value, rules }
    }

    /// Every literal this entry may contribute, regardless of rules.
    pub fn values(&self) -> &[String] {
        match self {
            Argument::Value(value) => std::slice::from_ref(value),
            Argument::Conditional { value, .. } => value,
        }
    }

    pub fn applies_to(&self, os: OsType) -> bool {
        match self {
            Argument::Value(_) => true,
            Argument::Conditional { rules, .. } => rules_allow(rules, os),
        }
    }

    pub fn platforms(&self) -> PlatformSet {
        PlatformSet {
            windows: self.applies_to(OsType::Windows),
            linux: self.applies_to(OsType::Linux),
            osx: self.applies_to(OsType::Mac),
        }
    }
}

impl Serialize for Argument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Argument::Value(value) => serializer.serialize_str(value),
            Argument::Conditional { value, rules } => {
                let mut state = serializer.serialize_struct("Argument", 2)?;
                state.serialize_field("value", value)?;
                state.serialize_field("rules", rules)?;
                state.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawArgument {
    Value(String),
    Conditional {
        value: OneOrMany,
        #[serde(default)]
        rules: Vec<Rule>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<RawArgument> for Argument {
    fn from(raw: RawArgument) -> Self {
        match raw {
            RawArgument::Value(value) => Argument::Value(value),
            RawArgument::Conditional { value, rules } => {
                let value = match value {
                    OneOrMany::One(single) => vec![single],
                    OneOrMany::Many(many) => many,
                };
                Argument::Conditional { value, rules }
            }
        }
    }
}
