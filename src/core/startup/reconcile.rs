// ─── Cross-Platform Reconciliation ───
// Merges the Unix and Windows server command lines into one rule-conditioned list.

use std::collections::HashMap;

use tracing::debug;

use super::arg_file::ArgumentList;
use super::StartupArguments;
use crate::core::error::{MetaError, MetaResult};
use crate::core::version::{Argument, OsType, Rule};

fn unix_rules() -> Vec<Rule> {
    vec![Rule::allow_on(OsType::Linux), Rule::allow_on(OsType::Mac)]
}

fn windows_rules() -> Vec<Rule> {
    vec![Rule::allow_on(OsType::Windows)]
}

/// Combine both platforms' parsed arg-files into one set of startup arguments.
///
/// Both files must agree on the main class.
pub fn consolidate(unix: ArgumentList, windows: ArgumentList) -> MetaResult<StartupArguments> {
    if unix.main_class != windows.main_class {
        return Err(MetaError::MainClassMismatch {
            unix: unix.main_class,
            windows: windows.main_class,
        });
    }

    Ok(StartupArguments {
        jvm_args: combine_argument_lists(&unix.jvm_args, &windows.jvm_args),
        program_args: combine_argument_lists(&unix.program_args, &windows.program_args),
        main_class: unix.main_class,
    })
}

/// Merge two token lists into shared values and platform-specific batches.
///
/// Values common to both lists (a multiset intersection, in Unix order) are
/// emitted unconditionally. The tokens each platform has before the next
/// common value are emitted as one conditional batch per platform, Unix first.
pub fn combine_argument_lists(unix: &[String], windows: &[String]) -> Vec<Argument> {
    let common = common_values(unix, windows);
    debug!(
        "Reconciling {} unix / {} windows arguments ({} shared)",
        unix.len(),
        windows.len(),
        common.len()
    );

    let mut result = Vec::new();
    let mut unix_it = unix.iter();
    let mut windows_it = windows.iter();

    for value in common {
        push_batch(&mut result, take_until(&mut unix_it, Some(value)), unix_rules());
        push_batch(&mut result, take_until(&mut windows_it, Some(value)), windows_rules());
        result.push(Argument::common(value));
    }
    push_batch(&mut result, take_until(&mut unix_it, None), unix_rules());
    push_batch(&mut result, take_until(&mut windows_it, None), windows_rules());

    result
}

fn common_values<'a>(unix: &'a [String], windows: &[String]) -> Vec<&'a str> {
    let mut remaining: HashMap<&str, usize> = HashMap::new();
    for value in windows {
        *remaining.entry(value.as_str()).or_default() += 1;
    }

    unix.iter()
        .map(String::as_str)
        .filter(|value| match remaining.get_mut(value) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        })
        .collect()
}

/// Consume tokens up to and including `stop`, returning those before it.
/// With no `stop`, consume everything.
fn take_until<'a>(tokens: &mut impl Iterator<Item = &'a String>, stop: Option<&str>) -> Vec<String> {
    let mut batch = Vec::new();
    for token in tokens.by_ref() {
        if Some(token.as_str()) == stop {
            break;
        }
        batch.push(token.clone());
    }
    batch
}

fn push_batch(result: &mut Vec<Argument>, batch: Vec<String>, rules: Vec<Rule>) {
    if !batch.is_empty() {
        result.push(Argument::conditional(batch, rules));
    }
}
