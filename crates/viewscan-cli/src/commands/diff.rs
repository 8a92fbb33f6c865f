use std::collections::BTreeSet;
use std::path::Path;

use viewscan_core::{OrderedSet, ResultMap, TriggerSpec};

use crate::build_triggers;
use crate::commands::list::render_args;

/// Compare the triggers found in two snapshot sets.
pub fn run_diff(left_path: &Path, right_path: &Path) -> Result<String, String> {
    let left = build_triggers(left_path, &[])?;
    let right = build_triggers(right_path, &[])?;
    Ok(diff_results(&left, &right))
}

fn diff_results(left: &ResultMap, right: &ResultMap) -> String {
    let mut lines: Vec<String> = Vec::new();

    let keys = |r: &ResultMap| -> BTreeSet<(String, String)> {
        r.iter()
            .flat_map(|(model, triggers)| {
                triggers
                    .keys()
                    .map(move |function| (model.to_string(), function.clone()))
            })
            .collect()
    };
    let left_keys = keys(left);
    let right_keys = keys(right);

    for (model, function) in right_keys.difference(&left_keys) {
        lines.push(format!("+ {model}.{function}"));
    }
    for (model, function) in left_keys.difference(&right_keys) {
        lines.push(format!("- {model}.{function}"));
    }
    for (model, function) in left_keys.intersection(&right_keys) {
        if let (Some(l), Some(r)) = (left.get(model, function), right.get(model, function)) {
            let changes = spec_changes(l, r);
            if !changes.is_empty() {
                lines.push(format!("~ {model}.{function}: {}", changes.join(", ")));
            }
        }
    }

    if lines.is_empty() {
        return "No differences found.".into();
    }

    lines.sort();
    let add_count = lines.iter().filter(|l| l.starts_with('+')).count();
    let rem_count = lines.iter().filter(|l| l.starts_with('-')).count();
    let mod_count = lines.iter().filter(|l| l.starts_with('~')).count();
    lines.push(format!(
        "\n{} added, {} removed, {} modified",
        add_count, rem_count, mod_count
    ));
    lines.join("\n")
}

fn spec_changes(left: &TriggerSpec, right: &TriggerSpec) -> Vec<String> {
    let mut changes = Vec::new();
    if left.args != right.args {
        changes.push(format!(
            "args: ({}) → ({})",
            render_args(&left.args),
            render_args(&right.args)
        ));
    }
    if let Some(change) = set_change("fields", &left.fields, &right.fields) {
        changes.push(change);
    }
    if let Some(change) = set_change("views", &left.views, &right.views) {
        changes.push(change);
    }
    changes
}

fn set_change(label: &str, left: &OrderedSet, right: &OrderedSet) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    parts.extend(right.iter().filter(|v| !left.contains(v)).map(|v| format!("+{v}")));
    parts.extend(left.iter().filter(|v| !right.contains(v)).map(|v| format!("-{v}")));
    if parts.is_empty() {
        None
    } else {
        Some(format!("{label} {}", parts.join(" ")))
    }
}
