use std::path::Path;

use viewscan_core::{ArgValue, ResultMap};

use crate::build_triggers;

pub fn run_list(
    input_path: &Path,
    models: &[String],
    format: &str,
    output_file: Option<&Path>,
) -> Result<String, String> {
    let result = build_triggers(input_path, models)?;

    let rendered = match format {
        "json" => serde_json::to_string_pretty(&result)
            .map_err(|e| format!("JSON serialization error: {e}"))?,
        _ => render_human(&result),
    };

    if let Some(out_path) = output_file {
        std::fs::write(out_path, &rendered)
            .map_err(|e| format!("Failed to write {}: {e}", out_path.display()))?;
        return Ok(format!("Written to {}", out_path.display()));
    }

    Ok(rendered)
}

pub fn render_args(args: &[ArgValue]) -> String {
    let parts: Vec<String> = args.iter().map(ArgValue::to_string).collect();
    parts.join(", ")
}

fn render_human(result: &ResultMap) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (model, triggers) in result.iter() {
        lines.push(model.to_string());
        if triggers.is_empty() {
            lines.push("  (no on_change triggers)".into());
        }
        for (function, spec) in triggers {
            lines.push(format!("  {function}({})", render_args(&spec.args)));
            lines.push(format!(
                "    fields: {}",
                spec.fields.iter().collect::<Vec<_>>().join(", ")
            ));
            lines.push(format!(
                "    views:  {}",
                spec.views.iter().collect::<Vec<_>>().join(", ")
            ));
        }
    }

    let count = result.trigger_count();
    let model_count = result.models().count();
    let trigger_word = if count == 1 { "trigger" } else { "triggers" };
    let model_word = if model_count == 1 { "model" } else { "models" };
    lines.push(format!(
        "{count} {trigger_word} in {model_count} {model_word}."
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_listing_shows_signature_and_bindings() {
        let mut result = ResultMap::new();
        let spec = result.trigger_mut("res.partner", "onchange_zip");
        spec.fields.insert("zip");
        spec.views.insert("base.view_partner_form");
        spec.offer_args(vec![ArgValue::Str("zip".into()), ArgValue::Bool(true)]);
        result.ensure_model("res.users");

        let text = render_human(&result);
        assert!(text.contains("  onchange_zip(zip, True)"));
        assert!(text.contains("    views:  base.view_partner_form"));
        assert!(text.contains("res.users\n  (no on_change triggers)"));
        assert!(text.ends_with("1 trigger in 2 models."));
    }
}
