use tracing::debug;

use crate::error::ScanError;
use crate::markup::field_elements;
use crate::trigger::parse_trigger;
use crate::types::{ResultMap, ViewDescriptor, ViewKind};

/// Record into `acc` every `on_change` trigger declared by `descriptor`, then
/// descend into the form/tree sub-views of its relational fields.
///
/// Nested views are attributed to `view_name`, the top-level view that embeds
/// them. The descriptor's markup is read completely before `acc` is touched,
/// so a markup error adds nothing for that descriptor (beyond the model key).
pub fn scan_view(
    model: &str,
    view_name: &str,
    descriptor: &ViewDescriptor,
    acc: &mut ResultMap,
) -> Result<(), ScanError> {
    acc.ensure_model(model);

    let elements = field_elements(&descriptor.arch).map_err(|source| ScanError::Markup {
        model: model.to_string(),
        view: view_name.to_string(),
        source,
    })?;
    debug!(model, view = view_name, fields = elements.len(), "scanning view");

    for element in elements {
        let Some(raw) = element.on_change.as_deref() else {
            continue;
        };
        let Some(call) = parse_trigger(raw) else {
            debug!(model, view = view_name, value = raw, "skipping unparseable on_change");
            continue;
        };
        let Some(field) = element.name.as_deref() else {
            debug!(model, view = view_name, function = %call.name, "skipping on_change on unnamed field");
            continue;
        };

        let spec = acc.trigger_mut(model, &call.name);
        spec.fields.insert(field);
        spec.views.insert(view_name);
        spec.offer_args(call.args);
    }

    for (field_name, meta) in &descriptor.fields {
        let Some(related) = meta.relation.as_deref() else {
            continue;
        };
        for kind in ViewKind::SCANNED {
            if let Some(nested) = meta.view(kind) {
                debug!(
                    model,
                    field = field_name.as_str(),
                    related,
                    kind = kind.as_str(),
                    "descending into embedded view"
                );
                scan_view(related, view_name, nested, acc)?;
            }
        }
    }

    Ok(())
}
