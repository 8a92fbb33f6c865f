/// Attribute declaring a trigger on a view field.
pub const TRIGGER_ATTRIBUTE: &[u8] = b"on_change";

/// Tag of the view elements that may carry a trigger.
pub const FIELD_TAG: &[u8] = b"field";

/// Remote model holding view definitions.
pub const VIEW_MODEL: &str = "ir.ui.view";

/// Remote model mapping records to their `<module>.<name>` external ids.
pub const MODEL_DATA_MODEL: &str = "ir.model.data";

/// Columns read from `ir.model.data` to qualify a view.
pub const MODEL_DATA_FIELDS: [&str; 3] = ["name", "module", "res_id"];
