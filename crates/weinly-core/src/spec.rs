/// Spec normalizer: reconciles loosely-typed model output into the canonical
/// seven-field fabric specification.
///
/// The model is asked for snake_case keys but in practice returns a mix of
/// naming conventions (camelCase, shortened forms) and occasionally a bare
/// string instead of an object. Normalization is total: any input yields a
/// fully-populated specification, with `NOT_SPECIFIED` standing in for every
/// field that cannot be resolved. Callers may branch on the sentinel; it is a
/// stable value, not an error.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sentinel for a field with no usable source value.
pub const NOT_SPECIFIED: &str = "Not specified";

/// The canonical fabric specification. Invariant: every field is a non-empty,
/// trimmed string; absent fields hold `NOT_SPECIFIED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricSpecification {
    /// E.g. "embroidered lace", "silk satin". Drives supplier matching.
    pub fabric_type: String,
    /// What the fabric is for, e.g. "wedding gowns".
    pub intended_use: String,
    /// E.g. "premium", "standard".
    pub quality_level: String,
    pub color_or_pattern: String,
    /// Weight, thickness, or GSM as free text.
    pub weight_or_thickness: String,
    pub quantity: String,
    pub budget: String,
}

/// Accepted key names per canonical field, in priority order. The first alias
/// present and non-null in the raw record wins, even if its value trims to
/// empty (it then normalizes to the sentinel rather than falling through).
const FABRIC_TYPE_ALIASES: &[&str] = &["fabric_type", "fabricType", "fabric", "type", "material"];
const INTENDED_USE_ALIASES: &[&str] =
    &["intended_use", "intendedUse", "use", "application", "purpose"];
const QUALITY_LEVEL_ALIASES: &[&str] = &["quality_level", "qualityLevel", "quality", "grade"];
const COLOR_OR_PATTERN_ALIASES: &[&str] =
    &["color_or_pattern", "colorOrPattern", "color", "pattern", "design"];
const WEIGHT_OR_THICKNESS_ALIASES: &[&str] =
    &["weight_or_thickness", "weightOrThickness", "weight", "thickness", "gsm"];
const QUANTITY_ALIASES: &[&str] = &["quantity", "qty", "amount"];
const BUDGET_ALIASES: &[&str] = &["budget", "price", "target_budget", "targetBudget"];

/// Normalize an arbitrary raw record into a `FabricSpecification`.
///
/// Total and pure. A non-object value (string, number, array, null) is
/// treated as an empty record, so every field comes back as the sentinel.
pub fn normalize(raw: &Value) -> FabricSpecification {
    let empty = Map::new();
    let record = raw.as_object().unwrap_or(&empty);

    FabricSpecification {
        fabric_type: resolve_field(record, FABRIC_TYPE_ALIASES),
        intended_use: resolve_field(record, INTENDED_USE_ALIASES),
        quality_level: resolve_field(record, QUALITY_LEVEL_ALIASES),
        color_or_pattern: resolve_field(record, COLOR_OR_PATTERN_ALIASES),
        weight_or_thickness: resolve_field(record, WEIGHT_OR_THICKNESS_ALIASES),
        quantity: resolve_field(record, QUANTITY_ALIASES),
        budget: resolve_field(record, BUDGET_ALIASES),
    }
}

/// Look up the first alias present and non-null, then apply `show`.
fn resolve_field(record: &Map<String, Value>, aliases: &[&str]) -> String {
    for alias in aliases {
        match record.get(*alias) {
            None | Some(Value::Null) => continue,
            Some(value) => return show(value),
        }
    }
    NOT_SPECIFIED.to_string()
}

/// Coerce a raw value to a trimmed display string, substituting the sentinel
/// when the result is empty. Scalars render naturally; composites render as
/// compact JSON so nothing the model returned is silently dropped.
fn show(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        composite => serde_json::to_string(composite).unwrap_or_default(),
    };
    if text.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_all_not_specified(spec: &FabricSpecification) {
        for field in [
            &spec.fabric_type,
            &spec.intended_use,
            &spec.quality_level,
            &spec.color_or_pattern,
            &spec.weight_or_thickness,
            &spec.quantity,
            &spec.budget,
        ] {
            assert_eq!(field, NOT_SPECIFIED);
        }
    }

    #[test]
    fn empty_object_yields_all_sentinels() {
        assert_all_not_specified(&normalize(&json!({})));
    }

    #[test]
    fn non_object_inputs_degrade_to_all_sentinels() {
        assert_all_not_specified(&normalize(&json!("just a string reply")));
        assert_all_not_specified(&normalize(&Value::Null));
        assert_all_not_specified(&normalize(&json!(42)));
        assert_all_not_specified(&normalize(&json!(["a", "b"])));
    }

    #[test]
    fn snake_case_fields_pass_through() {
        let spec = normalize(&json!({
            "fabric_type": "embroidered lace",
            "intended_use": "wedding gowns",
            "quality_level": "premium",
            "color_or_pattern": "white",
            "weight_or_thickness": "lightweight",
            "quantity": "50 yards",
            "budget": "$500",
        }));
        assert_eq!(spec.fabric_type, "embroidered lace");
        assert_eq!(spec.intended_use, "wedding gowns");
        assert_eq!(spec.quality_level, "premium");
        assert_eq!(spec.color_or_pattern, "white");
        assert_eq!(spec.weight_or_thickness, "lightweight");
        assert_eq!(spec.quantity, "50 yards");
        assert_eq!(spec.budget, "$500");
    }

    #[test]
    fn camel_case_and_short_aliases_resolve() {
        let spec = normalize(&json!({
            "fabricType": "silk satin",
            "use": "evening wear",
            "grade": "standard",
            "design": "floral",
            "gsm": "180",
            "qty": "200m",
            "price": "under $2/yard",
        }));
        assert_eq!(spec.fabric_type, "silk satin");
        assert_eq!(spec.intended_use, "evening wear");
        assert_eq!(spec.quality_level, "standard");
        assert_eq!(spec.color_or_pattern, "floral");
        assert_eq!(spec.weight_or_thickness, "180");
        assert_eq!(spec.quantity, "200m");
        assert_eq!(spec.budget, "under $2/yard");
    }

    #[test]
    fn first_alias_wins() {
        let spec = normalize(&json!({"fabric_type": "silk", "fabric": "cotton"}));
        assert_eq!(spec.fabric_type, "silk");
    }

    #[test]
    fn null_alias_falls_through_to_next() {
        let spec = normalize(&json!({"fabric_type": null, "fabric": "cotton"}));
        assert_eq!(spec.fabric_type, "cotton");
    }

    #[test]
    fn whitespace_only_value_becomes_sentinel() {
        let spec = normalize(&json!({"fabric_type": "   "}));
        assert_eq!(spec.fabric_type, NOT_SPECIFIED);
    }

    #[test]
    fn present_empty_value_does_not_fall_through() {
        // "" is present, so "fabric" is never consulted; the empty string
        // normalizes to the sentinel instead.
        let spec = normalize(&json!({"fabric_type": "", "fabric": "cotton"}));
        assert_eq!(spec.fabric_type, NOT_SPECIFIED);
    }

    #[test]
    fn values_are_trimmed() {
        let spec = normalize(&json!({"fabric_type": "  velvet  "}));
        assert_eq!(spec.fabric_type, "velvet");
    }

    #[test]
    fn numeric_and_bool_values_coerce_to_strings() {
        let spec = normalize(&json!({"quantity": 50, "budget": 19.99}));
        assert_eq!(spec.quantity, "50");
        assert_eq!(spec.budget, "19.99");
    }

    #[test]
    fn composite_values_render_as_json() {
        let spec = normalize(&json!({"color_or_pattern": ["white", "ivory"]}));
        assert_eq!(spec.color_or_pattern, r#"["white","ivory"]"#);
    }

    #[test]
    fn extra_keys_are_ignored() {
        let spec = normalize(&json!({"fabric_type": "denim", "vendor_notes": "n/a"}));
        assert_eq!(spec.fabric_type, "denim");
        assert_eq!(spec.intended_use, NOT_SPECIFIED);
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize(&json!({
            "fabricType": "chiffon",
            "purpose": "scarves",
            "quantity": 10,
        }));
        let reinterpreted = serde_json::to_value(&first).expect("serialize spec");
        let second = normalize(&reinterpreted);
        assert_eq!(first, second);
    }
}
