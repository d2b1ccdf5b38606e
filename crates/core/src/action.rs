//! Tagged-union action envelope normalization.
//!
//! A governance action arrives as a `{tag, value}` envelope nested up to
//! two levels deep: an outer DSO-rules action wrapping an inner domain
//! action under `dsoAction` or `amuletRulesAction`. Normalization unwraps
//! the envelope into a flat `(action_type, title, details)` triple.

use serde_json::Value;

/// Known governance action tag prefixes, stripped when deriving titles.
pub const KNOWN_TAG_PREFIXES: &[&str] = &["SRARC_", "ARC_", "CRARC_", "ARAC_"];

/// Display titles for well-known governance action tags.
///
/// Every entry matches what [`title_for_tag`]'s fallback would produce;
/// the table exists so the common tags resolve without re-running the
/// stripping logic, while unseen tags still format correctly.
const KNOWN_ACTION_TITLES: &[(&str, &str)] = &[
    ("SRARC_AddSv", "Add Sv"),
    ("SRARC_OffboardSv", "Offboard Sv"),
    ("SRARC_UpdateSvRewardWeight", "Update Sv Reward Weight"),
    ("SRARC_GrantFeaturedAppRight", "Grant Featured App Right"),
    ("SRARC_RevokeFeaturedAppRight", "Revoke Featured App Right"),
    ("SRARC_SetConfig", "Set Config"),
    ("CRARC_AddFutureAmuletConfigSchedule", "Add Future Amulet Config Schedule"),
    ("CRARC_SetConfig", "Set Config"),
    ("ARC_AmuletRules", "Amulet Rules"),
    ("ARC_DsoRules", "Dso Rules"),
];

/// A governance action unwrapped from its tagged-union envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAction {
    /// The innermost tag found in the envelope.
    pub action_type: String,
    /// Human-readable title derived from the tag; never empty.
    pub title: String,
    /// The innermost value, carrying arbitrary key/value pairs for display.
    pub details: Option<Value>,
}

impl NormalizedAction {
    fn unknown() -> Self {
        NormalizedAction {
            action_type: "Unknown".to_string(),
            title: "Unknown Action".to_string(),
            details: None,
        }
    }
}

/// Unwrap an action envelope into a [`NormalizedAction`].
///
/// The envelope may nest two levels: the outer tag/value pair, then an
/// inner action under `dsoAction` (preferred) or `amuletRulesAction`.
/// A missing `tag` falls back to the envelope's own top-level key; a
/// missing `value` falls back to the field named by the tag, then to the
/// envelope itself. A `null` or absent envelope yields the "Unknown"
/// action -- this function never fails.
pub fn normalize_action(envelope: Option<&Value>) -> NormalizedAction {
    let envelope = match envelope {
        Some(v) if !v.is_null() => v,
        _ => return NormalizedAction::unknown(),
    };

    let outer_tag = envelope
        .get("tag")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| first_key(envelope))
        .unwrap_or_else(|| "Unknown".to_string());

    let outer_value = envelope
        .get("value")
        .or_else(|| envelope.get(&outer_tag))
        .unwrap_or(envelope);

    // Inner domain action: DSO-rules wrapper first, then amulet-rules.
    let inner_action = outer_value
        .get("dsoAction")
        .or_else(|| outer_value.get("amuletRulesAction"))
        .unwrap_or(outer_value);

    let inner_tag = inner_action.get("tag").and_then(Value::as_str).unwrap_or("");
    let inner_value = inner_action.get("value").unwrap_or(inner_action);

    let action_type = if inner_tag.is_empty() {
        outer_tag
    } else {
        inner_tag.to_string()
    };
    let title = title_for_tag(&action_type);

    NormalizedAction {
        action_type,
        title,
        details: Some(inner_value.clone()),
    }
}

/// Derive a display title from an action tag.
///
/// Well-known tags resolve from the static table. Otherwise the first
/// matching known prefix is stripped, each internal capital letter is
/// preceded by a space, and the result is trimmed. An empty result falls
/// back to `"Unknown Action"` so titles are never empty.
pub fn title_for_tag(tag: &str) -> String {
    if let Some((_, title)) = KNOWN_ACTION_TITLES.iter().find(|(t, _)| *t == tag) {
        return (*title).to_string();
    }

    let stripped = KNOWN_TAG_PREFIXES
        .iter()
        .find_map(|p| tag.strip_prefix(p))
        .unwrap_or(tag);

    let mut spaced = String::with_capacity(stripped.len() + 8);
    for (i, ch) in stripped.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let title = spaced.trim().to_string();
    if title.is_empty() {
        "Unknown Action".to_string()
    } else {
        title
    }
}

fn first_key(envelope: &Value) -> Option<String> {
    envelope
        .as_object()
        .and_then(|obj| obj.keys().next())
        .cloned()
}
