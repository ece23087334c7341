//! Action template rendering.

use fzpick_types::trim_candidate;

/// Token replaced by the selected candidate in action templates.
pub const SELECTED_PLACEHOLDER: &str = "{{selected}}";

/// Replace every `{{selected}}` in `template` with the trimmed candidate.
///
/// A byte-order mark counts as whitespace. A template without the placeholder is returned unchanged.
#[must_use]
pub fn render_template(template: &str, selected: &str) -> String {
    template.replace(SELECTED_PLACEHOLDER, trim_candidate(selected))
}
