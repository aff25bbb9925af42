//! Human-readable summary renderer for delta trees.

use crate::diff::model::{Delta, DeltaTree};

/// Render a Markdown summary of a [`DeltaTree`].
///
/// Informational only; the structured tree stays the source of truth.
pub fn render_human_summary(delta: &DeltaTree) -> String {
    let mut out = String::new();

    out.push_str("## Module Diff\n\n");
    out.push_str(&format!("**Module**: `{}`  \n", delta.root().name()));
    out.push_str(&format!("**Result**: {}\n\n", delta.root().delta()));

    let counts = delta.counts();
    out.push_str(&format!(
        "| Unchanged | Changed | Added | Removed |\n\
         |---|---|---|---|\n\
         | {} | {} | {} | {} |\n\n",
        counts.unchanged, counts.changed, counts.added, counts.removed
    ));

    if delta.is_unchanged() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    out.push_str("### Changes\n\n");
    for change in delta.changes() {
        // The module name is already in the heading.
        let path = change.path[1..].join(" > ");
        let line = match change.delta {
            Delta::Changed => format!(
                "- **Changed** {} `{}`: `{}` → `{}`\n",
                change.kind,
                path,
                change.older.as_deref().unwrap_or("-"),
                change.newer.as_deref().unwrap_or("-")
            ),
            Delta::Added => format!("- **Added** {} `{}`\n", change.kind, path),
            Delta::Removed => format!("- **Removed** {} `{}`\n", change.kind, path),
            Delta::Unchanged => continue,
        };
        out.push_str(&line);
    }
    out
}
