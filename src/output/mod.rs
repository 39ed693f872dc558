//! Output rendering for certificate info
//!
//! Renders the nested [`Info`] mapping as an indented text tree or as
//! JSON.

use crate::models::{Info, InfoValue};
use crate::utils::OutputError;

/// Render one info mapping as an indented text tree
pub fn render_text(info: &Info) -> String {
    let mut out = String::new();
    render_group(info, 0, &mut out);
    out
}

fn render_group(group: &Info, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for (label, value) in group {
        match value {
            InfoValue::Text(text) => {
                out.push_str(&format!("{}{}: {}\n", indent, label, text));
            }
            InfoValue::Number(n) => {
                out.push_str(&format!("{}{}: {}\n", indent, label, n));
            }
            InfoValue::Group(sub) => {
                out.push_str(&format!("{}{}:\n", indent, label));
                render_group(sub, depth + 1, out);
            }
        }
    }
}

/// Render a batch of info mappings as a pretty-printed JSON array
pub fn render_json(infos: &[Info]) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(infos)?)
}
