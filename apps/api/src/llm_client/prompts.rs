// Shared prompt fragments and the template filler used by every task.
// Each task keeps its own prompt constants in `tasks::prompts`.

/// Appended to system prompts of tasks that expect JSON back.
pub const JSON_ONLY_INSTRUCTION: &str = "Always respond with valid JSON.";

/// Fills `{name}` placeholders in a single left-to-right pass.
///
/// Values are inserted verbatim and never re-scanned, so user text that
/// happens to contain `{answer}` or similar stays literal. Unknown
/// placeholders are left as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replacement = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
