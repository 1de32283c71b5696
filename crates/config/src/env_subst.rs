//! `${ENV_VAR}` expansion for raw config text.

/// Replace `${ENV_VAR}` placeholders in the raw config text.
///
/// Unresolvable variables are left as-is so the parse error (if any) points
/// at the original placeholder.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// Replace `${ENV_VAR}` placeholders using a custom lookup function.
fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find('}') {
            Some(end) if end > 0 => {
                let name = &after_open[..end];
                match lookup(name) {
                    Some(value) => result.push_str(&value),
                    None => result.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after_open[end + 1..];
            },
            // `${}` or an unterminated placeholder: emit literally.
            _ => {
                result.push_str("${");
                rest = after_open;
            },
        }
    }

    result.push_str(rest);
    result
}
