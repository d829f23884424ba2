/// Substitute positional placeholders in a message template
///
/// `{N}` becomes `args[N]`, or nothing when there is no such argument.
/// `{{` and `}}` produce literal braces; any other brace is kept as is.
pub(crate) fn render(template: &str, args: &[&str]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(position) = rest.find(['{', '}']) {
        output.push_str(&rest[..position]);
        let tail = &rest[position..];

        if let Some(after) = tail.strip_prefix("{{") {
            output.push('{');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix("}}") {
            output.push('}');
            rest = after;
            continue;
        }

        if tail.starts_with('{')
            && let Some(close) = tail.find('}')
            && let Some(index) = placeholder_index(&tail[1..close])
        {
            output.push_str(args.get(index).copied().unwrap_or_default());
            rest = &tail[close + 1..];
            continue;
        }

        output.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    output.push_str(rest);
    output
}

fn placeholder_index(inner: &str) -> Option<usize> {
    if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    inner.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::render;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(render("Access denied", &["ignored"]), "Access denied");
    }

    #[test]
    fn positional_arguments() {
        assert_eq!(render("{1} before {0}", &["a", "b"]), "b before a");
        assert_eq!(render("{0}{0}", &["x"]), "xx");
    }

    #[test]
    fn missing_argument_renders_empty() {
        assert_eq!(render("Failed: {0}.", &[]), "Failed: .");
        assert_eq!(render("Failed: {3}", &["only one"]), "Failed: ");
    }

    #[test]
    fn escaped_and_stray_braces() {
        assert_eq!(render("{{0}} is {0}", &["zero"]), "{0} is zero");
        assert_eq!(render("set {a} and }", &[]), "set {a} and }");
        assert_eq!(render("open {", &[]), "open {");
    }
}
