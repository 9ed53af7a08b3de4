//! Quote-aware splitting of free-text command lines.

/// Split a command-line string into argument tokens.
///
/// A double quote toggles a quoted span and is never kept; spaces inside a
/// quoted span belong to the surrounding token, spaces outside separate
/// tokens. Splitting is total: unbalanced quotes produce a best-effort
/// result rather than an error, and an empty input yields no tokens.
///
/// This is deliberately not a shell lexer. Backslash escapes and single
/// quotes have no special meaning, and only ASCII spaces separate tokens.
#[must_use]
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ' ' if !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_spaces() {
        assert_eq!(split_command_line("one two -z"), vec!["one", "two", "-z"]);
    }

    #[test]
    fn quoted_spans_keep_their_spaces() {
        assert_eq!(
            split_command_line("\"arg one\" two -z"),
            vec!["arg one", "two", "-z"]
        );
    }

    #[test]
    fn quotes_are_stripped_mid_token() {
        assert_eq!(split_command_line("a\"b\"c"), vec!["abc"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(split_command_line("").is_empty());
    }

    #[test]
    fn runs_of_spaces_collapse() {
        assert_eq!(split_command_line("  a   b  "), vec!["a", "b"]);
    }

    #[test]
    fn bare_quoted_empty_yields_no_token() {
        assert!(split_command_line("\"\"").is_empty());
    }

    #[test]
    fn unbalanced_quote_is_best_effort() {
        // The open quote glues the remainder into one token.
        assert_eq!(split_command_line("a\"b c"), vec!["ab c"]);
    }

    #[test]
    fn quoted_path_with_spaces() {
        assert_eq!(
            split_command_line("copy \"/tmp/in dir/a\" /tmp/out"),
            vec!["copy", "/tmp/in dir/a", "/tmp/out"]
        );
    }
}
