/// Result of validating a user-supplied pattern definition: a structured
/// `(errors, warnings)` pair, independent of whatever concrete source
/// language eventually backs user patterns (spec.md 4.C/6, "pattern
/// compilation"). An empty `errors` list means the source is accepted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileError {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CompileError {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Minimal structural validation standing in for a future textual
/// pattern language: checks the source is non-empty, UTF-8 (guaranteed
/// by `&str`), and has balanced parentheses/braces/brackets. Does not
/// parse or execute anything. Real bytecode compilation is out of scope
/// here; the built-in patterns in [`crate::builtins`] are the supplied
/// pattern library for now.
pub fn validate_source(src: &str) -> CompileError {
    let mut result = CompileError::default();

    if src.trim().is_empty() {
        result.errors.push("pattern source is empty".to_string());
        return result;
    }

    let mut stack = Vec::new();
    for (offset, ch) in src.char_indices() {
        match ch {
            '(' | '[' | '{' => stack.push((ch, offset)),
            ')' | ']' | '}' => {
                let expected = match ch {
                    ')' => '(',
                    ']' => '[',
                    '}' => '{',
                    _ => unreachable!(),
                };
                match stack.pop() {
                    Some((open, _)) if open == expected => {}
                    Some((open, open_offset)) => result.errors.push(format!(
                        "mismatched bracket: '{open}' at byte {open_offset} closed by '{ch}' at byte {offset}"
                    )),
                    None => result
                        .errors
                        .push(format!("unmatched closing '{ch}' at byte {offset}")),
                }
            }
            _ => {}
        }
    }
    for (open, open_offset) in stack {
        result
            .errors
            .push(format!("unclosed '{open}' at byte {open_offset}"));
    }

    if src.len() > 4096 {
        result
            .warnings
            .push("pattern source is unusually large (>4096 bytes)".to_string());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_is_an_error() {
        let report = validate_source("   ");
        assert!(!report.is_ok());
    }

    #[test]
    fn balanced_source_is_accepted() {
        let report = validate_source("hsv(x * 2.0, 1.0, v({1,2,3}))");
        assert!(report.is_ok());
    }

    #[test]
    fn unmatched_closing_bracket_is_reported() {
        let report = validate_source("hsv(x))");
        assert!(!report.is_ok());
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn unclosed_bracket_is_reported() {
        let report = validate_source("hsv(x, y");
        assert!(!report.is_ok());
    }
}
