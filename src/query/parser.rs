use crate::query::spec::{MatchMode, QuerySpec, Target};

/// Parse a one-line query into a [`QuerySpec`]
///
/// Syntax: `[mode:<contains|starts|ends>] [type:<file|folder>] term...`.
/// Filters may appear anywhere; the remaining words, joined by single spaces,
/// form the term. A term wrapped in double quotes is taken verbatim, which is
/// how leading or repeated spaces are expressed. Unknown filter values are
/// treated as part of the term.
pub fn parse_query(input: &str) -> QuerySpec {
    let mut spec = QuerySpec::default();
    let mut words: Vec<&str> = Vec::new();

    let trimmed = input.trim();
    let (head, quoted) = split_quoted(trimmed);

    for word in head.split_whitespace() {
        if let Some(value) = word.strip_prefix("mode:") {
            if let Ok(mode) = value.parse::<MatchMode>() {
                spec.mode = mode;
                continue;
            }
        } else if let Some(value) = word.strip_prefix("type:") {
            if let Ok(target) = value.parse::<Target>() {
                spec.target = target;
                continue;
            }
        }
        words.push(word);
    }

    spec.term = match quoted {
        Some(term) => term.to_string(),
        None => words.join(" "),
    };
    spec
}

/// Split off a trailing `"..."` term, if the input ends with one
fn split_quoted(input: &str) -> (&str, Option<&str>) {
    if !input.ends_with('"') || input.len() < 2 {
        return (input, None);
    }
    let body = &input[..input.len() - 1];
    match body.rfind('"') {
        Some(start) if start == 0 || body[..start].ends_with(char::is_whitespace) => {
            (&body[..start], Some(&body[start + 1..]))
        }
        _ => (input, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_term() {
        let q = parse_query("report");
        assert_eq!(q, QuerySpec::contains("report"));
    }

    #[test]
    fn test_empty_input() {
        let q = parse_query("   ");
        assert_eq!(q, QuerySpec::default());
    }

    #[test]
    fn test_filters_anywhere() {
        let q = parse_query("mode:ends .txt type:folder");
        assert_eq!(q.mode, MatchMode::EndsWith);
        assert_eq!(q.target, Target::Folders);
        assert_eq!(q.term, ".txt");
    }

    #[test]
    fn test_multi_word_term() {
        let q = parse_query("mode:starts annual   report");
        assert_eq!(q.mode, MatchMode::StartsWith);
        assert_eq!(q.term, "annual report");
    }

    #[test]
    fn test_quoted_term_is_verbatim() {
        let q = parse_query("type:file \" two  spaces\"");
        assert_eq!(q.target, Target::Files);
        assert_eq!(q.term, " two  spaces");
    }

    #[test]
    fn test_quoted_empty_term() {
        let q = parse_query("mode:starts \"\"");
        assert_eq!(q.mode, MatchMode::StartsWith);
        assert_eq!(q.term, "");
    }

    #[test]
    fn test_unknown_filter_value_is_term() {
        let q = parse_query("mode:fuzzy");
        assert_eq!(q.mode, MatchMode::Contains);
        assert_eq!(q.term, "mode:fuzzy");
    }

    #[test]
    fn test_inner_quote_is_not_a_quoted_term() {
        let q = parse_query("say\"hi\"");
        assert_eq!(q.term, "say\"hi\"");
    }
}
