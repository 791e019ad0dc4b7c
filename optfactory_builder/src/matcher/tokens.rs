use std::collections::VecDeque;

/// A whitespace delimited piece of the input, with its byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'i> {
    pub offset: usize,
    pub text: &'i str,
}

/// Split the input on runs of whitespace.
/// Quote & bracket characters are not special here.
pub(crate) fn tokenize(input: &str) -> VecDeque<Token<'_>> {
    let mut tokens = VecDeque::default();
    let mut start: Option<usize> = None;

    for (offset, c) in input.char_indices() {
        match (start, c.is_whitespace()) {
            (None, false) => start = Some(offset),
            (Some(s), true) => {
                tokens.push_back(Token {
                    offset: s,
                    text: &input[s..offset],
                });
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        tokens.push_back(Token {
            offset: s,
            text: &input[s..],
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", vec![])]
    #[case("   \t\n", vec![])]
    #[case("-a", vec![(0, "-a")])]
    #[case("-a 123", vec![(0, "-a"), (3, "123")])]
    #[case("  -a\t\t123  ", vec![(2, "-a"), (6, "123")])]
    #[case(r#"-l ["a", "b"]"#, vec![(0, "-l"), (3, r#"["a","#), (9, r#""b"]"#)])]
    #[case("-s héllo wörld", vec![(0, "-s"), (3, "héllo"), (10, "wörld")])]
    fn tokenize_input(#[case] input: &str, #[case] expected: Vec<(usize, &str)>) {
        let tokens: Vec<(usize, &str)> = tokenize(input)
            .into_iter()
            .map(|token| (token.offset, token.text))
            .collect();
        assert_eq!(tokens, expected);
    }
}
