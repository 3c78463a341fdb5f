use crate::scan::Scanner;
use crate::syntax::{Kind, Pair, PAIRS};
use crate::{Error, Result};

/// A segment of template source.
///
/// Each variant owns its payload, already stripped of delimiters. The token
/// sequence is handed to a downstream parser as-is; this crate attaches no
/// further meaning to the payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// Verbatim output content, delimiters excluded.
    Text(String),

    /// The trimmed expression between `{{` and `}}`.
    Variable(String),

    /// The trimmed statement between `{%` and `%}`, or between `{%-` and a
    /// `-%}` that swallows the newline after it.
    Block(String),

    /// The trimmed content between `{#` and `#}`.
    ///
    /// Comments produce no output, but the content is retained so that tools
    /// can re-emit or inspect it.
    Comment(String),
}

/// How the lexer treats a span whose closing marker never appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unterminated {
    /// Fail with an [`Error`] pointing at the opening marker.
    Error,

    /// Emit the rest of the source, opening marker included, as one final
    /// [`Token::Text`]. The remainder is never re-classified.
    Text,
}

impl Default for Unterminated {
    fn default() -> Self {
        Self::Error
    }
}

/// Splits template source into a sequence of [`Token`]s.
///
/// The lexer holds only configuration. Each [`tokenize`][Lexer::tokenize]
/// call scans its input with a fresh cursor, so a single lexer can be reused
/// and shared freely.
#[derive(Debug, Clone)]
pub struct Lexer {
    unterminated: Unterminated,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    /// Construct a new lexer.
    ///
    /// Unterminated delimiters are treated as errors, see
    /// [`Unterminated::Error`].
    pub fn new() -> Self {
        Self {
            unterminated: Unterminated::Error,
        }
    }

    /// Construct a new lexer with the given unterminated delimiter behavior.
    pub fn with_unterminated(unterminated: Unterminated) -> Self {
        Self { unterminated }
    }

    /// Tokenize the template source.
    ///
    /// Everything between an opening marker and its paired closing marker
    /// becomes a single classified token; everything else becomes text. The
    /// text before a marker and the text after the final marker are both
    /// preserved exactly, so no input is ever lost.
    ///
    /// # Examples
    ///
    /// ```
    /// use templex::{Lexer, Token};
    ///
    /// let tokens = Lexer::new().tokenize("Hello {{ user.name }}!")?;
    /// assert_eq!(
    ///     tokens,
    ///     [
    ///         Token::Text("Hello ".into()),
    ///         Token::Variable("user.name".into()),
    ///         Token::Text("!".into()),
    ///     ]
    /// );
    /// # Ok::<(), templex::Error>(())
    /// ```
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut scanner = Scanner::new(source);
        let begins = PAIRS.map(|pair| pair.begin);

        while !scanner.is_empty() {
            match scanner.find_any(&begins) {
                Some((p, text)) => {
                    if !text.is_empty() {
                        tokens.push(classify(text));
                    }

                    let pair = PAIRS[p];
                    let at = scanner.offset();
                    let span = scanner.consume_until(pair.end, true);
                    if span.is_empty() {
                        // The closing marker never occurs.
                        match self.unterminated {
                            Unterminated::Error => {
                                let msg = format!("unclosed {}", pair.kind.human());
                                return Err(Error::syntax(msg, source, at..at + pair.begin.len()));
                            }
                            Unterminated::Text => {
                                tokens.push(Token::Text(scanner.take_rest().to_owned()));
                            }
                        }
                    } else {
                        tokens.push(classify(span));
                    }
                }
                None => {
                    // No further opening markers, the rest is text.
                    tokens.push(classify(scanner.take_rest()));
                }
            }
        }

        Ok(tokens)
    }
}

/// Classifies a full opening-to-closing span, or plain text.
///
/// Pairs are tested in the same precedence order used to find the opening
/// markers. For the matching pair both markers are stripped and the payload
/// is trimmed of ASCII spaces (only U+0020, other whitespace is payload). A
/// span matching no opening marker passes through as text.
fn classify(span: &str) -> Token {
    for pair in PAIRS {
        if let Some(payload) = strip(span, pair) {
            let payload = payload.trim_matches(' ').to_owned();
            return match pair.kind {
                Kind::Variable => Token::Variable(payload),
                Kind::Block | Kind::BlockTrim => Token::Block(payload),
                Kind::Comment => Token::Comment(payload),
            };
        }
    }
    Token::Text(span.to_owned())
}

fn strip(span: &str, pair: Pair) -> Option<&str> {
    // Checked on both ends so that a span too short to hold both markers,
    // like `{%-%}\n`, falls through instead of slicing out of bounds.
    span.strip_prefix(pair.begin)?.strip_suffix(pair.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_empty() {
        assert_eq!(tokenize(""), []);
    }

    #[test]
    fn tokenize_text_only() {
        assert_eq!(tokenize("hello world"), [text("hello world")]);
    }

    #[test]
    fn tokenize_variable() {
        assert_eq!(tokenize("{{ name }}"), [Token::Variable("name".into())]);
    }

    #[test]
    fn tokenize_variable_all_spaces() {
        assert_eq!(tokenize("{{   }}"), [Token::Variable(String::new())]);
    }

    #[test]
    fn tokenize_variable_trims_only_spaces() {
        assert_eq!(
            tokenize("{{\tname\t}}"),
            [Token::Variable("\tname\t".into())]
        );
    }

    #[test]
    fn tokenize_block() {
        assert_eq!(
            tokenize("{% if logged_in %}"),
            [Token::Block("if logged_in".into())]
        );
    }

    #[test]
    fn tokenize_block_trim() {
        assert_eq!(tokenize("{%- x -%}\n"), [Token::Block("x".into())]);
    }

    #[test]
    fn tokenize_block_trim_swallows_newline() {
        assert_eq!(
            tokenize("a\n{%- endif -%}\nb"),
            [text("a\n"), Token::Block("endif".into()), text("b")]
        );
    }

    #[test]
    fn tokenize_comment() {
        assert_eq!(tokenize("{# note #}"), [Token::Comment("note".into())]);
    }

    #[test]
    fn tokenize_comment_with_stray_markers_inside() {
        assert_eq!(
            tokenize("{# anything goes e.g. - # { #}"),
            [Token::Comment("anything goes e.g. - # {".into())]
        );
    }

    #[test]
    fn tokenize_mixed() {
        assert_eq!(
            tokenize("A{{ b }}C{# d #}E"),
            [
                text("A"),
                Token::Variable("b".into()),
                text("C"),
                Token::Comment("d".into()),
                text("E"),
            ]
        );
    }

    #[test]
    fn tokenize_adjacent_spans() {
        assert_eq!(
            tokenize("{{ a }}{% b %}"),
            [Token::Variable("a".into()), Token::Block("b".into())]
        );
    }

    #[test]
    fn tokenize_trailing_text() {
        assert_eq!(
            tokenize("{{ a }} rest"),
            [Token::Variable("a".into()), text(" rest")]
        );
    }

    #[test]
    fn tokenize_end_marker_alone_is_text() {
        assert_eq!(tokenize("a }} b %} c"), [text("a }} b %} c")]);
    }

    #[test]
    fn tokenize_closer_after_block_is_text() {
        assert_eq!(
            tokenize("{% a %} b %}"),
            [Token::Block("a".into()), text(" b %}")]
        );
    }

    #[test]
    fn tokenize_multibyte_text() {
        assert_eq!(
            tokenize("héllo {{ nåme }} wörld"),
            [
                text("héllo "),
                Token::Variable("nåme".into()),
                text(" wörld"),
            ]
        );
    }

    #[test]
    fn tokenize_unterminated_variable() {
        let err = Lexer::new().tokenize("{{ unterminated").unwrap_err();
        assert_eq!(err.to_string(), "unclosed variable between bytes 0 and 2");
    }

    #[test]
    fn tokenize_unterminated_comment() {
        let err = Lexer::new().tokenize("a {# b").unwrap_err();
        assert_eq!(err.to_string(), "unclosed comment between bytes 2 and 4");
    }

    #[test]
    fn tokenize_block_trim_requires_newline() {
        let err = Lexer::new().tokenize("{%- x -%}").unwrap_err();
        assert_eq!(err.to_string(), "unclosed block between bytes 0 and 3");
    }

    #[test]
    fn tokenize_block_trim_requires_trim_closer() {
        let err = Lexer::new().tokenize("{%- x %}\n").unwrap_err();
        assert_eq!(err.to_string(), "unclosed block between bytes 0 and 3");
    }

    #[test]
    fn tokenize_lenient_unterminated() {
        let lexer = Lexer::with_unterminated(Unterminated::Text);
        let tokens = lexer.tokenize("{{ unterminated").unwrap();
        assert_eq!(tokens, [text("{{ unterminated")]);
    }

    #[test]
    fn tokenize_lenient_keeps_leading_text() {
        let lexer = Lexer::with_unterminated(Unterminated::Text);
        let tokens = lexer.tokenize("A{# b").unwrap();
        assert_eq!(tokens, [text("A"), text("{# b")]);
    }

    #[test]
    fn tokenize_lenient_never_reclassifies_remainder() {
        // Without the trailing newline the trim block is unterminated; the
        // remainder must stay text instead of turning into `{% ... %}`.
        let lexer = Lexer::with_unterminated(Unterminated::Text);
        let tokens = lexer.tokenize("{%- x -%}").unwrap();
        assert_eq!(tokens, [text("{%- x -%}")]);
    }

    fn text(s: &str) -> Token {
        Token::Text(s.to_owned())
    }

    #[track_caller]
    fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new().tokenize(source).unwrap()
    }
}
