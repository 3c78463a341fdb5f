//! A small lexer that splits template source into a sequence of typed
//! tokens.
//!
//! This crate is the entry stage of a template rendering pipeline: it
//! recognizes delimited regions inside arbitrary text and hands a flat token
//! stream to whatever parser sits on top of it. It performs no expression
//! parsing and no block matching.
//!
//! # Syntax
//!
//! A template is a piece of UTF-8 text containing plain text and three kinds
//! of delimited regions.
//!
//! - Variables: `{{ user.name }}`
//! - Blocks: `{% if logged_in %}`
//! - Comments: `{# ignored #}`
//!
//! A block written as `{%- ... -%}` followed by a newline also swallows that
//! newline, which suppresses the blank output line a control statement on its
//! own line would otherwise leave behind.
//!
//! Payloads are trimmed of ASCII spaces; everything else, including other
//! whitespace, is preserved verbatim.
//!
//! # Getting started
//!
//! For the common case call [`tokenize`].
//!
//! ```
//! use templex::Token;
//!
//! let tokens = templex::tokenize("Hello {{ user.name }}!")?;
//! assert_eq!(
//!     tokens,
//!     [
//!         Token::Text("Hello ".into()),
//!         Token::Variable("user.name".into()),
//!         Token::Text("!".into()),
//!     ]
//! );
//! # Ok::<(), templex::Error>(())
//! ```
//!
//! A delimiter that is never closed is an error by default. Construct a
//! [`Lexer`] to pick the lenient behavior instead, which emits the remainder
//! of the source as text.
//!
//! ```
//! use templex::{Lexer, Token, Unterminated};
//!
//! let lexer = Lexer::with_unterminated(Unterminated::Text);
//! let tokens = lexer.tokenize("Hello {{ user.name")?;
//! assert_eq!(
//!     tokens,
//!     [
//!         Token::Text("Hello ".into()),
//!         Token::Text("{{ user.name".into()),
//!     ]
//! );
//! # Ok::<(), templex::Error>(())
//! ```

mod error;
mod lex;
mod scan;
mod span;
mod syntax;

pub use crate::error::Error;
pub use crate::lex::{Lexer, Token, Unterminated};

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Tokenize template source using the default lexer configuration.
///
/// This is equivalent to `Lexer::new().tokenize(source)`.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new().tokenize(source)
}
