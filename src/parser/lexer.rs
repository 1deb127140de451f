//! Lexer for template markup using logos
//!
//! Every character of the input maps to some token, so text runs can be
//! recovered from token spans without loss.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    // Tag delimiters (longer patterns first)
    #[token("</")]
    CloseTagOpen,
    #[token("/>")]
    SelfClose,
    #[token("<")]
    TagOpen,
    #[token(">")]
    TagEnd,
    #[token("/")]
    Slash,
    #[token("=")]
    Equals,

    // Interpolation delimiters
    #[token("{{")]
    MustacheOpen,
    #[token("}}")]
    MustacheClose,
    #[regex(r"[{}]")]
    Brace,

    // Quoted attribute values. Angle brackets are excluded so that a stray
    // apostrophe in text cannot swallow the following tags.
    #[regex(r#""[^"<>]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    #[regex(r#"'[^'<>]*'"#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    Quoted(String),

    // Unbalanced quote character
    #[regex(r#"["']"#)]
    Quote,

    // Tag and attribute names: my-component, @click, :my-msg, v-on:child-msg
    #[regex(r"[a-zA-Z_@:#][a-zA-Z0-9_\-.:@]*", |lex| lex.slice().to_string())]
    Name(String),

    #[regex(r"[ \t\r\n]+")]
    Space,

    // Anything else that can only be text
    #[regex(r#"[^<>/={}"' \t\r\na-zA-Z_@:#]+"#)]
    Text,
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}
