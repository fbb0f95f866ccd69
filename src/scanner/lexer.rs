//! Lexer for template text using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // Numbered placeholder, e.g. {{1}}
    #[regex(r"\{\{[0-9]+\}\}", |lex| {
        let s = lex.slice();
        s[2..s.len() - 2].parse::<u32>().ok()
    })]
    Variable(u32),

    // Inline format delimiters (longer patterns first)
    #[token("```")]
    Fence,
    #[token("*")]
    Star,
    #[token("_")]
    Underscore,
    #[token("~")]
    Tilde,

    // Spans never cross a line break
    #[token("\n")]
    Newline,

    // Lone braces and backticks that do not start a token above
    #[regex(r"[{`]")]
    Stray,

    #[regex(r"[^*_~`{\n]+")]
    Text,
}

/// Lex input string into tokens with spans
///
/// Anything the lexer rejects (a placeholder whose number does not fit in
/// a `u32`) comes back as plain text so callers never lose input.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Text), span))
}
