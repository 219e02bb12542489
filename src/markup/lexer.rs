//! Lexer for the view markup language using logos

use logos::Logos;

use crate::error::ParseError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Element decorations
    #[token("#")]
    Hash,
    #[token(".")]
    Dot,

    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    // Tag, id, class and attribute names may contain dashes (answer-box, data-template)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    String(String),

    #[regex(r"-?[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    BlockComment,
}

/// Strip the surrounding quotes and resolve backslash escapes
fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Lex input string into tokens with spans
///
/// Every unrecognized character is reported; no partial token list is returned.
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, Vec<ParseError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for (tok, span) in Token::lexer(input).spanned() {
        match tok {
            Ok(tok) => tokens.push((tok, span)),
            Err(()) => errors.push(ParseError::Syntax {
                message: format!("unexpected character '{}'", &input[span.clone()]),
                span,
                expected: Vec::new(),
            }),
        }
    }
    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        lex(input)
            .expect("Should lex")
            .into_iter()
            .map(|(t, _)| t)
            .collect()
    }

    #[test]
    fn test_element_decorations() {
        let tokens = kinds("div #answer-box .template");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("div".to_string()),
                Token::Hash,
                Token::Ident("answer-box".to_string()),
                Token::Dot,
                Token::Ident("template".to_string()),
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        let tokens = kinds(r#""say \"hi\"\n""#);
        assert_eq!(tokens, vec![Token::String("say \"hi\"\n".to_string())]);
    }

    #[test]
    fn test_attribute_block() {
        let tokens = kinds("[tabindex: -1, data-template: move]");
        assert_eq!(
            tokens,
            vec![
                Token::BracketOpen,
                Token::Ident("tabindex".to_string()),
                Token::Colon,
                Token::Number("-1".to_string()),
                Token::Comma,
                Token::Ident("data-template".to_string()),
                Token::Colon,
                Token::Ident("move".to_string()),
                Token::BracketClose,
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        let tokens = kinds("div // comment\n/* block */ span");
        assert_eq!(
            tokens,
            vec![Token::Ident("div".to_string()), Token::Ident("span".to_string())]
        );
    }

    #[test]
    fn test_unknown_character_is_an_error() {
        let errors = lex("div @ span").expect_err("Should fail");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span(), &(4..5));
        assert!(errors[0].to_string().contains("'@'"));
    }
}
