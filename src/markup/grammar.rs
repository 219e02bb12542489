//! Markup parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::markup::ast::*;
use crate::markup::lexer::Token;

/// Parse markup source into a syntax tree
pub fn parse(input: &str) -> Result<Markup, Vec<crate::ParseError>> {
    let len = input.len();

    let tokens = crate::markup::lexer::lex(input)?;
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    // Split (Token, SimpleSpan) into token and span parts
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    markup_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn markup_parser<'a, I>() -> impl Parser<'a, I, Markup, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let name = select! {
        Token::Ident(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    let text = select! {
        Token::String(s) => s,
    };

    // Attribute values are stored verbatim; numbers keep their source spelling
    let value = select! {
        Token::String(s) => s,
        Token::Ident(s) => s,
        Token::Number(n) => n,
    };

    let attribute = name
        .clone()
        .then_ignore(just(Token::Colon))
        .then(value)
        .map_with(|(key, value), e| {
            Spanned::new(
                Attribute {
                    key: key.node,
                    value,
                },
                span_range(&e.span()),
            )
        });

    let attribute_block = attribute
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    let node = recursive(|node| {
        let children = node
            .repeated()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::BraceOpen), just(Token::BraceClose));

        let element = name
            .clone()
            .then(just(Token::Hash).ignore_then(name.clone()).or_not())
            .then(
                just(Token::Dot)
                    .ignore_then(name.clone())
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .then(attribute_block.clone().or_not())
            .then(children.or_not())
            .map(
                |((((tag, id), classes), attributes), children)| ElementDecl {
                    tag,
                    id,
                    classes,
                    attributes: attributes.unwrap_or_default(),
                    children: children.unwrap_or_default(),
                },
            );

        choice((element.map(MarkupNode::Element), text.map(MarkupNode::Text)))
            .map_with(|n, e| Spanned::new(n, span_range(&e.span())))
            .boxed()
    });

    node.repeated()
        .collect()
        .then_ignore(end())
        .map(|nodes| Markup { nodes })
}
