//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse template markup into a syntax tree
pub fn parse(input: &str) -> Result<Template, Vec<crate::ParseError>> {
    let len = input.len();

    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Split (Token, SimpleSpan) into token and span parts
    let token_stream =
        Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    template_parser(input)
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

/// Build the template parser.
///
/// Text and interpolation bodies are sliced out of `source` by span, so
/// source spacing survives.
fn template_parser<'a, I>(
    source: &'a str,
) -> impl Parser<'a, I, Template, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let name = select! {
        Token::Name(s) => s,
    };

    let space = just(Token::Space);

    let attr_value = select! {
        Token::Quoted(s) => s,
        Token::Name(s) => s,
    };

    // name, name=value, name="value"
    let attribute = name
        .clone()
        .then(
            space
                .clone()
                .or_not()
                .ignore_then(just(Token::Equals))
                .ignore_then(space.clone().or_not())
                .ignore_then(attr_value)
                .or_not(),
        )
        .map(|(name, value)| Attribute { name, value });

    // <tag attr ...> or <tag attr ... />
    let open_tag = just(Token::TagOpen)
        .ignore_then(name.clone())
        .then(
            space
                .clone()
                .ignore_then(attribute)
                .repeated()
                .collect::<Vec<_>>(),
        )
        .then_ignore(space.clone().or_not())
        .then(choice((
            just(Token::SelfClose).to(true),
            just(Token::TagEnd).to(false),
        )));

    let close_tag = just(Token::CloseTagOpen)
        .ignore_then(name)
        .then_ignore(space.clone().or_not())
        .then_ignore(just(Token::TagEnd));

    // {{ path }}
    let mustache = just(Token::MustacheOpen)
        .ignore_then(
            any()
                .filter(|t: &Token| *t != Token::MustacheClose)
                .repeated()
                .map_with(move |_, e| source[span_range(&e.span())].trim().to_string()),
        )
        .then_ignore(just(Token::MustacheClose))
        .map(Node::Interpolation);

    let text_token = select! {
        Token::Name(_) => (),
        Token::Text => (),
        Token::Space => (),
        Token::Quoted(_) => (),
        Token::Quote => (),
        Token::Equals => (),
        Token::Slash => (),
        Token::SelfClose => (),
        Token::TagEnd => (),
        Token::Brace => (),
        Token::MustacheClose => (),
    };

    let text = text_token
        .repeated()
        .at_least(1)
        .map_with(move |_, e| Node::Text(source[span_range(&e.span())].to_string()));

    let node = recursive(|node| {
        // Self-closing or void element
        let leaf = open_tag.clone().try_map(
            |((tag, attrs), self_closing): ((String, Vec<Attribute>), bool), span| {
                if self_closing || is_void_element(&tag) {
                    Ok(Element {
                        tag,
                        attrs,
                        children: Vec::new(),
                    })
                } else {
                    Err(Rich::custom(span, format!("<{}> needs a closing tag", tag)))
                }
            },
        );

        let container = open_tag
            .clone()
            .then(node.clone().repeated().collect::<Vec<_>>())
            .then(close_tag.clone())
            .try_map(
                |((((tag, attrs), _), children), closing): (
                    (((String, Vec<Attribute>), bool), Vec<Node>),
                    String,
                ),
                 span| {
                    if closing == tag {
                        Ok(Element {
                            tag,
                            attrs,
                            children,
                        })
                    } else {
                        Err(Rich::custom(
                            span,
                            format!("<{}> closed by </{}>", tag, closing),
                        ))
                    }
                },
            );

        // Order matters: leaf before container so void elements never look
        // for a closing tag.
        choice((
            leaf.map(Node::Element),
            container.map(Node::Element),
            mustache.clone(),
            text.clone(),
        ))
        .boxed()
    });

    node.repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(Template::new)
}
