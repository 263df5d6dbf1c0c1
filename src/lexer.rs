use crate::diagnostic::{Diagnostic, Label, Span};
use crate::token::Token;
use chumsky::prelude::*;
use std::fmt;

/// A token together with the byte range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// A character the lexer has no rule for.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub character: Option<char>,
    pub position: usize,
}

impl LexError {
    pub fn span(&self) -> Span {
        Span::point(self.position)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.character {
            Some(_) => "not recognised by the lexer",
            None => "",
        };
        let mut diag = Diagnostic::error(self.to_string())
            .with_code("E0001")
            .with_label(Label::primary(self.span(), label));
        if let Some(help) = self.help() {
            diag = diag.with_help(help);
        }
        diag
    }

    pub fn help(&self) -> Option<&'static str> {
        match self.character {
            Some('&') | Some('|') => Some("logical operators are written `&&` and `||`"),
            _ => None,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.character {
            Some(c) => write!(f, "unrecognized character `{}` at offset {}", c, self.position),
            None => write!(f, "unexpected end of input at offset {}", self.position),
        }
    }
}

impl std::error::Error for LexError {}

/// Raw lexer over source text.
///
/// Every character is consumed: anything without a rule comes back as
/// `Err(char)` so the caller can report the exact offending position.
pub fn lexer<'a>(
) -> impl Parser<'a, &'a str, Vec<(Result<Token, char>, SimpleSpan)>, extra::Err<Simple<'a, char>>> {
    // A digit followed by any run of digits and dots; `1.2.3` is one literal.
    let number = text::digits(10)
        .then(one_of("0123456789.").repeated())
        .to_slice()
        .map(|s: &str| Token::Number(s.to_string()));

    // No escapes. A missing closing quote runs the string to end of input.
    let double_quoted = just('"')
        .ignore_then(none_of("\"").repeated().to_slice())
        .then_ignore(just('"').ignored().or(end()));
    let single_quoted = just('\'')
        .ignore_then(none_of("'").repeated().to_slice())
        .then_ignore(just('\'').ignored().or(end()));
    let string = double_quoted
        .or(single_quoted)
        .map(|s: &str| Token::String(s.to_string()));

    let word = any()
        .filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
                .repeated(),
        )
        .to_slice()
        .map(Token::from_word);

    let op_multi = choice((
        just("===").to(Token::StrictEq),
        just("!==").to(Token::StrictNotEq),
        just("==").to(Token::Eq),
        just("!=").to(Token::NotEq),
        just("<=").to(Token::LessEq),
        just(">=").to(Token::GreaterEq),
        just("&&").to(Token::And),
        just("||").to(Token::Or),
        just("...").to(Token::Spread),
    ));

    let op_single = choice((
        just('+').to(Token::Plus),
        just('-').to(Token::Minus),
        just('*').to(Token::Star),
        just('/').to(Token::Slash),
        just('%').to(Token::Percent),
        just('<').to(Token::Less),
        just('>').to(Token::Greater),
        just('!').to(Token::Bang),
        just('=').to(Token::Assign),
        just('?').to(Token::Question),
    ));

    let punct = choice((
        just(',').to(Token::Comma),
        just(':').to(Token::Colon),
        just(';').to(Token::Semicolon),
        just('.').to(Token::Dot),
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('{').to(Token::LBrace),
        just('}').to(Token::RBrace),
        just('[').to(Token::LBracket),
        just(']').to(Token::RBracket),
    ));

    let token = number
        .or(string)
        .or(word)
        .or(op_multi)
        .or(op_single)
        .or(punct)
        .map(Ok)
        .or(any().map(Err))
        .map_with(|tok, e| (tok, e.span()))
        .padded();

    token.repeated().collect().padded().then_ignore(end())
}

/// Lexes `source`, keeping each token's byte range. The last token is always [`Token::Eof`].
pub fn tokenize_spanned(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let raw = lexer().parse(source).into_result().map_err(|errors| {
        let position = errors
            .first()
            .map(|err| err.span().start)
            .unwrap_or(source.len());
        LexError {
            character: source[position.min(source.len())..].chars().next(),
            position,
        }
    })?;

    let mut tokens = Vec::with_capacity(raw.len() + 1);
    for (lexed, span) in raw {
        match lexed {
            Ok(token) => {
                if let Token::Number(text) = &token {
                    if text.matches('.').count() > 1 {
                        tracing::debug!(literal = %text, offset = span.start, "numeric literal has more than one dot");
                    }
                }
                tokens.push(SpannedToken {
                    token,
                    span: Span::new(span.start, span.end),
                });
            }
            Err(c) => {
                return Err(LexError {
                    character: Some(c),
                    position: span.start,
                })
            }
        }
    }
    tokens.push(SpannedToken {
        token: Token::Eof,
        span: Span::new(source.len(), source.len()),
    });

    tracing::trace!(count = tokens.len(), "lexed source");
    Ok(tokens)
}

/// Lexes `source` into a flat token list ending in [`Token::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Ok(tokenize_spanned(source)?
        .into_iter()
        .map(|st| st.token)
        .collect())
}

/// Value of a numeric literal: the longest valid decimal prefix of its text,
/// so `1.2.3` reads as `1.2`.
pub fn numeric_value(text: &str) -> f64 {
    let mut end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if text[end..].starts_with('.') {
        let fraction = text[end + 1..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len() - end - 1);
        if fraction > 0 {
            end += 1 + fraction;
        }
    }
    text[..end].parse().unwrap_or(f64::NAN)
}
