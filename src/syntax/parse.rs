//! Reference JSON reader
//!
//! A strict JSON parser that keeps byte offsets on every node it produces.
//! Spans are computed against the original input by remaining-length
//! arithmetic, so no location state threads through the combinators.

use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_while_m_n};
use nom::character::complete::{char, digit1, multispace0, one_of};
use nom::combinator::{map, opt, recognize, value};
use nom::error::{Error as NomError, ErrorKind};
use nom::multi::separated_list0;
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;

use super::{JsonKind, JsonNode, JsonScalar};
use crate::error::GraphError;

type PResult<'a, T> = IResult<&'a str, T>;

/// Parse a complete JSON document into a span-carrying tree
pub fn parse(text: &str) -> crate::Result<JsonNode> {
    match root(text) {
        Ok((_, node)) => Ok(node),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(GraphError::Syntax {
            offset: text.len() - e.input.len(),
            message: format!(
                "unexpected input near {:?}",
                e.input.chars().take(12).collect::<String>()
            ),
        }),
        Err(nom::Err::Incomplete(_)) => Err(GraphError::Syntax {
            offset: text.len(),
            message: "incomplete document".to_string(),
        }),
    }
}

fn root(input: &str) -> PResult<'_, JsonNode> {
    let original = input;
    let (input, node) = json_value(input, original)?;
    let (input, _) = multispace0(input)?;
    if !input.is_empty() {
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::Eof)));
    }
    Ok((input, node))
}

fn offset_of(original: &str, input: &str) -> usize {
    original.len() - input.len()
}

fn json_value<'a>(input: &'a str, original: &'a str) -> PResult<'a, JsonNode> {
    let (input, _) = multispace0(input)?;
    alt((
        |i| object(i, original),
        |i| array(i, original),
        |i| string_node(i, original),
        |i| number_node(i, original),
        |i| keyword_node(i, original),
    ))(input)
}

fn object<'a>(input: &'a str, original: &'a str) -> PResult<'a, JsonNode> {
    let start = offset_of(original, input);
    let (input, _) = char('{')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, children) = separated_list0(comma, |i| property(i, original))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('}')(input)?;
    let end = offset_of(original, input);
    Ok((
        input,
        JsonNode {
            kind: JsonKind::Object,
            offset: start,
            length: end - start,
            children,
            value: None,
        },
    ))
}

fn array<'a>(input: &'a str, original: &'a str) -> PResult<'a, JsonNode> {
    let start = offset_of(original, input);
    let (input, _) = char('[')(input)?;
    let (input, children) = separated_list0(comma, |i| json_value(i, original))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(']')(input)?;
    let end = offset_of(original, input);
    Ok((
        input,
        JsonNode {
            kind: JsonKind::Array,
            offset: start,
            length: end - start,
            children,
            value: None,
        },
    ))
}

/// A member spans from the first character of its name to the last
/// character of its value.
fn property<'a>(input: &'a str, original: &'a str) -> PResult<'a, JsonNode> {
    let (input, _) = multispace0(input)?;
    let start = offset_of(original, input);
    let (input, name) = string_node(input, original)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(':')(input)?;
    let (input, member_value) = json_value(input, original)?;
    let end = offset_of(original, input);
    Ok((
        input,
        JsonNode {
            kind: JsonKind::Property,
            offset: start,
            length: end - start,
            children: vec![name, member_value],
            value: None,
        },
    ))
}

fn comma(input: &str) -> PResult<'_, char> {
    preceded(multispace0, char(','))(input)
}

fn string_node<'a>(input: &'a str, original: &'a str) -> PResult<'a, JsonNode> {
    let start = offset_of(original, input);
    let (input, text) = string_literal(input)?;
    let end = offset_of(original, input);
    Ok((
        input,
        JsonNode {
            kind: JsonKind::String,
            offset: start,
            length: end - start,
            children: Vec::new(),
            value: Some(JsonScalar::String(text)),
        },
    ))
}

fn string_literal(input: &str) -> PResult<'_, String> {
    delimited(
        char('"'),
        map(
            opt(nom::bytes::complete::escaped_transform(
                is_not("\"\\"),
                '\\',
                escape_char,
            )),
            |text: Option<String>| text.unwrap_or_default(),
        ),
        char('"'),
    )(input)
}

fn escape_char(input: &str) -> PResult<'_, char> {
    alt((
        value('"', char('"')),
        value('\\', char('\\')),
        value('/', char('/')),
        value('\u{0008}', char('b')),
        value('\u{000C}', char('f')),
        value('\n', char('n')),
        value('\r', char('r')),
        value('\t', char('t')),
        unicode_escape,
    ))(input)
}

fn unicode_escape(input: &str) -> PResult<'_, char> {
    let (input, _) = char('u')(input)?;
    let (input, digits) = take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit())(input)?;
    // four hex digits always fit in u32; unpaired surrogates degrade to the
    // replacement character
    let code = u32::from_str_radix(digits, 16).unwrap_or(0xFFFD);
    Ok((input, char::from_u32(code).unwrap_or('\u{FFFD}')))
}

fn number_node<'a>(input: &'a str, original: &'a str) -> PResult<'a, JsonNode> {
    let start = offset_of(original, input);
    let (input, text) = recognize(tuple((
        opt(char('-')),
        digit1,
        opt(preceded(char('.'), digit1)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)?;
    let end = offset_of(original, input);
    Ok((
        input,
        JsonNode {
            kind: JsonKind::Number,
            offset: start,
            length: end - start,
            children: Vec::new(),
            value: Some(JsonScalar::Number(text.parse().unwrap_or(f64::NAN))),
        },
    ))
}

fn keyword_node<'a>(input: &'a str, original: &'a str) -> PResult<'a, JsonNode> {
    let start = offset_of(original, input);
    let (input, scalar) = alt((
        value(JsonScalar::Bool(true), tag("true")),
        value(JsonScalar::Bool(false), tag("false")),
        value(JsonScalar::Null, tag("null")),
    ))(input)?;
    let end = offset_of(original, input);
    let kind = match scalar {
        JsonScalar::Bool(_) => JsonKind::Boolean,
        _ => JsonKind::Null,
    };
    Ok((
        input,
        JsonNode {
            kind,
            offset: start,
            length: end - start,
            children: Vec::new(),
            value: Some(scalar),
        },
    ))
}
