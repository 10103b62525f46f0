//! Parser for type spellings such as `Int?`, `[String: Int]` or `(inout Int) -> Void`.
//!
//! Hosts whose parser hands over types as raw text, and tests building trees
//! by hand, go through [`parse_type`] or `str::parse::<TypeRef>()`.

use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map, opt, recognize},
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use crate::ast::Effects;
use crate::errors::TypeSyntaxError;
use crate::types::TypeRef;

/// Parse a complete type spelling.
pub fn parse_type(input: &str) -> Result<TypeRef, TypeSyntaxError> {
    all_consuming(delimited(multispace0, type_ref, multispace0))(input)
        .map(|(_, ty)| ty)
        .map_err(|e| TypeSyntaxError {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

impl FromStr for TypeRef {
    type Err = TypeSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s)
    }
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse an identifier (letter or underscore, then alphanumerics/underscores).
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

/// `Outer.Inner`
fn qualified_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(identifier, many0(pair(char('.'), identifier))))(input)
}

fn named(input: &str) -> IResult<&str, TypeRef> {
    map(
        pair(
            qualified_name,
            opt(delimited(
                ws(char('<')),
                separated_list1(ws(char(',')), type_ref),
                ws(char('>')),
            )),
        ),
        |(name, generics)| TypeRef::Named {
            name: name.to_string(),
            generics: generics.unwrap_or_default(),
        },
    )(input)
}

/// `[T]` or `[K: V]`
fn collection(input: &str) -> IResult<&str, TypeRef> {
    map(
        delimited(
            ws(char('[')),
            pair(type_ref, opt(preceded(ws(char(':')), type_ref))),
            ws(char(']')),
        ),
        |(first, value)| match value {
            Some(value) => TypeRef::Dictionary {
                key: Box::new(first),
                value: Box::new(value),
            },
            None => TypeRef::Array(Box::new(first)),
        },
    )(input)
}

/// `async`, `throws` or both, in that order.
fn effects(input: &str) -> IResult<&str, Effects> {
    map(
        pair(opt(ws(tag("async"))), opt(ws(tag("throws")))),
        |(is_async, throws)| Effects {
            is_async: is_async.is_some(),
            throws: throws.is_some(),
            rethrows: false,
        },
    )(input)
}

/// `(A, B)`, `(A) async throws -> R`, or a parenthesized type.
fn parenthesized(input: &str) -> IResult<&str, TypeRef> {
    map(
        pair(
            delimited(
                ws(char('(')),
                separated_list0(ws(char(',')), type_ref),
                ws(char(')')),
            ),
            opt(pair(effects, preceded(ws(tag("->")), type_ref))),
        ),
        |(mut elements, signature): (Vec<TypeRef>, Option<(Effects, TypeRef)>)| match signature {
            Some((effects, ret)) => TypeRef::Function {
                params: elements,
                effects,
                ret: Box::new(ret),
            },
            None if elements.len() == 1 => elements.remove(0),
            None => TypeRef::Tuple(elements),
        },
    )(input)
}

fn postfix(input: &str) -> IResult<&str, TypeRef> {
    map(
        pair(alt((collection, parenthesized, named)), many0(ws(char('?')))),
        |(base, marks)| {
            marks
                .into_iter()
                .fold(base, |ty, _| TypeRef::Optional(Box::new(ty)))
        },
    )(input)
}

fn type_ref(input: &str) -> IResult<&str, TypeRef> {
    let (input, _) = multispace0(input)?;
    alt((
        map(preceded(terminated(tag("inout"), multispace1), type_ref), |t| {
            TypeRef::InOut(Box::new(t))
        }),
        map(preceded(ws(tag("@escaping")), type_ref), |t| {
            TypeRef::Escaping(Box::new(t))
        }),
        map(preceded(terminated(tag("any"), multispace1), type_ref), |t| {
            TypeRef::Existential(Box::new(t))
        }),
        postfix,
    ))(input)
}
