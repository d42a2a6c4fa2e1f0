//! Parsers for the two input formats.
//!
//! A routing table line holds a prefix in CIDR notation and an output
//! interface separated by whitespace:
//!
//! ```text
//! 10.1.2.0/24	3
//! ```
//!
//! An input packet line holds a single destination address:
//!
//! ```text
//! 10.1.2.200
//! ```
//!
//! Numbers are only checked for syntax here. Whether a prefix length or
//! interface fits the table is decided when the route is built.

use nom::{
    character::complete::{char, multispace0, space1, u32 as decimal_u32, u8 as decimal_u8},
    combinator::{all_consuming, map},
    error::{context, VerboseError, VerboseErrorKind},
    sequence::{delimited, preceded, tuple},
    IResult,
};
use route_lookup_core::Ipv4Address;

pub type Res<T, U> = IResult<T, U, VerboseError<T>>;

/// A route as written in the routing table, before range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub address: Ipv4Address,
    pub prefix_len: u32,
    pub interface: u32,
}

/// Parses one routing table line. On failure, returns the name of the
/// element that could not be read.
pub fn route_line(line: &str) -> Result<RouteEntry, &'static str> {
    whole_line(line, route_entry)
}

/// Parses one input packet line. On failure, returns the name of the
/// element that could not be read.
pub fn address_line(line: &str) -> Result<Ipv4Address, &'static str> {
    whole_line(line, address)
}

fn whole_line<'a, T>(
    line: &'a str,
    parser: impl FnMut(&'a str) -> Res<&'a str, T>,
) -> Result<T, &'static str> {
    match all_consuming(delimited(multispace0, parser, multispace0))(line) {
        Ok((_, value)) => Ok(value),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(innermost_context(&e)),
        Err(nom::Err::Incomplete(_)) => Err("a complete line"),
    }
}

/// The first context pushed is the innermost one. Without any context the
/// line parsed fine up to some trailing text.
fn innermost_context(e: &VerboseError<&str>) -> &'static str {
    e.errors
        .iter()
        .find_map(|(_, kind)| match kind {
            VerboseErrorKind::Context(name) => Some(*name),
            _ => None,
        })
        .unwrap_or("the end of the line")
}

fn address(s: &str) -> Res<&str, Ipv4Address> {
    context(
        "an IPv4 address",
        map(
            tuple((
                decimal_u8,
                preceded(char('.'), decimal_u8),
                preceded(char('.'), decimal_u8),
                preceded(char('.'), decimal_u8),
            )),
            |(a, b, c, d)| Ipv4Address::new([a, b, c, d]),
        ),
    )(s)
}

fn route_entry(s: &str) -> Res<&str, RouteEntry> {
    map(
        tuple((
            address,
            context("a '/' and prefix length", preceded(char('/'), decimal_u32)),
            context("an interface", preceded(space1, decimal_u32)),
        )),
        |(address, prefix_len, interface)| RouteEntry {
            address,
            prefix_len,
            interface,
        },
    )(s)
}
