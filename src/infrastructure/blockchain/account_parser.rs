//! Move struct tag parsing (`0xaddr::module::Name<T1, T2>`)

use std::fmt;
use std::str::FromStr;

use crate::shared::errors::ParseError;

/// A parsed Move struct tag. Type arguments are kept as raw strings and may
/// themselves be generic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructTag {
    pub address: String,
    pub module: String,
    pub name: String,
    pub type_args: Vec<String>,
}

impl StructTag {
    /// `address::module::Name` without type arguments
    pub fn base(&self) -> String {
        format!("{}::{}::{}", self.address, self.module, self.name)
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base())?;
        if !self.type_args.is_empty() {
            write!(f, "<{}>", self.type_args.join(", "))?;
        }
        Ok(())
    }
}

impl FromStr for StructTag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();

        let (head, type_args) = match tag.find('<') {
            Some(open) => (&tag[..open], split_type_args(tag, open)?),
            None => {
                if tag.contains('>') {
                    return Err(ParseError::type_tag(tag, "unbalanced '>'"));
                }
                (tag, Vec::new())
            }
        };

        let parts: Vec<&str> = head.split("::").map(str::trim).collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(ParseError::type_tag(tag, "expected address::module::Name"));
        }

        Ok(StructTag {
            address: parts[0].to_string(),
            module: parts[1].to_string(),
            name: parts[2].to_string(),
            type_args,
        })
    }
}

/// Split the top-level type arguments of `tag`, whose list opens at byte `open`.
fn split_type_args(tag: &str, open: usize) -> Result<Vec<String>, ParseError> {
    let mut depth = 0usize;
    let mut args = Vec::new();
    let mut start = open + 1;

    for (i, c) in tag.char_indices().skip_while(|(i, _)| *i < open) {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| ParseError::type_tag(tag, "unbalanced '>'"))?;
                if depth == 0 {
                    if i != tag.len() - 1 {
                        return Err(ParseError::type_tag(tag, "trailing characters after type arguments"));
                    }
                    args.push(tag[start..i].trim().to_string());
                }
            }
            ',' if depth == 1 => {
                args.push(tag[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ParseError::type_tag(tag, "unbalanced '<'"));
    }
    if args.iter().any(String::is_empty) {
        return Err(ParseError::type_tag(tag, "empty type argument"));
    }
    Ok(args)
}

/// Extract the two coin types of a pair resource such as
/// `swap::TokenPairReserve<X, Y>`, in declaration order.
pub fn extract_type_args(tag: &str) -> Result<(String, String), ParseError> {
    let parsed: StructTag = tag.parse()?;
    match <[String; 2]>::try_from(parsed.type_args) {
        Ok([x, y]) => Ok((x, y)),
        Err(args) => Err(ParseError::type_tag(
            tag,
            format!("expected 2 type arguments, found {}", args.len()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANCAKE: &str = "0xc7efb4076dbe143cbcd98cfaaa929ecfc8f299203dfff63b95ccb6bfe19850fa";

    #[test]
    fn test_extract_pair() {
        let tag = format!(
            "{PANCAKE}::swap::TokenPairReserve<0x1::aptos_coin::AptosCoin, 0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::USDC>"
        );

        let (x, y) = extract_type_args(&tag).unwrap();
        assert_eq!(x, "0x1::aptos_coin::AptosCoin");
        assert_eq!(y, "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::USDC");
    }

    #[test]
    fn test_nested_generics() {
        let tag = format!("{PANCAKE}::swap::TokenPairReserve<0x5::lp::LP<0x1::a::A, 0x1::b::B>,0x1::c::C>");

        let (x, y) = extract_type_args(&tag).unwrap();
        assert_eq!(x, "0x5::lp::LP<0x1::a::A, 0x1::b::B>");
        assert_eq!(y, "0x1::c::C");
    }

    #[test]
    fn test_struct_tag_round_trips_display() {
        let parsed: StructTag = "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>".parse().unwrap();

        assert_eq!(parsed.address, "0x1");
        assert_eq!(parsed.module, "coin");
        assert_eq!(parsed.name, "CoinStore");
        assert_eq!(parsed.base(), "0x1::coin::CoinStore");
        assert_eq!(parsed.to_string(), "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>");
    }

    #[test]
    fn test_wrong_arity() {
        let err = extract_type_args("0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>").unwrap_err();
        assert!(matches!(err, ParseError::TypeTag { ref reason, .. } if reason.contains("found 1")));

        let err = extract_type_args("0x1::swap::Triple<0x1::a::A, 0x1::b::B, 0x1::c::C>").unwrap_err();
        assert!(matches!(err, ParseError::TypeTag { ref reason, .. } if reason.contains("found 3")));

        assert!(extract_type_args("0x1::swap::TokenPairReserve").is_err());
    }

    #[test]
    fn test_malformed_tags() {
        for tag in [
            "0x1::swap::TokenPairReserve<0x1::a::A, 0x1::b::B",
            "0x1::swap::TokenPairReserve<0x1::a::A, 0x1::b::B>>",
            "0x1::swap::TokenPairReserve<0x1::a::A, 0x1::b::B>junk",
            "0x1::swap::TokenPairReserve<0x1::a::A, >",
            "0x1::swap::TokenPairReserve<>",
            "swap::TokenPairReserve<0x1::a::A, 0x1::b::B>",
            "0x1::swap::>",
        ] {
            assert!(
                matches!(tag.parse::<StructTag>(), Err(ParseError::TypeTag { .. })),
                "{tag} should not parse"
            );
        }
    }
}
