/*!
# Custom Assembly of XeGPU Attribute Dictionaries

Prints and parses the optional attribute dictionary of the memory ops:

```mlir
{packed = 0, transpose = array<i64: 1, 0>, l1_hint = #xegpu.cache_hint<cached>}
```

- lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/Dialect/XeGPU/IR/XeGPUOps.cpp>
*/

use thiserror::Error;

use crate::dialect::xegpu::ir::{
    enums::{CacheHints, CachePolicy},
    operations::LoadAttributes
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AsmError {
    #[error("expected {0}")]
    Expected(&'static str),
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),
    #[error("invalid value `{value}` for attribute `{name}`")]
    InvalidValue {
        name: String,
        value: String
    },
    #[error("attribute `{0}` is given more than once")]
    Duplicate(String)
}

/// Print the attribute dictionary with a leading space, or nothing when no attribute is set.
pub fn print_attr_dict(packed: Option<usize>, transpose: Option<&[i64]>, hints: &CacheHints) -> String {
    let mut entries = Vec::new();
    if let Some(axis) = packed {
        entries.push(format!("packed = {}", axis));
    }
    match transpose {
        Some([]) => entries.push("transpose = array<i64>".to_string()),
        Some(permutation) => {
            let permutation = permutation
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            entries.push(format!("transpose = array<i64: {}>", permutation));
        }
        None => {}
    }
    entries.extend(hints.present().map(|(name, policy)| format!("{} = {:#}", name, policy)));
    if entries.is_empty() {
        String::new()
    } else {
        format!(" {{{}}}", entries.join(", "))
    }
}

/// Parse the attribute dictionary of `xegpu.load_nd`. An empty input yields the default attributes.
pub fn parse_attr_dict(input: &str) -> Result<LoadAttributes, AsmError> {
    let mut attributes = LoadAttributes::default();
    for (name, value) in entries(input)? {
        match name {
            "packed" => {
                if attributes.packed.is_some() {
                    return Err(AsmError::Duplicate(name.into()));
                }
                let axis = value.parse().map_err(|_| invalid(name, value))?;
                attributes.packed = Some(axis);
            }
            "transpose" => {
                if attributes.transpose.is_some() {
                    return Err(AsmError::Duplicate(name.into()));
                }
                attributes.transpose = Some(parse_dense_i64_array(name, value)?);
            }
            _ => set_hint(&mut attributes.hints, name, value)?
        }
    }
    Ok(attributes)
}

/// Parse the attribute dictionary of `xegpu.prefetch_nd` and `xegpu.store_nd`, which carry cache hints only.
pub fn parse_cache_hints(input: &str) -> Result<CacheHints, AsmError> {
    let mut hints = CacheHints::default();
    for (name, value) in entries(input)? {
        set_hint(&mut hints, name, value)?;
    }
    Ok(hints)
}

fn invalid(name: &str, value: &str) -> AsmError {
    AsmError::InvalidValue { name: name.into(), value: value.into() }
}

fn set_hint(hints: &mut CacheHints, name: &str, value: &str) -> Result<(), AsmError> {
    if !CacheHints::ATTR_NAMES.contains(&name) {
        return Err(AsmError::UnknownAttribute(name.into()));
    }
    if hints.present().any(|(present, _)| present == name) {
        return Err(AsmError::Duplicate(name.into()));
    }
    let policy = value
        .parse::<CachePolicy>()
        .map_err(|_| invalid(name, value))?;
    hints.set(name, policy);
    Ok(())
}

/// `array<i64: 1, 0>`
fn parse_dense_i64_array(name: &str, value: &str) -> Result<Vec<i64>, AsmError> {
    let body = value
        .strip_prefix("array<i64")
        .and_then(|rest| rest.strip_suffix('>'))
        .ok_or_else(|| invalid(name, value))?;
    let body = match body.trim_start().strip_prefix(':') {
        Some(body) => body,
        None if body.trim().is_empty() => return Ok(Vec::new()),
        None => return Err(invalid(name, value))
    };
    body.split(',')
        .map(|element| element.trim().parse().map_err(|_| invalid(name, value)))
        .collect()
}

/// Split `{a = x, b = y}` into trimmed `(name, value)` pairs.
fn entries(input: &str) -> Result<Vec<(&str, &str)>, AsmError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let body = input
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or(AsmError::Expected("attribute dictionary in braces"))?;
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(body)?
        .into_iter()
        .map(|entry| {
            let (name, value) = entry
                .split_once('=')
                .ok_or(AsmError::Expected("`name = value`"))?;
            let (name, value) = (name.trim(), value.trim());
            if name.is_empty() || value.is_empty() {
                return Err(AsmError::Expected("`name = value`"));
            }
            Ok((name, value))
        })
        .collect()
}

/// Split on commas outside of `<...>`, so `array<i64: 1, 0>` stays whole.
fn split_top_level(body: &str) -> Result<Vec<&str>, AsmError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, c) in body.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(AsmError::Expected("balanced angle brackets"))?
            }
            ',' if depth == 0 => {
                parts.push(&body[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(AsmError::Expected("balanced angle brackets"));
    }
    parts.push(&body[start..]);
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dictionary_prints_nothing() {
        assert_eq!(print_attr_dict(None, None, &CacheHints::default()), "");
        assert_eq!(parse_attr_dict(""), Ok(LoadAttributes::default()));
        assert_eq!(parse_attr_dict("{}"), Ok(LoadAttributes::default()));
    }

    #[test]
    fn load_attributes_round_trip() {
        let attributes = LoadAttributes::transpose([1, 0])
            .with_hints(CacheHints::default().with_l1(CachePolicy::Cached).with_l3(CachePolicy::Streaming));
        let printed = print_attr_dict(None, attributes.transpose.as_deref(), &attributes.hints);
        assert_eq!(
            printed,
            " {transpose = array<i64: 1, 0>, l1_hint = #xegpu.cache_hint<cached>, l3_hint = #xegpu.cache_hint<streaming>}"
        );
        assert_eq!(parse_attr_dict(&printed), Ok(attributes));

        let packed = LoadAttributes::packed(1);
        assert_eq!(
            parse_attr_dict(&print_attr_dict(packed.packed, None, &packed.hints)),
            Ok(packed)
        );
    }

    #[test]
    fn empty_transpose_round_trips() {
        let attributes = LoadAttributes::transpose(Vec::new());
        let printed = print_attr_dict(None, attributes.transpose.as_deref(), &attributes.hints);
        assert_eq!(printed, " {transpose = array<i64>}");
        assert_eq!(parse_attr_dict(&printed), Ok(attributes));
    }

    #[test]
    fn hints_accept_bare_keywords() {
        assert_eq!(
            parse_cache_hints("{l2_hint = write_back}"),
            Ok(CacheHints::default().with_l2(CachePolicy::WriteBack))
        );
    }

    #[test]
    fn malformed_dictionaries_are_rejected() {
        assert_eq!(
            parse_attr_dict("{packed = x}"),
            Err(AsmError::InvalidValue { name: "packed".into(), value: "x".into() })
        );
        assert_eq!(
            parse_attr_dict("{packed = 0, packed = 1}"),
            Err(AsmError::Duplicate("packed".into()))
        );
        assert_eq!(
            parse_cache_hints("{packed = 0}"),
            Err(AsmError::UnknownAttribute("packed".into()))
        );
        assert_eq!(
            parse_cache_hints("{l1_hint = cached, l1_hint = uncached}"),
            Err(AsmError::Duplicate("l1_hint".into()))
        );
        assert!(parse_attr_dict("packed = 0").is_err());
        assert!(parse_attr_dict("{transpose = array<i64: 1, 0}").is_err());
        assert!(parse_attr_dict("{l1_hint = #xegpu.cache_hint<hot>}").is_err());
    }
}
