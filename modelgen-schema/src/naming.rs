//! Identifier normalization for generated model names
//!
//! SQL identifiers are snake case; generated Go identifiers are exported
//! camel case with a few acronyms kept upper case.

/// Acronym substitutions, tried in this order at every position
const ACRONYMS: &[(&str, &str)] = &[
    ("Id", "ID"),
    ("Uuid", "UUID"),
    ("Url", "URL"),
    ("Html", "HTML"),
];

/// Convert a snake-case SQL identifier into a model identifier
///
/// The first character and the first character after each run of
/// underscores are upper-cased, underscores are dropped, and everything else
/// passes through. Acronyms are then fixed up by plain substring
/// replacement, so `identity` becomes `IDentity`: generated code already
/// depends on these exact names.
///
/// Leading and doubled underscores vanish too, so distinct identifiers can
/// collide: `a__b` and `a_b` both become `AB`, `_private` and `private` both
/// become `Private`.
pub fn normalize(identifier: &str) -> String {
    replace_acronyms(&upper_camel(identifier))
}

fn upper_camel(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    let mut upper_next = true;

    for ch in identifier.chars() {
        if ch == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }

    out
}

/// Single left-to-right pass; replaced text is not scanned again
fn replace_acronyms(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    'scan: while let Some(ch) = rest.chars().next() {
        for (from, to) in ACRONYMS {
            if let Some(tail) = rest.strip_prefix(from) {
                out.push_str(to);
                rest = tail;
                continue 'scan;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}
