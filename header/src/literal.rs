use crate::error::{HeaderError, Result};
use itertools::Itertools;
use ntt_math::modulus::WordOps;
use num_bigint::BigUint;

/// Width of the words an integer literal is split into.
pub const WORD_BIT: usize = 64;

/// Number of words needed for a bit_len-bit literal, at least one.
pub fn word_count(bit_len: usize) -> usize {
    bit_len.div_ceil(WORD_BIT).max(1)
}

/// The 64-bit words of x, most significant first, padded to the word count
/// of a bit_len-bit value.
pub fn split_words(x: &BigUint, bit_len: usize) -> Result<Vec<u64>> {
    if x.bit_len() > bit_len {
        return Err(HeaderError::LiteralOverflow {
            value: x.clone(),
            bits: bit_len,
        });
    }
    let mut words: Vec<u64> = x.to_u64_digits();
    words.resize(word_count(bit_len), 0);
    words.reverse();
    Ok(words)
}

fn hex_words(x: &BigUint, bit_len: usize) -> Result<Vec<String>> {
    Ok(split_words(x, bit_len)?
        .into_iter()
        .map(|word| format!("0x{word:016x}"))
        .collect())
}

/// Fixed-width hex such as `0x0000000000000001_0000000000000000`.
pub fn display_hex(x: &BigUint, bit_len: usize) -> Result<String> {
    let words: Vec<u64> = split_words(x, bit_len)?;
    Ok(format!(
        "0x{}",
        words.iter().map(|word| format!("{word:016x}")).join("_")
    ))
}

/// C expression for x built with the matching `UINT{bit_len}` macro.
pub fn def_int(x: &BigUint, bit_len: usize) -> Result<String> {
    Ok(format!(
        "UINT{bit_len}({})",
        hex_words(x, bit_len)?.join(", ")
    ))
}

/// `#define UINT{bit_len}(x_n, ..., x0)` assembling a bit_len-bit integer from
/// 64-bit words, most significant first.
pub fn uint_macro(bit_len: usize) -> String {
    let count: usize = word_count(bit_len);
    let args: String = (0..count).rev().map(|i| format!("x{i}")).join(", ");
    let body: String = (0..count)
        .rev()
        .map(|i| {
            format!(
                "((unsigned _BitInt({bit_len}))(x{i}) << {})",
                i * WORD_BIT
            )
        })
        .join(" | ");
    format!("#define UINT{bit_len}({args}) {body}")
}

/// Decimal rendering with `_` between groups of three digits.
pub fn group_digits(x: &BigUint) -> String {
    let digits: String = x.to_string();
    let head: usize = match digits.len() % 3 {
        0 => 3,
        r => r,
    };
    let (first, rest) = digits.split_at(head);
    std::iter::once(first)
        .chain(rest.as_bytes().chunks(3).filter_map(|c| std::str::from_utf8(c).ok()))
        .join("_")
}
