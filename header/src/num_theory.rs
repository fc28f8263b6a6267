use crate::builder::HeaderBuilder;
use crate::error::{HeaderError, Result};
use crate::literal::{def_int, display_hex, group_digits, uint_macro};
use ntt_math::dft::ntt::Table;
use ntt_math::modulus::barrett::BarrettPrecomp;
use ntt_math::modulus::prime::Prime;
use ntt_math::modulus::prime_generation::find_candidate;
use ntt_math::radix::RadixConfig;
use num_bigint::BigUint;

/// Widths of the single, double and quadruple digit types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digits {
    pub digit_bit: usize,
    pub dbdgt_bit: usize,
    pub qudgt_bit: usize,
}

/// Everything the NTT pipeline derived while filling a header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumTheory {
    pub digits: Digits,
    pub prime: Prime,
    pub table: Table,
    pub barrett: BarrettPrecomp,
    pub radix: RadixConfig,
}

impl NumTheory {
    /// Runs every stage in order, appending each stage's declarations to
    /// the builder before the next stage starts.
    pub fn build(builder: &mut HeaderBuilder, default_digit_bit: usize) -> Result<Self> {
        let digits: Digits = find_digits(builder, default_digit_bit)?;
        let prime: Prime = find_prime(builder, &digits)?;
        let table: Table = find_root_of_unity(builder, &digits, &prime)?;
        find_half(builder, &digits, &table)?;
        let barrett: BarrettPrecomp = find_inverse_prime(builder, &digits, &prime)?;
        let radix: RadixConfig = find_radix(builder, &digits, &prime)?;
        Ok(Self {
            digits,
            prime,
            table,
            barrett,
            radix,
        })
    }
}

/// Declares `DIGIT_BIT`, rejecting a zero width.
pub fn define_digit_bit(builder: &mut HeaderBuilder, default_digit_bit: usize) -> Result<usize> {
    let digit_bit: usize = builder.define("DIGIT_BIT", || Ok(default_digit_bit), false)?;
    if digit_bit == 0 {
        return Err(HeaderError::InvalidOverrideType {
            name: "DIGIT_BIT".to_string(),
            value: Some(digit_bit.to_string()),
            expected: "positive width",
        });
    }
    Ok(digit_bit)
}

fn find_digits(builder: &mut HeaderBuilder, default_digit_bit: usize) -> Result<Digits> {
    let digit_bit: usize = define_digit_bit(builder, default_digit_bit)?;
    let dbdgt_bit: usize = builder.define("DBDGT_BIT", || Ok(2 * digit_bit), true)?;
    let qudgt_bit: usize = builder.define("QUDGT_BIT", || Ok(2 * dbdgt_bit), true)?;
    // MOD_MUL pads two digits into one dbdgt_t before reducing.
    if dbdgt_bit < 2 * digit_bit {
        return Err(ntt_math::Error::Inconsistent(format!(
            "DBDGT_BIT = {dbdgt_bit} cannot hold the product of two {digit_bit}-bit digits"
        ))
        .into());
    }
    builder.info(format!("Digit width: {digit_bit}"));

    builder.writelines([
        String::new(),
        uint_macro(digit_bit),
        uint_macro(dbdgt_bit),
        uint_macro(qudgt_bit),
        String::new(),
        "typedef unsigned _BitInt(DIGIT_BIT) digit_t;".to_string(),
        "typedef unsigned _BitInt(DBDGT_BIT) dbdgt_t;".to_string(),
        "typedef unsigned _BitInt(QUDGT_BIT) qudgt_t;".to_string(),
    ]);

    Ok(Digits {
        digit_bit,
        dbdgt_bit,
        qudgt_bit,
    })
}

fn find_prime(builder: &mut HeaderBuilder, digits: &Digits) -> Result<Prime> {
    let prime: Prime = find_candidate(digits.digit_bit)?;
    builder.info(format!("Using prime: {prime}"));
    builder.info(format!(
        "Prime hex: {}",
        display_hex(prime.q(), digits.digit_bit)?
    ));
    builder.writelines([
        String::new(),
        format!(
            "static digit_t const prime = {};",
            def_int(prime.q(), digits.digit_bit)?
        ),
    ]);
    Ok(prime)
}

fn write_array(
    builder: &mut HeaderBuilder,
    comment: &str,
    name: &str,
    values: &[BigUint],
    digit_bit: usize,
) -> Result<()> {
    builder.writelines([
        String::new(),
        comment.to_string(),
        format!("static digit_t const {name}[] = {{"),
    ]);
    for value in values {
        builder.writeline(format!("  {},", def_int(value, digit_bit)?));
    }
    builder.writeline("};");
    Ok(())
}

fn find_root_of_unity(builder: &mut HeaderBuilder, digits: &Digits, prime: &Prime) -> Result<Table> {
    let table: Table = Table::new(prime)?;
    let bits: usize = digits.digit_bit;
    let log_nth_root: usize = table.log_nth_root();

    builder.info(format!(
        "Using unit generator: {}",
        display_hex(&table.generator, bits)?
    ));
    builder.info(format!(
        "Primitive 2^{log_nth_root}th root of unity: {}",
        display_hex(&table.omega, bits)?
    ));
    write_array(
        builder,
        "// `root_of_unity[k]` is a primitive 2^k-th root of unity",
        "root_of_unity",
        &table.root_of_unity,
        bits,
    )?;

    builder.info(format!(
        "Conjugate 2^{log_nth_root}th root of unity: {}",
        display_hex(&table.omega_inv, bits)?
    ));
    write_array(
        builder,
        "// `conj_of_unity[k]` is the inverse of `root_of_unity[k]`",
        "conj_of_unity",
        &table.conj_of_unity,
        bits,
    )?;

    Ok(table)
}

fn find_half(builder: &mut HeaderBuilder, digits: &Digits, table: &Table) -> Result<()> {
    builder.info(format!(
        "2^-1: {}",
        display_hex(&table.half, digits.digit_bit)?
    ));
    write_array(
        builder,
        "// `powers_of_half[k]` is 2^(-k)",
        "powers_of_half",
        &table.powers_of_half,
        digits.digit_bit,
    )
}

fn find_inverse_prime(
    builder: &mut HeaderBuilder,
    digits: &Digits,
    prime: &Prime,
) -> Result<BarrettPrecomp> {
    let barrett: BarrettPrecomp =
        BarrettPrecomp::new(prime.q(), digits.dbdgt_bit, digits.qudgt_bit)?;
    let mu: BigUint = barrett.mu_emitted();

    let mut steps: Vec<String> = vec![format!(
        "1. Multiplication by {}",
        display_hex(&mu, digits.dbdgt_bit)?
    )];
    if barrett.wide {
        steps.push(format!("2. Right shift by {}", digits.dbdgt_bit));
        steps.push("3. Add original value".to_string());
        steps.push(format!("4. Right shift by {}", barrett.excess_shift()));
    } else {
        steps.push(format!("2. Right shift by {}", barrett.shift));
    }
    builder.info(format!("Division by prime converted to: {}", steps.join("; ")));

    builder.writelines([
        String::new(),
        "// Reciprocal of prime approximation".to_string(),
        format!(
            "static dbdgt_t const prime_mu = {};",
            def_int(&mu, digits.dbdgt_bit)?
        ),
        format!("static unsigned const prime_shift = {};", barrett.shift),
        String::new(),
        "static digit_t".to_string(),
        "mod_prime(dbdgt_t x)".to_string(),
        "{".to_string(),
    ]);
    if barrett.wide {
        builder.writelines([
            "  dbdgt_t prod = ((qudgt_t)x * prime_mu) >> DBDGT_BIT;",
            "  dbdgt_t carry = ((dbdgt_t)__builtin_add_overflow(prod, x, &prod)) << (DBDGT_BIT - (prime_shift - DBDGT_BIT));",
            "  dbdgt_t quot = (prod >> (prime_shift - DBDGT_BIT)) | carry;",
        ]);
    } else {
        builder.writeline("  dbdgt_t quot = ((qudgt_t)x * prime_mu) >> prime_shift;");
    }
    builder.writelines([
        "  return x - prime * quot;",
        "}",
        "",
        "#define PAD(x) ((dbdgt_t)(x))",
        "#define PAD_OP(x, op ,y) (PAD(x) op PAD(y))",
        "#define MOD_OP(x, op, y) mod_prime(PAD_OP(x, op, y))",
        "#define MOD_MUL(x, y) MOD_OP(x, *, y)",
        "#define MOD_ADD(x, y) MOD_OP(x, +, y)",
        "#define MOD_NEG(x) MOD_OP(prime - 1, *, x)",
        "#define MOD_SUB(x, y) MOD_OP(x, +, MOD_NEG(y))",
    ]);

    Ok(barrett)
}

fn find_radix(builder: &mut HeaderBuilder, digits: &Digits, prime: &Prime) -> Result<RadixConfig> {
    builder.writeline("");
    let radix_bit: usize = builder.define(
        "RADIX_BIT",
        || Ok(RadixConfig::default_radix_bit(prime.q())?),
        true,
    )?;
    let radix: RadixConfig = RadixConfig::with_radix_bit(prime.q(), digits.digit_bit, radix_bit)?;
    builder.info(format!("Radix width: {}", radix.radix_bit));

    let soft_max: String = group_digits(&radix.soft_max_fib_index);
    let advisory: String = format!("No promises for Fibonacci numbers with index above {soft_max}");
    builder.warn(advisory.clone());

    builder.writelines([
        "typedef unsigned _BitInt(RADIX_BIT) radix_t;".to_string(),
        String::new(),
        "// sizeof(digit_t) == sizeof(radix_t) << expansion_exp".to_string(),
        format!(
            "static unsigned const expansion_exp = {};",
            radix.expansion_exp
        ),
        String::new(),
        format!("// {advisory}"),
    ]);

    Ok(radix)
}
