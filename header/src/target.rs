use crate::builder::HeaderBuilder;
use crate::error::{HeaderError, Result};
use crate::num_theory::{NumTheory, define_digit_bit};
use ntt_math::modulus::WordOps;
use std::thread;

/// Digit width used when `DIGIT_BIT` is not defined.
pub const DEFAULT_DIGIT_BIT: usize = 64;

/// The headers this tool knows how to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Target {
    /// Digit type only.
    Naive,
    /// Digit and double-digit types.
    Fast,
    /// Full NTT parameter set.
    Ntt,
    /// NTT parameter set plus thread configuration.
    Nttt,
}

impl Target {
    pub const ALL: [Target; 4] = [Target::Naive, Target::Fast, Target::Ntt, Target::Nttt];

    pub fn name(&self) -> &'static str {
        match self {
            Target::Naive => "naive",
            Target::Fast => "fast",
            Target::Ntt => "ntt",
            Target::Nttt => "nttt",
        }
    }

    /// Appends the declarations of this target to the builder.
    pub fn build(&self, builder: &mut HeaderBuilder) -> Result<()> {
        match self {
            Target::Naive => build_naive(builder),
            Target::Fast => build_fast(builder),
            Target::Ntt => NumTheory::build(builder, DEFAULT_DIGIT_BIT).map(|_| ()),
            Target::Nttt => {
                build_threads(builder)?;
                NumTheory::build(builder, DEFAULT_DIGIT_BIT).map(|_| ())
            }
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn build_naive(builder: &mut HeaderBuilder) -> Result<()> {
    let digit_bit: usize = define_digit_bit(builder, DEFAULT_DIGIT_BIT)?;
    builder.info(format!("Digit width: {digit_bit}"));
    builder.writelines(["", "typedef unsigned _BitInt(DIGIT_BIT) digit_t;"]);
    Ok(())
}

fn build_fast(builder: &mut HeaderBuilder) -> Result<()> {
    let digit_bit: usize = define_digit_bit(builder, DEFAULT_DIGIT_BIT)?;
    builder.define::<usize, _>("DBDGT_BIT", || Ok(2 * digit_bit), true)?;
    builder.info(format!("Digit width: {digit_bit}"));
    builder.writelines([
        "",
        "typedef unsigned _BitInt(DIGIT_BIT) digit_t;",
        "typedef unsigned _BitInt(DBDGT_BIT) dbdgt_t;",
    ]);
    Ok(())
}

fn build_threads(builder: &mut HeaderBuilder) -> Result<()> {
    let available: usize = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let nproc: usize = builder.define("NPROC", || Ok(available), false)?;
    if nproc == 0 {
        return Err(HeaderError::InvalidOverrideType {
            name: "NPROC".to_string(),
            value: Some(nproc.to_string()),
            expected: "positive thread count",
        });
    }
    let nproc_log: usize = builder.define("NPROC_LOG", || Ok(nproc.log2_floor()), true)?;
    builder.info(format!(
        "Configuring for {} thread(s) [{available} available].",
        1usize << nproc_log
    ));
    builder.writeline("");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macros::MacroOverride;

    fn builder(overrides: &[&str]) -> HeaderBuilder {
        HeaderBuilder::new(
            overrides
                .iter()
                .map(|s| s.parse::<MacroOverride>().unwrap()),
        )
    }

    #[test]
    fn naive_declares_digit_type() {
        let mut b: HeaderBuilder = builder(&[]);
        Target::Naive.build(&mut b).unwrap();
        assert_eq!(
            b.lines(),
            ["#define DIGIT_BIT 64", "", "typedef unsigned _BitInt(DIGIT_BIT) digit_t;"]
        );
    }

    #[test]
    fn fast_doubles_digit_width() {
        let mut b: HeaderBuilder = builder(&["DIGIT_BIT=32"]);
        Target::Fast.build(&mut b).unwrap();
        assert_eq!(b.macros().resolved("DBDGT_BIT"), Some("64"));
        assert_eq!(b.infos(), ["Digit width: 32"]);
    }

    #[test]
    fn thread_count_rounds_down_to_power_of_two() {
        let mut b: HeaderBuilder = builder(&["NPROC=6", "DIGIT_BIT=16"]);
        Target::Nttt.build(&mut b).unwrap();
        assert_eq!(b.macros().resolved("NPROC_LOG"), Some("2"));
        assert!(b.infos()[0].starts_with("Configuring for 4 thread(s) ["));
    }

    #[test]
    fn zero_threads_is_rejected() {
        let mut b: HeaderBuilder = builder(&["NPROC=0"]);
        assert!(matches!(
            Target::Nttt.build(&mut b),
            Err(HeaderError::InvalidOverrideType { .. })
        ));
    }

    #[test]
    fn names_round_trip_through_clap() {
        use clap::ValueEnum;
        for target in Target::ALL {
            assert_eq!(Target::from_str(target.name(), false), Ok(target));
        }
    }
}
