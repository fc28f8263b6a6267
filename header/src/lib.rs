//! Header generator for big-integer kernels.
//!
//! Each [`Target`] fills a [`HeaderBuilder`] stage by stage; [`generate`]
//! renders the result in memory and [`install`] moves it into place.

pub mod builder;
pub mod error;
pub mod install;
pub mod literal;
pub mod macros;
pub mod num_theory;
pub mod target;

pub use builder::HeaderBuilder;
pub use error::HeaderError;
pub use install::{Artifact, Failure, generate, install};
pub use macros::{MacroOverride, MacroTable, MacroType};
pub use target::Target;
