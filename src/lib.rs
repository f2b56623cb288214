//! # mightymath
//!
//! Compiles a compact, typable plain-text notation for mathematics into MathML.
//!
//! The pipeline is:
//!
//!   raw text → brace-annotation preprocessing → lexing + parsing (text → tree)
//!            → layout passes (tree → tree, in place) → markup serializer (tree → text)
//!
//! Each stage lives in its own module under [`math`] and can be run on its own; the
//! [`compile`] entry point runs them all.
//!
//! For example `a^2 + b^2` compiles to
//! `<math display="inline"><mrow><msup>…</msup><mo>+</mo><msup>…</msup></mrow></math>`.

pub mod math;

pub use math::config::{load_defaults, Loader, MightyMathConfig};
pub use math::error::MightyMathError;
pub use math::{compile, compile_tree, compile_with, CompileOptions, DisplayMode};
