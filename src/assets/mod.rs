// src/assets/mod.rs

//! Asset pipeline components.
//!
//! - [`copy`] streams file classes from the source tree into the output tree.
//! - [`styles`] drives the external stylesheet compiler and prefixer and
//!   extracts stylesheet variables into pattern data files.
//! - [`sprite`] drives the external SVG sprite compiler.
//! - [`scripts`] drives the external script bundler/minifier.
//!
//! Every operation here is independently idempotent: re-running it with an
//! unchanged source tree converges to the same output bytes.

pub mod copy;
pub mod scripts;
pub mod sprite;
pub mod styles;

pub use copy::AssetCopier;
pub use scripts::ScriptBundler;
pub use sprite::SpriteBuilder;
pub use styles::StyleTransformer;
