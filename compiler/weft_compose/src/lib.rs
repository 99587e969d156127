//! Recomposition lowering for the Weft compiler.
//!
//! This crate rewrites parsed compilation units into their reactive,
//! skip-aware recomposition form: the shape a declarative-UI runtime needs
//! to re-execute only the composable functions whose inputs changed.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Parse → **Recompose** → semantic analysis → printing
//! ```
//!
//! # The Five Passes
//!
//! Run strictly in order over one shared, mutable tree — later passes
//! consume structure the earlier ones create:
//!
//! 1. **Trailing-lambda fixup** (`fixup`): repairs `Column { ... }` call
//!    sugar the front-end parses as an error node followed by a block.
//! 2. **Signature augmentation** (`augment`): appends the implicit
//!    `$composer`/`$changed` parameters to composable declarations.
//! 3. **Group instrumentation** (`group`): brackets closure bodies with
//!    positional replaceable-group markers.
//! 4. **Call-site instrumentation** (`call_site`): appends the composer
//!    reference and the packed change masks to composable calls.
//! 5. **Body recomposition** (`restart`): rebuilds composable bodies
//!    around the skip fast-path and the restart-scope registration.
//!
//! Composability is a pure naming convention: an uppercase-initial,
//! non-constructor function name opts in. No annotations are consulted.
//!
//! The runtime operations the rewrites emit (`startRestartGroup`,
//! `getSkipping`, `updateScope`, ...) are a fixed naming contract with the
//! downstream composition runtime; nothing here defines them.

mod augment;
mod call_site;
mod emit;
mod error;
mod fixup;
mod group;
pub mod key;
pub mod mask;
mod names;
mod pipeline;
mod restart;

pub use augment::SignatureAugmenter;
pub use call_site::CallSiteInstrumenter;
pub use error::PipelineError;
pub use fixup::TrailingLambdaFixup;
pub use group::GroupInstrumenter;
pub use names::WellKnown;
pub use pipeline::{run, RewritePass};
pub use restart::BodyRecomposer;
