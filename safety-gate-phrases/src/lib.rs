//! Legal phrase library and front-matter builder for safety-gate.
//!
//! - [`PhraseLibrary`] - canonical boilerplate keyed by court style, filing
//!   type and [`PhraseKey`], with default-then-override resolution
//! - [`PhraseError`] - failures while layering overrides from TOML
//! - [`FrontMatterBuilder`] - methodology and disclaimer blocks for a
//!   distribution mode or a specific risk decision
//!
//! ## Example
//!
//! ```
//! use safety_gate::DistributionMode;
//! use safety_gate_phrases::{FrontMatterBuilder, FrontMatterRequest};
//!
//! let request = FrontMatterRequest::new(DistributionMode::ControlledLegal, "Case 7").with_counts(12, 4);
//! let front = FrontMatterBuilder::default().build(&request);
//! assert!(front.block("no_judicial_determination").is_some());
//! ```

mod front_matter;
mod library;
mod overrides;

pub use front_matter::{
    mode_disclaimers, DisclosureBlock, FrontMatter, FrontMatterBuilder, FrontMatterRequest,
};
pub use library::{PhraseKey, PhraseLibrary, PhraseSet};
pub use overrides::PhraseError;
