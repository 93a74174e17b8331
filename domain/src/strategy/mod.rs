//! Context combination strategies
//!
//! A strategy merges the successful contexts of one fan-out into a single
//! value. The orchestrator only depends on [`CombinationStrategy`]; adding a
//! strategy means implementing that one trait.
//!
//! Every strategy must accept an empty input and return a neutral value for
//! it. Inputs always arrive in provider registration order.

mod concat;
mod dictionary;
mod error;
mod source_keyed;
mod text;
mod traits;

pub use concat::SimpleConcatenationStrategy;
pub use dictionary::{CollisionPolicy, DictionaryMergeStrategy};
pub use error::CombineError;
pub use source_keyed::SourceKeyedStrategy;
pub use text::ContextText;
pub use traits::CombinationStrategy;
