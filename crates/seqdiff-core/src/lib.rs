pub mod comparer;
pub mod config;
pub mod element;
pub mod error;
pub mod logging;
pub mod optional;
pub mod options;
pub mod slice;

pub use comparer::{ElementComparer, KeyComparer, NaturalComparer, NullAware};
pub use config::{AlignmentSettings, AlignmentStrategy, ConflictStrategy, DiffSettings, MergeSettings};
pub use element::{DiffElement, DiffOperation};
pub use error::{Error, Result};
pub use optional::Optional;
pub use options::DiffOptions;
pub use slice::Slice;
