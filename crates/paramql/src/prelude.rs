//! Convenient imports for declaring and building filter models.
//!
//! ```ignore
//! use paramql::prelude::*;
//! ```

pub use crate::{
    ClauseKind, FieldDescriptor, FragmentBuilder, QueryModel, Replacements, ToValue, Value,
};
