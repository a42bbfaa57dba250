//! # paramql
//!
//! Declare once how each field of a filter model maps onto a SQL fragment,
//! then turn populated models into ready-to-concatenate clauses plus a named
//! parameter mapping.
//!
//! ## Features
//!
//! - **Declarative**: `#[derive(QueryModel)]` binds fields to conditions,
//!   select columns, ORDER BY and GROUP BY terms
//! - **Alias-scoped**: several independent clause groups (one per table or
//!   sub-query) come out of a single model
//! - **Present-only**: absent, empty and `false` fields contribute nothing
//! - **Parameter-first**: condition values are bound by name, never spliced;
//!   a coarse safety screen drops values that look like injection attempts
//! - **Composite keys**: `key = "start:end"` spreads a struct value over
//!   several parameters
//!
//! ## Example
//!
//! ```ignore
//! use paramql::{FragmentBuilder, QueryModel, ToValue};
//!
//! #[derive(ToValue)]
//! struct Period {
//!     start: chrono::NaiveDate,
//!     end: chrono::NaiveDate,
//! }
//!
//! #[derive(QueryModel)]
//! struct OrderSearch {
//!     #[param(sql = "o.customer_id = :customer", key = "customer", alias = "o")]
//!     customer: Option<i64>,
//!     #[param(sql = "o.placed_on BETWEEN :start AND :end", key = "start:end", alias = "o")]
//!     period: Option<Period>,
//!     #[param(sql = "o.status", alias = "o", kind = "group_by")]
//!     #[param(sql = "o.status, COUNT(*)", alias = "o", kind = "select")]
//!     per_status: bool,
//! }
//!
//! let fragments = FragmentBuilder::new(&search);
//! let sql = format!(
//!     "SELECT {} FROM orders o {} {}",
//!     fragments.select("o"),
//!     fragments.conditions("o"),
//!     fragments.group_by("o"),
//! );
//! let params = fragments.all_replacements();
//! ```

pub mod builder;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod replacements;
pub mod validate;
pub mod value;

pub mod prelude;

pub use builder::{BuildStats, BuilderOptions, FragmentBuilder};
pub use descriptor::{ClauseKind, FieldDescriptor, KEY_SEPARATOR};
pub use error::{ParamError, ParamResult};
pub use registry::{
    DescriptorRegistry, ModelRegistration, QueryModel, lookup, register, with_descriptors,
};
pub use replacements::Replacements;
pub use validate::{is_safe_string, is_valid_value};
pub use value::{Scalar, Temporal, ToValue, Value};

#[cfg(feature = "derive")]
pub use paramql_derive::{QueryModel, ToValue};

// Re-export inventory for use by derive macros
pub use inventory;
