//! Fragment builder: turns one populated filter model into per-alias SQL
//! fragments and a parameter mapping.
//!
//! # Example
//!
//! ```ignore
//! use paramql::{FragmentBuilder, QueryModel};
//!
//! #[derive(QueryModel)]
//! struct OrderFilter {
//!     #[param(sql = "o.status = :status", key = "status", alias = "orders")]
//!     status: Option<String>,
//!     #[param(sql = "o.created_at DESC", alias = "orders", kind = "order_by")]
//!     newest_first: bool,
//! }
//!
//! let filter = OrderFilter { status: Some("paid".into()), newest_first: true };
//! let fragments = FragmentBuilder::new(&filter);
//!
//! let sql = format!(
//!     "SELECT * FROM orders o {}{}",
//!     fragments.conditions("orders"),
//!     fragments.order_by("orders"),
//! );
//! // SELECT * FROM orders o WHERE 1=1  AND o.status = :status ORDER BY o.created_at DESC
//! let params = fragments.all_replacements();
//! ```

mod bucket;
mod options;


pub use options::{BuildStats, BuilderOptions};

use bucket::AliasBucket;
use tracing::Level;

use crate::descriptor::{ClauseKind, FieldDescriptor};
use crate::registry::{self, QueryModel};
use crate::replacements::Replacements;
use crate::validate::is_valid_value;
use crate::value::Value;

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

/// Per-alias SQL fragments built from one model instance.
///
/// All decisions are taken in the constructor; later changes to the model are
/// not seen. Accessors can be called any number of times.
#[derive(Debug, Clone, Default)]
pub struct FragmentBuilder {
    // Kept in first-inclusion order so replacement merging is deterministic.
    buckets: Vec<AliasBucket>,
    stats: BuildStats,
}

impl FragmentBuilder {
    /// Build from `model` using the descriptors registered for `M`.
    pub fn new<M: QueryModel>(model: &M) -> Self {
        Self::with_options(model, &BuilderOptions::default())
    }

    /// Like [`FragmentBuilder::new`] with custom options.
    pub fn with_options<M: QueryModel>(model: &M, options: &BuilderOptions) -> Self {
        registry::with_descriptors::<M, _>(|descriptors| {
            Self::from_descriptors_with_options(model, descriptors, options)
        })
    }

    /// Build from `model` using an explicit descriptor list.
    pub fn from_descriptors<M: QueryModel + ?Sized>(
        model: &M,
        descriptors: &[FieldDescriptor],
    ) -> Self {
        Self::from_descriptors_with_options(model, descriptors, &BuilderOptions::default())
    }

    /// Like [`FragmentBuilder::from_descriptors`] with custom options.
    pub fn from_descriptors_with_options<M: QueryModel + ?Sized>(
        model: &M,
        descriptors: &[FieldDescriptor],
        options: &BuilderOptions,
    ) -> Self {
        let mut builder = Self::default();
        for descriptor in descriptors {
            builder.evaluate(descriptor, model.field_value(&descriptor.field_name), options);
        }
        builder
    }

    fn evaluate(&mut self, d: &FieldDescriptor, value: Value, options: &BuilderOptions) {
        self.stats.evaluated += 1;

        if value.is_blank() {
            self.stats.skipped_empty += 1;
            return;
        }
        if !is_accepted(d, &value) {
            self.stats.rejected_unsafe += 1;
            if let Some(level) = options.log_level {
                emit_at_level!(
                    level,
                    target: "paramql.builder",
                    alias = %d.alias,
                    field = %d.field_name,
                    value = %options.truncate_value(&value.to_string()),
                    "value rejected by safety screen"
                );
            }
            return;
        }
        self.stats.included += 1;

        let bucket = self.bucket_mut(&d.alias);
        let fragment = d.fragment.to_string();
        match d.kind {
            ClauseKind::Select => bucket.selects.push(fragment),
            ClauseKind::OrderBy => bucket.order_bys.push(fragment),
            ClauseKind::GroupBy => bucket.group_bys.push(fragment),
            ClauseKind::Condition => {
                bucket.conditions.push(fragment);
                let skipped = bind(&mut bucket.replacements, d, value);
                self.stats.skipped_sub_keys += skipped;
            }
        }
    }

    fn bucket_mut(&mut self, alias: &str) -> &mut AliasBucket {
        let idx = match self.buckets.iter().position(|b| b.alias == alias) {
            Some(idx) => idx,
            None => {
                self.buckets.push(AliasBucket::new(alias));
                self.buckets.len() - 1
            }
        };
        &mut self.buckets[idx]
    }

    fn bucket(&self, alias: &str) -> Option<&AliasBucket> {
        self.buckets.iter().find(|b| b.alias == alias)
    }

    fn fragments(&self, alias: &str, pick: fn(&AliasBucket) -> &[String]) -> &[String] {
        self.bucket(alias).map(pick).unwrap_or_default()
    }

    /// `WHERE 1=1 ` when the alias has no conditions, otherwise
    /// `WHERE 1=1  AND ` followed by the conditions joined with ` AND `.
    pub fn conditions(&self, alias: &str) -> String {
        bucket::render_conditions(self.fragments(alias, |b| &b.conditions))
    }

    /// Select fragments joined with `, `; empty string when none.
    pub fn select(&self, alias: &str) -> String {
        bucket::render_select(self.fragments(alias, |b| &b.selects))
    }

    /// ` ORDER BY ...`; empty string when none.
    pub fn order_by(&self, alias: &str) -> String {
        bucket::render_order_by(self.fragments(alias, |b| &b.order_bys))
    }

    /// ` GROUP BY ...`, or the bare `GROUP BY` when the alias has none.
    pub fn group_by(&self, alias: &str) -> String {
        bucket::render_group_by(self.fragments(alias, |b| &b.group_bys))
    }

    /// Parameters bound for one alias.
    pub fn replacements(&self, alias: &str) -> Replacements {
        self.bucket(alias)
            .map(|b| b.replacements.clone())
            .unwrap_or_default()
    }

    /// Parameters of every alias merged into one mapping.
    ///
    /// Aliases are merged in the order they first received a fragment; a key
    /// bound by several aliases keeps the last value.
    pub fn all_replacements(&self) -> Replacements {
        let mut merged = Replacements::new();
        for bucket in &self.buckets {
            merged.merge(&bucket.replacements);
        }
        merged
    }

    /// Aliases that received at least one fragment, in first-inclusion order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.alias.as_str())
    }

    /// Returns `true` if the alias received at least one fragment.
    pub fn has_alias(&self, alias: &str) -> bool {
        self.bucket(alias).is_some()
    }

    /// Counters collected while evaluating the descriptors.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }
}

/// Composite values only make sense when a condition spreads them over
/// `a:b` sub-keys; anywhere else they are rejected like any unknown shape.
fn is_accepted(d: &FieldDescriptor, value: &Value) -> bool {
    if value.is_composite() && !(d.kind == ClauseKind::Condition && d.is_composite_key()) {
        return false;
    }
    is_valid_value(value)
}

/// Bind a condition value. Returns how many composite sub-keys were missing
/// or absent and left unbound.
fn bind(replacements: &mut Replacements, d: &FieldDescriptor, value: Value) -> usize {
    if d.param_key.is_empty() {
        return 0;
    }

    let map = match value {
        Value::Composite(map) if d.is_composite_key() => map,
        value => {
            replacements.insert(d.param_key.to_string(), value);
            return 0;
        }
    };

    let mut skipped = 0;
    for key in d.sub_keys() {
        match map.get(key) {
            Some(v) if !v.is_absent() => {
                replacements.insert(key, v.clone());
            }
            _ => skipped += 1,
        }
    }
    skipped
}
