//! Field descriptors: the static binding of a model field to a SQL fragment.

use crate::error::{ParamError, ParamResult};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Separator between sub-keys of a composite parameter key (`"start:end"`).
pub const KEY_SEPARATOR: char = ':';

/// Which part of a statement a descriptor contributes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    /// A WHERE condition; the only kind that binds parameters.
    #[default]
    Condition,
    Select,
    OrderBy,
    GroupBy,
}

impl ClauseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseKind::Condition => "condition",
            ClauseKind::Select => "select",
            ClauseKind::OrderBy => "order_by",
            ClauseKind::GroupBy => "group_by",
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClauseKind {
    type Err = ParamError;

    /// Accepts snake_case and camelCase spellings, plus `where` for conditions.
    fn from_str(s: &str) -> ParamResult<Self> {
        match s {
            "condition" | "where" => Ok(ClauseKind::Condition),
            "select" => Ok(ClauseKind::Select),
            "order_by" | "orderBy" => Ok(ClauseKind::OrderBy),
            "group_by" | "groupBy" => Ok(ClauseKind::GroupBy),
            other => Err(ParamError::UnknownClauseKind(other.to_string())),
        }
    }
}

/// Declares how one model field maps onto a SQL fragment.
///
/// # Example
///
/// ```ignore
/// use paramql::{ClauseKind, FieldDescriptor};
///
/// let status = FieldDescriptor::new("status", "o.status = :status", "status", "orders");
/// let newest = FieldDescriptor::new("newest_first", "o.created_at DESC", "", "orders")
///     .kind(ClauseKind::OrderBy);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Model field this descriptor reads.
    pub field_name: Cow<'static, str>,
    /// SQL text contributed when the field is present.
    pub fragment: Cow<'static, str>,
    /// Parameter name, or `:`-separated sub-keys for composite values.
    /// Empty means nothing is bound.
    pub param_key: Cow<'static, str>,
    /// Clause group this descriptor belongs to.
    pub alias: Cow<'static, str>,
    pub kind: ClauseKind,
}

impl FieldDescriptor {
    /// Create a condition descriptor.
    pub fn new(
        field_name: impl Into<Cow<'static, str>>,
        fragment: impl Into<Cow<'static, str>>,
        param_key: impl Into<Cow<'static, str>>,
        alias: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            fragment: fragment.into(),
            param_key: param_key.into(),
            alias: alias.into(),
            kind: ClauseKind::Condition,
        }
    }

    /// Like [`FieldDescriptor::new`], but rejects an empty field name or alias.
    pub fn try_new(
        field_name: impl Into<Cow<'static, str>>,
        fragment: impl Into<Cow<'static, str>>,
        param_key: impl Into<Cow<'static, str>>,
        alias: impl Into<Cow<'static, str>>,
    ) -> ParamResult<Self> {
        let d = Self::new(field_name, fragment, param_key, alias);
        if d.field_name.is_empty() {
            return Err(ParamError::invalid_descriptor("field name is empty"));
        }
        if d.alias.is_empty() {
            return Err(ParamError::invalid_descriptor(format!(
                "alias is empty for field '{}'",
                d.field_name
            )));
        }
        Ok(d)
    }

    /// Set the clause kind.
    pub fn kind(mut self, kind: ClauseKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns `true` if the param key names several sub-keys.
    pub fn is_composite_key(&self) -> bool {
        self.param_key.contains(KEY_SEPARATOR)
    }

    /// Iterate over the sub-keys of the param key.
    pub fn sub_keys(&self) -> impl Iterator<Item = &str> {
        self.param_key.split(KEY_SEPARATOR)
    }
}
