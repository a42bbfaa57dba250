use crate::replacements::Replacements;

/// Fragments and bindings collected for one alias.
#[derive(Debug, Clone, Default)]
pub(crate) struct AliasBucket {
    pub(crate) alias: String,
    pub(crate) conditions: Vec<String>,
    pub(crate) selects: Vec<String>,
    pub(crate) order_bys: Vec<String>,
    pub(crate) group_bys: Vec<String>,
    pub(crate) replacements: Replacements,
}

impl AliasBucket {
    pub(crate) fn new(alias: &str) -> Self {
        Self {
            alias: alias.to_string(),
            ..Self::default()
        }
    }
}

pub(crate) fn render_conditions(conditions: &[String]) -> String {
    if conditions.is_empty() {
        return "WHERE 1=1 ".to_string();
    }
    format!("WHERE 1=1  AND {}", conditions.join(" AND "))
}

pub(crate) fn render_select(selects: &[String]) -> String {
    selects.join(", ")
}

pub(crate) fn render_order_by(order_bys: &[String]) -> String {
    if order_bys.is_empty() {
        return String::new();
    }
    format!(" ORDER BY {}", order_bys.join(", "))
}

// The empty form keeps the bare keyword, unlike the other clauses.
pub(crate) fn render_group_by(group_bys: &[String]) -> String {
    if group_bys.is_empty() {
        return "GROUP BY".to_string();
    }
    format!(" GROUP BY {}", group_bys.join(", "))
}
