#![allow(dead_code)]

use chrono::NaiveDate;
use paramql::{ClauseKind, FragmentBuilder, QueryModel, ToValue, Value};

#[derive(Debug, Clone, ToValue)]
struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Clone, ToValue)]
struct AmountRange {
    #[param(rename = "min_total")]
    min: i64,
    #[param(rename = "max_total")]
    max: Option<i64>,
    #[param(skip)]
    label: String,
}

#[derive(Debug, Clone, ToValue)]
struct CustomerId(i64);

#[derive(Debug, Default, QueryModel)]
struct OrderSearch {
    #[param(sql = "o.customer_id = :customer", key = "customer", alias = "o")]
    customer: Option<CustomerId>,

    #[param(sql = "o.status IN (:statuses)", key = "statuses", alias = "o")]
    statuses: Vec<String>,

    #[param(sql = "o.placed_on BETWEEN :start AND :end", key = "start:end", alias = "o")]
    period: Option<Period>,

    #[param(sql = "o.total BETWEEN :min_total AND :max_total", key = "min_total:max_total", alias = "o")]
    amount: Option<AmountRange>,

    #[param(sql = "c.name ILIKE :name", key = "name", alias = "c")]
    customer_name: Option<String>,

    #[param(sql = "o.archived = FALSE", alias = "o")]
    hide_archived: bool,

    #[param(sql = "o.status", alias = "o", kind = "group_by")]
    #[param(sql = "o.status, COUNT(*) AS n", alias = "o", kind = "select")]
    per_status: bool,

    #[param(sql = "o.placed_on DESC", alias = "o", kind = "orderBy")]
    newest_first: bool,

    // Not declared, never read.
    page: u32,
}

#[test]
fn descriptors_registered_in_declaration_order() {
    let descriptors = paramql::lookup::<OrderSearch>();
    let fields: Vec<_> = descriptors.iter().map(|d| d.field_name.to_string()).collect();
    assert_eq!(
        fields,
        vec![
            "customer",
            "statuses",
            "period",
            "amount",
            "customer_name",
            "hide_archived",
            "per_status",
            "per_status",
            "newest_first",
        ]
    );
    assert_eq!(descriptors[6].kind, ClauseKind::GroupBy);
    assert_eq!(descriptors[7].kind, ClauseKind::Select);
    assert_eq!(descriptors[8].kind, ClauseKind::OrderBy);
    assert_eq!(descriptors[0].kind, ClauseKind::Condition);
}

#[test]
fn empty_search_renders_baselines() {
    let fragments = FragmentBuilder::new(&OrderSearch::default());
    assert_eq!(fragments.conditions("o"), "WHERE 1=1 ");
    assert_eq!(fragments.select("o"), "");
    assert_eq!(fragments.order_by("o"), "");
    assert_eq!(fragments.group_by("o"), "GROUP BY");
    assert!(fragments.all_replacements().is_empty());
}

#[test]
fn populated_search_builds_every_clause() {
    let search = OrderSearch {
        customer: Some(CustomerId(42)),
        statuses: vec!["paid".into(), "shipped".into()],
        period: Some(Period {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        }),
        customer_name: Some("%smith%".into()),
        hide_archived: true,
        per_status: true,
        newest_first: true,
        ..Default::default()
    };
    let fragments = FragmentBuilder::new(&search);

    assert_eq!(
        fragments.conditions("o"),
        "WHERE 1=1  AND o.customer_id = :customer AND o.status IN (:statuses) \
         AND o.placed_on BETWEEN :start AND :end AND o.archived = FALSE"
    );
    assert_eq!(fragments.conditions("c"), "WHERE 1=1  AND c.name ILIKE :name");
    assert_eq!(fragments.select("o"), "o.status, COUNT(*) AS n");
    assert_eq!(fragments.group_by("o"), " GROUP BY o.status");
    assert_eq!(fragments.order_by("o"), " ORDER BY o.placed_on DESC");

    let params = fragments.all_replacements();
    assert_eq!(params.get("customer"), Some(&Value::int(42)));
    assert_eq!(
        params.get("statuses"),
        Some(&Value::Sequence(vec![Value::str("paid"), Value::str("shipped")]))
    );
    assert_eq!(params.get("name"), Some(&Value::str("%smith%")));
    assert!(params.contains_key("start"));
    assert!(params.contains_key("end"));
    assert_eq!(params.len(), 5);
}

#[test]
fn renamed_composite_fields_feed_sub_keys() {
    let search = OrderSearch {
        amount: Some(AmountRange {
            min: 10,
            max: None,
            label: "; DROP".into(),
        }),
        ..Default::default()
    };
    let fragments = FragmentBuilder::new(&search);

    assert_eq!(
        fragments.conditions("o"),
        "WHERE 1=1  AND o.total BETWEEN :min_total AND :max_total"
    );
    let params = fragments.all_replacements();
    assert_eq!(params.get("min_total"), Some(&Value::int(10)));
    assert!(!params.contains_key("max_total"));
    assert_eq!(fragments.stats().skipped_sub_keys, 1);
}

#[test]
fn unsafe_input_is_dropped() {
    let search = OrderSearch {
        customer_name: Some("x' OR 1=1; --".into()),
        statuses: vec!["paid".into(), "paid'; DELETE FROM orders".into()],
        ..Default::default()
    };
    let fragments = FragmentBuilder::new(&search);

    assert_eq!(fragments.conditions("c"), "WHERE 1=1 ");
    assert_eq!(fragments.conditions("o"), "WHERE 1=1 ");
    assert!(fragments.all_replacements().is_empty());
    assert_eq!(fragments.stats().rejected_unsafe, 2);
}

#[test]
fn builder_snapshots_the_model() {
    let mut search = OrderSearch {
        customer_name: Some("ann".into()),
        ..Default::default()
    };
    let fragments = FragmentBuilder::new(&search);
    search.customer_name = None;

    assert_eq!(fragments.conditions("c"), "WHERE 1=1  AND c.name ILIKE :name");
    assert_eq!(search.field_value("customer_name"), Value::Absent);
}

#[test]
fn undeclared_fields_read_as_absent() {
    let search = OrderSearch {
        page: 3,
        ..Default::default()
    };
    assert_eq!(search.field_value("page"), Value::Absent);
    assert_eq!(search.field_value("no_such_field"), Value::Absent);
}

#[test]
fn to_value_derive_shapes() {
    assert_eq!(CustomerId(7).to_value(), Value::int(7));

    let amount = AmountRange {
        min: 1,
        max: Some(2),
        label: "ignored".into(),
    };
    assert_eq!(
        amount.to_value(),
        Value::composite([("min_total", Value::int(1)), ("max_total", Value::int(2))])
    );
}
