//! Example: one filter model feeding a main query and a count sub-query.
//!
//! Run with:
//!   cargo run --example filter_model -p paramql

use chrono::NaiveDate;
use paramql::{BuilderOptions, FragmentBuilder, QueryModel, ToValue};

#[derive(ToValue)]
struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Default, QueryModel)]
struct InvoiceSearch {
    #[param(sql = "i.customer_id = :customer_id", key = "customer_id", alias = "invoices")]
    #[param(sql = "p.customer_id = :customer_id", key = "customer_id", alias = "payments")]
    customer_id: Option<i64>,

    #[param(sql = "i.issued_on BETWEEN :start AND :end", key = "start:end", alias = "invoices")]
    period: Option<Period>,

    #[param(sql = "i.currency IN (:currencies)", key = "currencies", alias = "invoices")]
    currencies: Vec<String>,

    #[param(sql = "i.memo ILIKE :memo", key = "memo", alias = "invoices")]
    memo: Option<String>,

    #[param(sql = "i.issued_on DESC", alias = "invoices", kind = "order_by")]
    newest_first: bool,

    #[param(sql = "SUM(p.amount) AS paid", alias = "payments", kind = "select")]
    #[param(sql = "p.invoice_id", alias = "payments", kind = "group_by")]
    with_paid_total: bool,
}

fn main() {
    let search = InvoiceSearch {
        customer_id: Some(1001),
        period: NaiveDate::from_ymd_opt(2024, 1, 1)
            .zip(NaiveDate::from_ymd_opt(2024, 6, 30))
            .map(|(start, end)| Period { start, end }),
        currencies: vec!["EUR".into(), "USD".into()],
        // Rejected by the safety screen and left out.
        memo: Some("%refund%'; DROP TABLE invoices; --".into()),
        newest_first: true,
        with_paid_total: true,
    };

    let fragments = FragmentBuilder::with_options(&search, &BuilderOptions::new().quiet());

    let payments = format!(
        "SELECT p.invoice_id, {} FROM payments p {}{}",
        fragments.select("payments"),
        fragments.conditions("payments"),
        fragments.group_by("payments"),
    );
    let sql = format!(
        "SELECT i.*, paid.paid FROM invoices i LEFT JOIN ({payments}) paid ON paid.invoice_id = i.id {}{}",
        fragments.conditions("invoices"),
        fragments.order_by("invoices"),
    );

    println!("SQL:\n  {sql}");
    println!("Params:\n  {}", fragments.all_replacements().to_json());

    let stats = fragments.stats();
    println!(
        "Included {} of {} descriptors ({} rejected as unsafe)",
        stats.included, stats.evaluated, stats.rejected_unsafe
    );
}
