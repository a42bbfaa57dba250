//! `#[param(...)]` attribute parsing.

use syn::punctuated::Punctuated;
use syn::{Attribute, Meta, Result, Token};

/// One `#[param(...)]` attribute on a `QueryModel` field.
pub struct ParamAttr {
    pub sql: String,
    pub key: String,
    pub alias: String,
    pub kind: ClauseKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Condition,
    Select,
    OrderBy,
    GroupBy,
}

impl ClauseKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "condition" | "where" => Some(Self::Condition),
            "select" => Some(Self::Select),
            "order_by" | "orderBy" => Some(Self::OrderBy),
            "group_by" | "groupBy" => Some(Self::GroupBy),
            _ => None,
        }
    }

    pub fn variant(self) -> &'static str {
        match self {
            Self::Condition => "Condition",
            Self::Select => "Select",
            Self::OrderBy => "OrderBy",
            Self::GroupBy => "GroupBy",
        }
    }
}

fn lit_str(value: &syn::Expr, name: &str) -> Result<String> {
    let syn::Expr::Lit(syn::ExprLit {
        lit: syn::Lit::Str(lit),
        ..
    }) = value
    else {
        return Err(syn::Error::new_spanned(
            value,
            format!("param({name} = \"...\") expects a string literal"),
        ));
    };
    Ok(lit.value())
}

fn param_items(attr: &Attribute) -> Result<Punctuated<Meta, Token![,]>> {
    attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
}

/// Parse every `#[param(...)]` attribute of a `QueryModel` field.
pub fn parse_field_params(field: &syn::Field) -> Result<Vec<ParamAttr>> {
    let mut out = Vec::new();

    for attr in &field.attrs {
        if !attr.path().is_ident("param") {
            continue;
        }

        let mut sql: Option<String> = None;
        let mut key: Option<String> = None;
        let mut alias: Option<String> = None;
        let mut kind: Option<ClauseKind> = None;

        for meta in param_items(attr)? {
            let Meta::NameValue(nv) = meta else {
                return Err(syn::Error::new_spanned(
                    meta,
                    "param(...) only supports name-value args: sql, key, alias, kind",
                ));
            };
            let Some(name) = nv.path.get_ident().map(|i| i.to_string()) else {
                return Err(syn::Error::new_spanned(&nv.path, "unknown param(...) argument"));
            };
            let slot = match name.as_str() {
                "sql" => &mut sql,
                "key" => &mut key,
                "alias" => &mut alias,
                "kind" => {
                    if kind.is_some() {
                        return Err(syn::Error::new_spanned(nv, "kind can only be specified once"));
                    }
                    let raw = lit_str(&nv.value, "kind")?;
                    let Some(parsed) = ClauseKind::parse(&raw) else {
                        return Err(syn::Error::new_spanned(
                            &nv.value,
                            "unknown kind (supported: condition, select, order_by, group_by)",
                        ));
                    };
                    kind = Some(parsed);
                    continue;
                }
                _ => {
                    return Err(syn::Error::new_spanned(
                        &nv.path,
                        "unknown param(...) argument (supported: sql, key, alias, kind)",
                    ));
                }
            };
            if slot.is_some() {
                return Err(syn::Error::new_spanned(
                    &nv,
                    format!("{name} can only be specified once"),
                ));
            }
            *slot = Some(lit_str(&nv.value, &name)?);
        }

        let Some(sql) = sql else {
            return Err(syn::Error::new_spanned(attr, "param(...) requires sql = \"...\""));
        };
        let Some(alias) = alias.filter(|a| !a.is_empty()) else {
            return Err(syn::Error::new_spanned(
                attr,
                "param(...) requires a non-empty alias = \"...\"",
            ));
        };

        out.push(ParamAttr {
            sql,
            key: key.unwrap_or_default(),
            alias,
            kind: kind.unwrap_or(ClauseKind::Condition),
        });
    }

    Ok(out)
}

/// `#[param(rename = "...")]` / `#[param(skip)]` on a `ToValue` field.
pub struct ValueFieldAttr {
    pub rename: Option<String>,
    pub skip: bool,
}

pub fn parse_value_field(field: &syn::Field) -> Result<ValueFieldAttr> {
    let mut out = ValueFieldAttr {
        rename: None,
        skip: false,
    };

    for attr in &field.attrs {
        if !attr.path().is_ident("param") {
            continue;
        }
        for meta in param_items(attr)? {
            match meta {
                Meta::Path(p) if p.is_ident("skip") => out.skip = true,
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    out.rename = Some(lit_str(&nv.value, "rename")?);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unknown param(...) argument (supported: rename = \"...\", skip)",
                    ));
                }
            }
        }
    }

    Ok(out)
}

/// Field name as written, without a raw-identifier prefix.
pub fn field_key(ident: &syn::Ident) -> String {
    let s = ident.to_string();
    s.strip_prefix("r#").map(str::to_string).unwrap_or(s)
}
