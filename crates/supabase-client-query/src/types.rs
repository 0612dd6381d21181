use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::PostgrestError;

// --- Filter values ---

/// Conversion into the textual form PostgREST expects in a filter.
pub trait IntoFilterValue {
    fn into_filter_value(self) -> String;
}

impl IntoFilterValue for String {
    fn into_filter_value(self) -> String {
        self
    }
}

impl IntoFilterValue for &str {
    fn into_filter_value(self) -> String {
        self.to_string()
    }
}

impl IntoFilterValue for &String {
    fn into_filter_value(self) -> String {
        self.clone()
    }
}

macro_rules! display_filter_value {
    ($($ty:ty),*) => {
        $(
            impl IntoFilterValue for $ty {
                fn into_filter_value(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_filter_value!(bool, i16, i32, i64, u16, u32, u64, f32, f64);

impl IntoFilterValue for JsonValue {
    fn into_filter_value(self) -> String {
        match self {
            JsonValue::String(s) => s,
            other => other.to_string(),
        }
    }
}

impl<T: IntoFilterValue> IntoFilterValue for Option<T> {
    fn into_filter_value(self) -> String {
        match self {
            Some(v) => v.into_filter_value(),
            None => "null".to_string(),
        }
    }
}

/// Render a list for the `in` operator: `(a,b,"c,d")`.
pub(crate) fn render_list(values: Vec<String>) -> String {
    let items: Vec<String> = values
        .into_iter()
        .map(|v| {
            if v.contains([',', '(', ')', '"']) {
                format!("\"{}\"", v.replace('"', "\\\""))
            } else {
                v
            }
        })
        .collect();
    format!("({})", items.join(","))
}

// --- Filters ---

/// Comparison operators supported in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    ILike,
    Is,
    In,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::ILike => "ilike",
            Self::Is => "is",
            Self::In => "in",
        }
    }
}

/// Values for IS filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsValue {
    Null,
    NotNull,
    True,
    False,
    Unknown,
}

impl IsValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null | Self::NotNull => "null",
            Self::True => "true",
            Self::False => "false",
            Self::Unknown => "unknown",
        }
    }
}

/// One `column=op.value` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub operator: FilterOperator,
    pub value: String,
    pub negated: bool,
}

impl Filter {
    /// The `(key, value)` query pair for this filter.
    pub fn to_query_pair(&self) -> (String, String) {
        let rendered = if self.negated {
            format!("not.{}.{}", self.operator.as_str(), self.value)
        } else {
            format!("{}.{}", self.operator.as_str(), self.value)
        };
        (self.column.clone(), rendered)
    }
}

// --- Modifiers ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsPosition {
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderClause {
    pub column: String,
    pub direction: OrderDirection,
    pub nulls: Option<NullsPosition>,
}

impl OrderClause {
    pub fn render(&self) -> String {
        let nulls = match self.nulls {
            Some(NullsPosition::First) => ".nullsfirst",
            Some(NullsPosition::Last) => ".nullslast",
            None => "",
        };
        format!("{}.{}{}", self.column, self.direction.as_str(), nulls)
    }
}

/// Row counting strategy requested through the `Prefer` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountOption {
    /// No count requested.
    #[default]
    None,
    Exact,
    Planned,
    Estimated,
}

impl CountOption {
    /// The `Prefer` header fragment, if any.
    pub fn prefer(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Exact => Some("count=exact"),
            Self::Planned => Some("count=planned"),
            Self::Estimated => Some("count=estimated"),
        }
    }
}

// --- Request parts ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Select,
    Insert,
    Upsert,
    Update,
    Delete,
    Rpc,
}

/// Everything a builder has collected for one PostgREST request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParts {
    pub operation: Operation,
    pub method: Method,
    pub select: Option<String>,
    pub filters: Vec<Filter>,
    pub orders: Vec<OrderClause>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub single: bool,
    pub count: CountOption,
    pub body: Option<JsonValue>,
    pub on_conflict: Option<String>,
    pub ignore_duplicates: bool,
}

impl RequestParts {
    pub fn new(operation: Operation, method: Method) -> Self {
        Self {
            operation,
            method,
            select: None,
            filters: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
            single: false,
            count: CountOption::None,
            body: None,
            on_conflict: None,
            ignore_duplicates: false,
        }
    }
}

/// Validate a column name used in a filter or order clause.
pub fn validate_column_name(name: &str) -> Result<(), PostgrestError> {
    if name.is_empty() {
        return Err(PostgrestError::query_builder("Column name cannot be empty"));
    }
    if name.contains(['"', ';', '&', '=']) || name.contains("--") {
        return Err(PostgrestError::query_builder(format!(
            "Invalid column name: {name:?} (contains prohibited characters)"
        )));
    }
    Ok(())
}

/// Validate a table or function name.
pub fn validate_identifier(name: &str, kind: &str) -> Result<(), PostgrestError> {
    if name.is_empty() {
        return Err(PostgrestError::query_builder(format!(
            "{kind} name cannot be empty"
        )));
    }
    if name.contains(['"', ';', '/', '?', '&', '#']) || name.contains("--") {
        return Err(PostgrestError::query_builder(format!(
            "Invalid {kind} name: {name:?} (contains prohibited characters)"
        )));
    }
    Ok(())
}

// --- Response ---

/// Result of an executed PostgREST request.
#[derive(Debug, Clone, PartialEq)]
pub struct PostgrestResponse {
    /// Parsed body; `Null` for empty bodies and HEAD requests.
    pub data: JsonValue,
    /// Total row count from `Content-Range`, when a count was requested.
    pub count: Option<i64>,
    pub status: u16,
}

impl PostgrestResponse {
    /// Deserialize `data` into a concrete type.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, PostgrestError> {
        Ok(serde_json::from_value(self.data)?)
    }
}
