//! Parameterized clause assembly for dynamically-shaped statements.
//!
//! Partial updates and filtered lists need SQL whose shape depends on which
//! inputs are present. [`ClauseBuilder`] accumulates fragments and their bind
//! values side by side, so the `$n` placeholder of every fragment is the
//! position of its value in the argument list. Column names and operators are
//! `&'static str`; caller-supplied data only ever travels as a [`BindValue`].

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

/// Typed bind value for dynamically-built queries.
///
/// `None` binds a typed SQL `NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(Option<String>),
    Int(Option<i32>),
    Bool(Option<bool>),
}

impl From<Option<String>> for BindValue {
    fn from(value: Option<String>) -> Self {
        BindValue::Text(value)
    }
}

impl From<Option<i32>> for BindValue {
    fn from(value: Option<i32>) -> Self {
        BindValue::Int(value)
    }
}

impl From<Option<bool>> for BindValue {
    fn from(value: Option<bool>) -> Self {
        BindValue::Bool(value)
    }
}

/// Ordered `(fragment, argument)` accumulator.
#[derive(Debug, Default)]
pub struct ClauseBuilder {
    fragments: Vec<String>,
    args: Vec<BindValue>,
}

impl ClauseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `<lhs>$<n>` where `n` is the 1-based position of `value`.
    ///
    /// `lhs` carries the column and operator, e.g. `"name="` or `"cost >= "`.
    pub fn bind(&mut self, lhs: &'static str, value: impl Into<BindValue>) -> &mut Self {
        self.args.push(value.into());
        self.fragments.push(format!("{lhs}${}", self.args.len()));
        self
    }

    /// Append a fragment that binds nothing.
    pub fn literal(&mut self, fragment: &'static str) -> &mut Self {
        self.fragments.push(fragment.to_string());
        self
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn args(&self) -> &[BindValue] {
        &self.args
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn join(self, separator: &str) -> (String, Vec<BindValue>) {
        (self.fragments.join(separator), self.args)
    }
}

// ---------------------------------------------------------------------------
// SET clause
// ---------------------------------------------------------------------------

/// Compiled SET clause of a single-row partial update.
///
/// Built field by field with [`SetClause::field`]; [`SetClause::finish`]
/// yields `None` when no field was present, in which case no statement must
/// be executed.
#[derive(Debug, Default)]
pub struct SetClause {
    builder: ClauseBuilder,
}

impl SetClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `column=$n` if the field is present (`Some`), skip it otherwise.
    pub fn field<T>(mut self, column: &'static str, write: Option<Option<T>>) -> Self
    where
        Option<T>: Into<BindValue>,
    {
        if let Some(value) = write {
            self.builder.bind(column, value);
        }
        self
    }

    /// Close the clause with the `updated_at` touch, or return `None` when
    /// nothing was set.
    pub fn finish(mut self) -> Option<Self> {
        if self.builder.is_empty() {
            return None;
        }
        self.builder.literal("updated_at=NOW()");
        Some(self)
    }

    pub fn fragments(&self) -> &[String] {
        self.builder.fragments()
    }

    pub fn args(&self) -> &[BindValue] {
        self.builder.args()
    }

    /// Render `SET ... WHERE id=$n` with the row id bound last.
    pub fn into_where_id(self, id: &str) -> (String, Vec<BindValue>) {
        let (sets, mut args) = self.builder.join(", ");
        args.push(BindValue::Text(Some(id.to_string())));
        (format!("SET {sets} WHERE id=${}", args.len()), args)
    }

    /// Render a complete `UPDATE <table> SET ... WHERE id=$n RETURNING <columns>`.
    pub fn into_update(
        self,
        table: &'static str,
        id: &str,
        returning: &'static str,
    ) -> (String, Vec<BindValue>) {
        let (clause, args) = self.into_where_id(id);
        (format!("UPDATE {table} {clause} RETURNING {returning}"), args)
    }
}

// ---------------------------------------------------------------------------
// WHERE clause
// ---------------------------------------------------------------------------

/// Conjunctive WHERE clause that always ends with `TRUE`, so an empty
/// predicate set renders as `WHERE TRUE`.
#[derive(Debug, Default)]
pub struct WhereClause {
    builder: ClauseBuilder,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `<lhs>$n` if `value` is `Some`.
    pub fn predicate<T>(mut self, lhs: &'static str, value: Option<T>) -> Self
    where
        Option<T>: Into<BindValue>,
    {
        if value.is_some() {
            self.builder.bind(lhs, value);
        }
        self
    }

    /// Number of bound predicates, excluding the terminator.
    pub fn predicate_count(&self) -> usize {
        self.builder.args().len()
    }

    pub fn args(&self) -> &[BindValue] {
        self.builder.args()
    }

    /// Render `WHERE p1 AND p2 ... AND TRUE`.
    pub fn finish(mut self) -> (String, Vec<BindValue>) {
        self.builder.literal("TRUE");
        let (conditions, args) = self.builder.join(" AND ");
        (format!("WHERE {conditions}"), args)
    }
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

/// Bind a slice of `BindValue` to a sqlx `QueryAs`, in order.
pub fn bind_values_as<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for val in values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_deref()),
            BindValue::Int(v) => q = q.bind(*v),
            BindValue::Bool(v) => q = q.bind(*v),
        }
    }
    q
}

/// Log a compiled statement at debug level without its argument values.
pub(crate) fn trace_statement(sql: &str, args: &[BindValue]) {
    tracing::debug!(sql, arg_count = args.len(), "Executing compiled statement");
}
