use super::dialect::Dialect;
use serde_json::Value;

/// Represents different types of SQL conditions.
///
/// Every value is bound as a parameter; only field names are written into the
/// SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Simple {
        field: String,
        operator: String,
        value: Value,
    },
    In {
        field: String,
        values: Vec<Value>,
    },
    Between {
        field: String,
        start: Value,
        end: Value,
    },
    Like {
        field: String,
        pattern: String,
    },
    Group(WhereClause),
    /// A self-contained predicate such as a function call, written bare
    Predicate {
        sql: String,
        args: Vec<Value>,
    },
    /// Caller-written SQL using `?` for each argument.
    ///
    /// Parenthesized whenever other conditions are joined with it.
    Raw {
        sql: String,
        args: Vec<Value>,
    },
}

impl Condition {
    pub fn simple(field: &str, operator: &str, value: Value) -> Self {
        Condition::Simple {
            field: field.to_string(),
            operator: operator.to_string(),
            value,
        }
    }

    pub fn like(field: &str, pattern: impl Into<String>) -> Self {
        Condition::Like {
            field: field.to_string(),
            pattern: pattern.into(),
        }
    }

    /// OR the given conditions together as one parenthesized group
    pub fn any(conditions: Vec<Condition>) -> Self {
        Condition::Group(WhereClause::or(conditions))
    }

    pub fn raw(sql: &str, args: Vec<Value>) -> Self {
        Condition::Raw {
            sql: sql.to_string(),
            args,
        }
    }

    pub fn write_sql(&self, writer: &mut SqlWriter) {
        match self {
            Condition::Simple {
                field,
                operator,
                value,
            } => {
                writer.push_str(&format!("{field} {operator} "));
                writer.push_bind(value.clone());
            }
            Condition::In { field, values } => {
                writer.push_str(&format!("{field} IN ("));
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        writer.push_str(", ");
                    }
                    writer.push_bind(value.clone());
                }
                writer.push_str(")");
            }
            Condition::Between { field, start, end } => {
                writer.push_str(&format!("{field} BETWEEN "));
                writer.push_bind(start.clone());
                writer.push_str(" AND ");
                writer.push_bind(end.clone());
            }
            Condition::Like { field, pattern } => {
                writer.push_str(&format!("{field} LIKE "));
                writer.push_bind(Value::String(pattern.clone()));
            }
            Condition::Group(clause) => clause.write_sql(writer),
            Condition::Predicate { sql, args } | Condition::Raw { sql, args } => {
                writer.push_raw(sql, args)
            }
        }
    }

    /// Write as one operand of an AND/OR chain
    pub fn write_joined(&self, writer: &mut SqlWriter) {
        if let Condition::Raw { sql, args } = self {
            writer.push_str("(");
            writer.push_raw(sql, args);
            writer.push_str(")");
        } else {
            self.write_sql(writer);
        }
    }

    /// Render on its own, numbering placeholders from 1
    pub fn to_sql(&self, dialect: Dialect) -> (String, Vec<Value>) {
        let mut writer = SqlWriter::new(dialect);
        self.write_sql(&mut writer);
        writer.finish()
    }
}

/// Represents a WHERE clause that can contain multiple conditions
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub conditions: Vec<Condition>,
    pub operator: LogicalOperator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl WhereClause {
    /// Create a simple WHERE clause with a single condition
    pub fn simple(field: &str, operator: &str, value: Value) -> Self {
        Self::single(Condition::simple(field, operator, value))
    }

    /// Create raw SQL condition
    pub fn raw(sql: &str, args: Vec<Value>) -> Self {
        Self::single(Condition::raw(sql, args))
    }

    pub fn single(condition: Condition) -> Self {
        Self {
            conditions: vec![condition],
            operator: LogicalOperator::And,
        }
    }

    /// Combine multiple conditions with AND
    pub fn and(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::And,
        }
    }

    /// Combine multiple conditions with OR
    pub fn or(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::Or,
        }
    }

    /// A lone AND condition renders bare; OR groups are always parenthesized.
    pub fn write_sql(&self, writer: &mut SqlWriter) {
        self.write_clause(writer, false);
    }

    /// Write as one clause of a longer chain, keeping raw fragments grouped
    pub fn write_joined(&self, writer: &mut SqlWriter) {
        self.write_clause(writer, true);
    }

    fn write_clause(&self, writer: &mut SqlWriter, joined: bool) {
        if self.conditions.is_empty() {
            writer.push_str("1=1");
            return;
        }

        if self.conditions.len() == 1 && self.operator == LogicalOperator::And {
            if joined {
                self.conditions[0].write_joined(writer);
            } else {
                self.conditions[0].write_sql(writer);
            }
            return;
        }

        let operator_str = match self.operator {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        };

        writer.push_str("(");
        for (index, condition) in self.conditions.iter().enumerate() {
            if index > 0 {
                writer.push_str(operator_str);
            }
            condition.write_joined(writer);
        }
        writer.push_str(")");
    }

    pub fn to_sql(&self, dialect: Dialect) -> (String, Vec<Value>) {
        let mut writer = SqlWriter::new(dialect);
        self.write_sql(&mut writer);
        writer.finish()
    }
}

/// Accumulates SQL text and bound arguments with dialect-correct placeholders
#[derive(Debug, Clone)]
pub struct SqlWriter {
    dialect: Dialect,
    sql: String,
    args: Vec<Value>,
}

impl SqlWriter {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            args: Vec::new(),
        }
    }

    pub fn push_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    pub fn push_bind(&mut self, value: Value) {
        self.args.push(value);
        let placeholder = self.dialect.placeholder(self.args.len());
        self.sql.push_str(&placeholder);
    }

    /// Copy `sql`, binding the next argument at every `?`.
    ///
    /// A `?` with no argument left is copied as-is.
    pub fn push_raw(&mut self, sql: &str, args: &[Value]) {
        let mut remaining = args.iter();
        for ch in sql.chars() {
            if ch == '?' {
                if let Some(value) = remaining.next() {
                    self.push_bind(value.clone());
                    continue;
                }
            }
            self.sql.push(ch);
        }
        let unused = remaining.count();
        if unused > 0 {
            tracing::debug!(sql = %sql, unused, "Raw condition has more arguments than placeholders");
        }
    }

    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }
}
