/// Convert a SQL AST to a low-level SQL string.
///
/// Every condition is followed by a single space, so conditions and the keywords
/// joining them can be appended one after the other.
use super::ast::*;
use super::dialect::PagingStyle;
use super::string::*;

/// Largest row count accepted by MySQL and SQLite, which cannot skip rows without a LIMIT.
const UNBOUNDED_LIMIT: &str = "9223372036854775807";

impl Fragment {
    pub fn to_sql(&self, sql: &mut SQL) {
        self.where_.to_sql(sql);

        self.order_by.to_sql(sql);

        match &self.limit {
            None => (),
            Some(limit) => {
                if self.order_by.elements.is_empty() && sql.dialect().requires_order_by_for_paging()
                {
                    sql.append_syntax(" ORDER BY (SELECT NULL)");
                }
                limit.to_sql(sql);
            }
        }
    }
}

impl Where {
    pub fn to_sql(&self, sql: &mut SQL) {
        let Where(expression) = self;
        if let Some(expression) = expression {
            sql.append_syntax(" WHERE ");
            expression.to_sql(sql);
        }
    }
}

impl Expression {
    pub fn to_sql(&self, sql: &mut SQL) {
        match &self {
            Expression::And(expressions) => join_to_sql(sql, expressions, "AND "),
            Expression::Or(expressions) => join_to_sql(sql, expressions, "OR "),
            Expression::Nested(expression) => {
                sql.append_syntax("( ");
                expression.to_sql(sql);
                sql.append_syntax(") ");
            }
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                left.to_sql(sql);
                operator.to_sql(sql);
                sql.append_param(right.clone());
                sql.append_syntax(" ");
            }
            Expression::UnaryOperation {
                expression,
                operator,
            } => {
                expression.to_sql(sql);
                operator.to_sql(sql);
            }
            Expression::RawPredicate(predicate) => {
                sql.append_raw(predicate);
                sql.append_syntax(" ");
            }
        }
    }
}

/// The keyword goes strictly between operands, never after the last one.
fn join_to_sql(sql: &mut SQL, expressions: &[Expression], keyword: &str) {
    for (index, expression) in expressions.iter().enumerate() {
        if index > 0 {
            sql.append_syntax(keyword);
        }
        expression.to_sql(sql);
    }
}

impl ColumnName {
    pub fn to_sql(&self, sql: &mut SQL) {
        let ColumnName(name) = self;
        sql.append_syntax(name);
        sql.append_syntax(" ");
    }
}

impl BinaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(&self.0);
        sql.append_syntax(" ");
    }
}

impl UnaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(&self.0);
        sql.append_syntax(" ");
    }
}

impl OrderBy {
    pub fn to_sql(&self, sql: &mut SQL) {
        if !self.elements.is_empty() {
            sql.append_syntax(" ORDER BY ");
            for (index, order_by_item) in self.elements.iter().enumerate() {
                order_by_item.to_sql(sql);
                if index < (self.elements.len() - 1) {
                    sql.append_syntax(", ");
                }
            }
        }
    }
}

impl OrderByElement {
    pub fn to_sql(&self, sql: &mut SQL) {
        let ColumnName(name) = &self.target;
        sql.append_syntax(name);
        self.direction.to_sql(sql);
    }
}

impl OrderByDirection {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            OrderByDirection::Asc => sql.append_syntax(" ASC"),
            OrderByDirection::Desc => sql.append_syntax(" DESC"),
        }
    }
}

impl Limit {
    pub fn to_sql(&self, sql: &mut SQL) {
        let offset = self.offset;
        match (sql.dialect().paging_style(), self.limit) {
            (PagingStyle::OffsetLimit, Some(limit)) => {
                sql.append_syntax(&format!(" OFFSET {offset} LIMIT {limit}"));
            }
            (PagingStyle::OffsetLimit, None) => {
                sql.append_syntax(&format!(" OFFSET {offset}"));
            }
            (PagingStyle::LimitOffset, Some(limit)) => {
                sql.append_syntax(&format!(" LIMIT {limit} OFFSET {offset}"));
            }
            (PagingStyle::LimitOffset, None) => {
                if offset > 0 {
                    sql.append_syntax(&format!(" LIMIT {UNBOUNDED_LIMIT} OFFSET {offset}"));
                }
            }
            (PagingStyle::OffsetFetch, Some(limit)) => {
                sql.append_syntax(&format!(
                    " OFFSET {offset} ROWS FETCH NEXT {limit} ROWS ONLY"
                ));
            }
            (PagingStyle::OffsetFetch, None) => {
                sql.append_syntax(&format!(" OFFSET {offset} ROWS"));
            }
        }
    }
}
