//! Handle filtering/where clauses translation.

use query_engine_models::{Filter, FilterNode, Logic, QueryDescription};
use query_engine_sql::sql;

use super::error::Error;
use super::helpers::Env;
use super::values;

/// Translate a filter node. A group is always parenthesized.
pub fn translate_filter_node(env: &Env, node: &FilterNode) -> Result<sql::ast::Expression, Error> {
    match node {
        FilterNode::Leaf {
            field,
            operator,
            value,
        } => translate_leaf(env, field, operator, value),
        FilterNode::Group { logic, children } => {
            if children.is_empty() {
                return Err(Error::MalformedFilterNode(
                    "a group must have at least one child".to_string(),
                ));
            }
            Ok(sql::helpers::nested(join(
                *logic,
                translate_children(env, children)?,
            )))
        }
    }
}

/// Translate the root of a filter tree. Its children are joined with the root
/// logic, without parentheses around them.
pub fn translate_filter(env: &Env, filter: &Filter) -> Result<sql::ast::Expression, Error> {
    Ok(join(filter.logic(), translate_children(env, &filter.filters)?))
}

/// Build the WHERE clause: the caller's predicate, if any, ANDed with the client's
/// filter tree.
pub fn translate_where(
    env: &Env,
    description: &QueryDescription,
    predicate: Option<&sql::ast::RawPredicate>,
) -> Result<sql::ast::Where, Error> {
    let mut conditions = vec![];

    if let Some(predicate) = predicate {
        let placeholders = sql::rebind::placeholder_count(&predicate.sql, env.dialect);
        if placeholders != predicate.params.len() {
            return Err(Error::PlaceholderMismatch {
                placeholders,
                parameters: predicate.params.len(),
            });
        }
        if env.dialect.bind_style() == sql::dialect::BindStyle::Question
            && sql::rebind::has_escaped_question(&predicate.sql, env.dialect)
        {
            return Err(Error::AmbiguousQuestionMark(env.dialect));
        }
        if !predicate.sql.trim().is_empty() {
            let expression = sql::ast::Expression::RawPredicate(predicate.clone());
            conditions.push(if sql::rebind::has_top_level_or(&predicate.sql, env.dialect) {
                sql::helpers::nested(expression)
            } else {
                expression
            });
        }
    }

    if description.is_filtered() {
        let filter = translate_filter(env, &description.filter)?;
        conditions.push(
            if !conditions.is_empty() && sql::helpers::needs_parentheses_for_and(&filter) {
                sql::helpers::nested(filter)
            } else {
                filter
            },
        );
    }

    if conditions.is_empty() {
        Ok(sql::helpers::empty_where())
    } else {
        Ok(sql::ast::Where(Some(sql::helpers::conjunction(conditions))))
    }
}

fn translate_children(
    env: &Env,
    children: &[FilterNode],
) -> Result<Vec<sql::ast::Expression>, Error> {
    children
        .iter()
        .map(|child| translate_filter_node(env, child))
        .collect()
}

fn join(logic: Logic, expressions: Vec<sql::ast::Expression>) -> sql::ast::Expression {
    match logic {
        Logic::And => sql::helpers::conjunction(expressions),
        Logic::Or => sql::helpers::disjunction(expressions),
    }
}

fn translate_leaf(
    env: &Env,
    field: &str,
    operator: &str,
    value: &serde_json::Value,
) -> Result<sql::ast::Expression, Error> {
    let descriptor = env.operators.lookup(operator)?;
    let column = sql::ast::ColumnName(field.to_string());

    if descriptor.is_unary {
        Ok(sql::ast::Expression::UnaryOperation {
            expression: column,
            operator: sql::ast::UnaryOperator(descriptor.sql_operator.clone()),
        })
    } else {
        let value = values::stringify(field, operator, value)?;
        Ok(sql::ast::Expression::BinaryOperation {
            left: column,
            operator: sql::ast::BinaryOperator(descriptor.sql_operator.clone()),
            right: sql::string::Param::String(descriptor.decorate(&value)),
        })
    }
}
