//! Boolean evaluation of a parsed [`Query`] against an [`IndexData`]'s
//! postings. `|` has lower precedence than `&`: a query is first split on
//! `|`, and each side is evaluated as an (implicit) AND of its remaining
//! tokens.

use std::collections::HashSet;

use super::data::IndexData;
use super::query::{Query, Token, TokenType};

/// Evaluates `query` and returns the matching document IDs.
pub fn evaluate(data: &IndexData, query: &Query) -> HashSet<u64> {
    if contains(query, TokenType::Or) {
        return handle_or(data, query);
    }
    if contains(query, TokenType::And) {
        return handle_and(data, query);
    }
    handle_base_case(data, query)
}

fn handle_base_case(data: &IndexData, query: &Query) -> HashSet<u64> {
    if query.tokens.is_empty() {
        return HashSet::new();
    }

    let (text_token, negate): (&Token, bool) = match query.tokens[0].kind {
        TokenType::Not => match query.tokens.get(1) {
            Some(t) if t.kind == TokenType::Text => (t, true),
            _ => return HashSet::new(),
        },
        TokenType::Text => (&query.tokens[0], false),
        _ => return HashSet::new(),
    };

    let matches = data
        .postings(&text_token.text)
        .cloned()
        .unwrap_or_default();

    if negate {
        data.doc_ids().difference(&matches).copied().collect()
    } else {
        matches
    }
}

fn handle_or(data: &IndexData, query: &Query) -> HashSet<u64> {
    let mut result = HashSet::new();
    for sub in split(query, TokenType::Or) {
        result.extend(evaluate(data, &sub));
    }
    result
}

fn handle_and(data: &IndexData, query: &Query) -> HashSet<u64> {
    let mut result: Option<HashSet<u64>> = None;
    for sub in split(query, TokenType::And) {
        let current = evaluate(data, &sub);
        result = Some(match result {
            None => current,
            Some(prev) => prev.intersection(&current).copied().collect(),
        });
    }
    result.unwrap_or_default()
}

fn split(query: &Query, op: TokenType) -> Vec<Query> {
    let mut subqueries = Vec::new();
    let mut start = 0;

    for (i, token) in query.tokens.iter().enumerate() {
        if token.kind == op {
            if i > start {
                subqueries.push(Query {
                    tokens: query.tokens[start..i].to_vec(),
                });
            }
            start = i + 1;
        }
    }

    if start < query.tokens.len() {
        subqueries.push(Query {
            tokens: query.tokens[start..].to_vec(),
        });
    }

    subqueries
}

fn contains(query: &Query, op: TokenType) -> bool {
    query.tokens.iter().any(|t| t.kind == op)
}
