//! Boolean query parsing: split punctuation from text, then normalize each
//! text run through the same pipeline used on document words. A text token
//! that normalizes to nothing blanks itself and, depending on its
//! neighboring operator, blanks that operator too - see [`normalize`].

use crate::pkg::normalize_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    And,
    Or,
    Not,
    Text,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenType,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub tokens: Vec<Token>,
}

/// Parses and normalizes `input` in one step - the only entry point callers
/// outside this module need.
pub fn parse(input: &str) -> Query {
    normalize(lex(input))
}

/// Splits `input` on whitespace and the three operator characters `&`,
/// `|`, `!`, producing `Text` tokens for the runs in between.
fn lex(input: &str) -> Query {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    let mut tokens = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, tokens: &mut Vec<Token>| {
        if !current.is_empty() {
            tokens.push(Token {
                kind: TokenType::Text,
                text: std::mem::take(current),
            });
        }
    };

    for ch in cleaned.chars() {
        match ch {
            '&' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token {
                    kind: TokenType::And,
                    text: "&".to_string(),
                });
            }
            '|' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token {
                    kind: TokenType::Or,
                    text: "|".to_string(),
                });
            }
            '!' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token {
                    kind: TokenType::Not,
                    text: "!".to_string(),
                });
            }
            other => current.push(other),
        }
    }
    flush(&mut current, &mut tokens);

    Query { tokens }
}

/// Normalizes every `Text` token. When normalization empties a text token,
/// that token is blanked along with its "structural partner": a preceding
/// `!`, else a preceding `&`, else a neighboring `|` (the one after it, or
/// the operator itself if this is the query's last token). Blanked tokens
/// are dropped afterwards.
fn normalize(mut query: Query) -> Query {
    let len = query.tokens.len();

    for i in 0..len {
        if query.tokens[i].kind != TokenType::Text {
            continue;
        }

        let normalized = normalize_string(&query.tokens[i].text);
        if !normalized.is_empty() {
            query.tokens[i].text = normalized;
            continue;
        }

        let mut shift = 1usize;

        if let Some(j) = i.checked_sub(shift) {
            if query.tokens[j].kind == TokenType::Not {
                query.tokens[j].text.clear();
                shift = 2;
            }
        }

        if let Some(j) = i.checked_sub(shift) {
            if query.tokens[j].kind == TokenType::And {
                query.tokens[j].text.clear();
            }
        }

        if let Some(j) = i.checked_sub(shift) {
            if query.tokens[j].kind == TokenType::Or {
                if i < len - 1 {
                    query.tokens[i + 1].text.clear();
                } else {
                    query.tokens[j].text.clear();
                }
            }
        }

        query.tokens[i].text.clear();
    }

    query.tokens.retain(|t| !t.text.is_empty());
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_operators_and_text_runs() {
        let q = lex("кошка & собака | !птица");
        let kinds: Vec<TokenType> = q.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenType::Text,
                TokenType::And,
                TokenType::Text,
                TokenType::Or,
                TokenType::Not,
                TokenType::Text,
            ]
        );
    }

    #[test]
    fn normalizes_text_tokens_in_place() {
        let q = parse("кошка и собака");
        // "и" is a stop-word and stems to nothing, so it and the implicit
        // adjacency vanish, leaving two text tokens.
        let texts: Vec<&str> = q
            .tokens
            .iter()
            .filter(|t| t.kind == TokenType::Text)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(texts.len(), 2);
    }

    #[test]
    fn blanking_not_operand_drops_the_not_too() {
        let q = parse("!и & собака");
        let kinds: Vec<TokenType> = q.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenType::And, TokenType::Text]);
    }
}
