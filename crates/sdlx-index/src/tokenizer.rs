//! Tokenizer for GraphQL identifiers and prose.
//!
//! Text is split into alphanumeric words. A word written in camelCase or
//! PascalCase yields the whole word followed by each of its parts, so
//! `createUser` produces `createUser`, `create` and `User`. Runs of capitals
//! stay together until the last capital that starts a lowercase part:
//! `HTTPServer` splits into `HTTP` and `Server`.

use tantivy::tokenizer::{Token, TokenStream, Tokenizer};

/// Splits text on non-alphanumeric characters and identifier case changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierTokenizer;

/// Token stream over precomputed identifier tokens.
pub struct IdentifierTokenStream {
    /// Tokens in emission order.
    tokens: Vec<Token>,
    /// Number of tokens consumed so far.
    consumed: usize,
}

impl Tokenizer for IdentifierTokenizer {
    type TokenStream<'a> = IdentifierTokenStream;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        IdentifierTokenStream {
            tokens: tokenize(text),
            consumed: 0,
        }
    }
}

impl TokenStream for IdentifierTokenStream {
    fn advance(&mut self) -> bool {
        if self.consumed < self.tokens.len() {
            self.consumed += 1;
            true
        } else {
            false
        }
    }

    fn token(&self) -> &Token {
        &self.tokens[self.consumed.saturating_sub(1)]
    }

    fn token_mut(&mut self) -> &mut Token {
        let index = self.consumed.saturating_sub(1);
        &mut self.tokens[index]
    }
}

/// Splits `text` into word tokens, adding the parts of compound identifiers.
fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut position = 0;

    for (start, word) in words(text) {
        let parts = identifier_parts(word);
        if parts.len() > 1 {
            tokens.push(token(text, start, start + word.len(), position));
        }
        for (from, to) in parts {
            tokens.push(token(text, start + from, start + to, position));
            position += 1;
        }
    }

    tokens
}

/// Builds a token for the byte range `from..to` of `text`.
fn token(text: &str, from: usize, to: usize, position: usize) -> Token {
    Token {
        offset_from: from,
        offset_to: to,
        position,
        text: text[from..to].to_string(),
        position_length: 1,
    }
}

/// Returns each maximal alphanumeric run with its byte offset.
fn words(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;

    for (offset, ch) in text.char_indices() {
        match (ch.is_alphanumeric(), start) {
            (true, None) => start = Some(offset),
            (false, Some(from)) => {
                words.push((from, &text[from..offset]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(from) = start {
        words.push((from, &text[from..]));
    }

    words
}

/// Returns the byte ranges of the case-delimited parts of `word`.
fn identifier_parts(word: &str) -> Vec<(usize, usize)> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let (offset, current) = chars[i];
        let previous = chars[i - 1].1;
        let next_is_lower = chars.get(i + 1).is_some_and(|&(_, c)| c.is_lowercase());

        let lower_to_upper = (previous.is_lowercase() || previous.is_numeric()) && current.is_uppercase();
        let acronym_end = previous.is_uppercase() && current.is_uppercase() && next_is_lower;
        if lower_to_upper || acronym_end {
            parts.push((start, offset));
            start = offset;
        }
    }
    parts.push((start, word.len()));

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn splits_camel_and_pascal_case() {
        assert_eq!(texts("createUser"), ["createUser", "create", "User"]);
        assert_eq!(texts("UserInput"), ["UserInput", "User", "Input"]);
        assert_eq!(texts("HTTPServer"), ["HTTPServer", "HTTP", "Server"]);
        assert_eq!(texts("user2Id"), ["user2Id", "user2", "Id"]);
    }

    #[test]
    fn plain_words_are_emitted_once() {
        assert_eq!(texts("user ID RUNNING"), ["user", "ID", "RUNNING"]);
    }

    #[test]
    fn splits_on_punctuation() {
        assert_eq!(
            texts("Mutation.createUser(input: UserInput!)"),
            [
                "Mutation", "createUser", "create", "User", "input", "UserInput", "User", "Input"
            ]
        );
        assert_eq!(texts("@auth"), ["auth"]);
    }

    #[test]
    fn parts_share_the_compound_position() {
        let tokens = tokenize("a createUser b");
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, [0, 1, 1, 2, 3]);
        assert_eq!((tokens[3].offset_from, tokens[3].offset_to), (8, 12));
    }

    #[test]
    fn stream_yields_every_token() {
        let mut tokenizer = IdentifierTokenizer;
        let mut stream = tokenizer.token_stream("getUserById");
        let mut seen = Vec::new();
        while stream.advance() {
            seen.push(stream.token().text.clone());
        }
        assert_eq!(seen, ["getUserById", "get", "User", "By", "Id"]);
    }
}
