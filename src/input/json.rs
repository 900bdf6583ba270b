use std::io::BufRead;

use serde::Deserialize;

use super::DocumentReader;
use crate::error::InputError;
use crate::token::{Document, Token};

/// Reader for syntax-analysis responses.
///
/// Accepts a single response object with a `tokens` array, or an array of
/// such objects. Only `text.content` and `dependencyEdge` are used; any other
/// fields (`sentences`, `partOfSpeech`, `lemma`, ...) are ignored.
pub struct JsonReader;

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    One(RawDocument),
    Many(Vec<RawDocument>),
}

#[derive(Deserialize)]
struct RawDocument {
    tokens: Vec<RawToken>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawToken {
    text: RawText,
    dependency_edge: RawEdge,
}

#[derive(Deserialize)]
struct RawText {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEdge {
    #[serde(default)]
    head_token_index: i64,
    #[serde(default)]
    label: String,
}

impl DocumentReader for JsonReader {
    fn read_documents(
        &mut self,
        reader: &mut dyn BufRead,
        name: &str,
    ) -> Result<Vec<Document>, InputError> {
        let payload: Payload = serde_json::from_reader(reader)
            .map_err(|source| InputError::Json { path: name.to_string(), source })?;
        let raw = match payload {
            Payload::One(doc) => vec![doc],
            Payload::Many(docs) => docs,
        };
        raw.into_iter().map(|doc| convert(doc, name)).collect()
    }
}

fn convert(doc: RawDocument, name: &str) -> Result<Document, InputError> {
    let tokens = doc
        .tokens
        .into_iter()
        .enumerate()
        .map(|(index, t)| {
            let head = usize::try_from(t.dependency_edge.head_token_index).map_err(|_| {
                InputError::NegativeHead {
                    path: name.to_string(),
                    index,
                    head: t.dependency_edge.head_token_index,
                }
            })?;
            Ok(Token { text: t.text.content, label: t.dependency_edge.label, head })
        })
        .collect::<Result<Vec<_>, InputError>>()?;
    Ok(Document::new(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(src: &str) -> Result<Vec<Document>, InputError> {
        JsonReader.read_documents(&mut src.as_bytes(), "test.json")
    }

    const HAMMER: &str = r#"{
        "sentences": [{"text": {"content": "A hammer is a tool.", "beginOffset": -1}}],
        "tokens": [
            {"text": {"content": "A", "beginOffset": -1}, "partOfSpeech": {"tag": "DET"},
             "dependencyEdge": {"headTokenIndex": 1, "label": "DET"}, "lemma": "A"},
            {"text": {"content": "hammer"}, "dependencyEdge": {"headTokenIndex": 2, "label": "NSUBJ"}},
            {"text": {"content": "is"}, "dependencyEdge": {"headTokenIndex": 2, "label": "ROOT"}},
            {"text": {"content": "a"}, "dependencyEdge": {"headTokenIndex": 4, "label": "DET"}},
            {"text": {"content": "tool"}, "dependencyEdge": {"headTokenIndex": 2, "label": "ATTR"}},
            {"text": {"content": "."}, "dependencyEdge": {"headTokenIndex": 2, "label": "P"}}
        ],
        "language": "en"
    }"#;

    #[test]
    fn single_response() {
        let docs = read(HAMMER).unwrap();
        assert_eq!(docs, vec![crate::token::hammer_sentence()]);
    }

    #[test]
    fn array_of_responses() {
        let docs = read(&format!("[{HAMMER}, {HAMMER}]")).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1], crate::token::hammer_sentence());
    }

    #[test]
    fn missing_tokens_is_an_error() {
        let err = read(r#"{"sentences": []}"#).unwrap_err();
        assert!(matches!(err, InputError::Json { .. }));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = read("{ \"tokens\": [").unwrap_err();
        assert!(err.to_string().starts_with("test.json: invalid JSON"));
    }

    #[test]
    fn omitted_head_index_means_token_zero() {
        // Zero-valued fields are left out of the analyzer's JSON.
        let src = r#"{"tokens": [
            {"text": {"content": "Stop"}, "dependencyEdge": {"label": "ROOT"}},
            {"text": {"content": "now"}, "dependencyEdge": {"label": "ADVMOD"}},
            {"text": {"content": "!"}, "dependencyEdge": {}}
        ]}"#;
        let docs = read(src).unwrap();
        let heads: Vec<usize> = docs[0].tokens.iter().map(|t| t.head).collect();
        assert_eq!(heads, vec![0, 0, 0]);
        assert_eq!(docs[0].tokens[2].label, "");
    }

    #[test]
    fn negative_head_rejected() {
        let src = r#"{"tokens": [{"text": {"content": "x"},
                                   "dependencyEdge": {"headTokenIndex": -1, "label": "ROOT"}}]}"#;
        let err = read(src).unwrap_err();
        assert!(matches!(err, InputError::NegativeHead { index: 0, head: -1, .. }));
    }
}
