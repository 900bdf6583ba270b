use std::io::BufRead;

use regex::Regex;

use super::DocumentReader;
use crate::error::InputError;
use crate::token::{Document, Token};

/// Plain word ids (`3`); ranges (`3-4`) and empty nodes (`3.1`) carry a separator.
const WORD_ID: &str = r"^(\d+)(?:[-.]\d+)?$";

/// CoNLL-U reader.
///
/// All sentences of a file go into a single document. Per-sentence 1-based
/// HEAD values are rebased onto document-wide indices and HEAD `0` becomes a
/// self-reference, which is how the analyzer JSON marks roots.
pub struct ConllReader {
    word_id: Regex,
    buf: String,
}

impl ConllReader {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(ConllReader { word_id: Regex::new(WORD_ID)?, buf: String::with_capacity(256) })
    }
}

struct Sentence {
    /// Document index of the sentence's first word.
    offset: usize,
    /// (line number, text, label, 1-based head, 1-based id) per word.
    words: Vec<(usize, String, String, usize, usize)>,
}

impl Sentence {
    fn new(offset: usize) -> Self {
        Sentence { offset, words: Vec::new() }
    }

    fn flush(&mut self, tokens: &mut Vec<Token>, name: &str) -> Result<(), InputError> {
        let len = self.words.len();
        for (n, (line, text, label, head, id)) in self.words.drain(..).enumerate() {
            if id != n + 1 {
                return Err(InputError::Conll {
                    path: name.to_string(),
                    line,
                    message: format!("word id {id} out of sequence, expected {}", n + 1),
                });
            }
            if head > len {
                return Err(InputError::Conll {
                    path: name.to_string(),
                    line,
                    message: format!("head {head} outside sentence of {len} words"),
                });
            }
            let head = if head == 0 { tokens.len() } else { self.offset + head - 1 };
            tokens.push(Token { text, label, head });
        }
        self.offset = tokens.len();
        Ok(())
    }
}

impl DocumentReader for ConllReader {
    fn read_documents(
        &mut self,
        reader: &mut dyn BufRead,
        name: &str,
    ) -> Result<Vec<Document>, InputError> {
        let mut tokens = Vec::new();
        let mut sentence = Sentence::new(0);
        let mut line_no = 0;

        loop {
            self.buf.clear();
            let bytes = reader
                .read_line(&mut self.buf)
                .map_err(|source| InputError::Io { path: name.to_string(), source })?;
            if bytes == 0 {
                break;
            }
            line_no += 1;
            let line = self.buf.trim_end_matches(['\n', '\r']);

            if line.trim().is_empty() {
                sentence.flush(&mut tokens, name)?;
                continue;
            }
            if line.starts_with('#') {
                continue;
            }

            let cols: Vec<&str> = line.split('\t').collect();
            if cols.len() < 8 {
                return Err(InputError::Conll {
                    path: name.to_string(),
                    line: line_no,
                    message: format!("expected at least 8 tab-separated columns, found {}", cols.len()),
                });
            }
            let Some(caps) = self.word_id.captures(cols[0]) else {
                return Err(InputError::Conll {
                    path: name.to_string(),
                    line: line_no,
                    message: format!("bad word id '{}'", cols[0]),
                });
            };
            if caps[0].len() != caps[1].len() {
                // multiword range or empty node
                continue;
            }
            let parse_num = |s: &str, what: &str| {
                s.parse::<usize>().map_err(|_| InputError::Conll {
                    path: name.to_string(),
                    line: line_no,
                    message: format!("bad {what} '{s}'"),
                })
            };
            let id = parse_num(&caps[1], "word id")?;
            let head = parse_num(cols[6], "head")?;
            let label = cols[7].split(':').next().unwrap_or_default().to_ascii_uppercase();
            sentence.words.push((line_no, cols[1].to_string(), label, head, id));
        }
        sentence.flush(&mut tokens, name)?;

        Ok(vec![Document::new(tokens)])
    }
}
