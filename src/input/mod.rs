pub mod conll;
pub mod json;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::InputError;
use crate::token::Document;

/// Strategy for turning one byte stream into documents.
pub trait DocumentReader {
    /// `name` is only used in error messages.
    fn read_documents(&mut self, reader: &mut dyn BufRead, name: &str)
    -> Result<Vec<Document>, InputError>;
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Analyzer response JSON: one document or an array of documents.
    Json,
    /// CoNLL-U, blank-line separated sentences.
    Conll,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "json" => Some(Format::Json),
            "conll" | "conllu" => Some(Format::Conll),
            _ => None,
        }
    }

    fn reader(self) -> Result<Box<dyn DocumentReader>, InputError> {
        Ok(match self {
            Format::Json => Box::new(json::JsonReader),
            Format::Conll => Box::new(conll::ConllReader::new()?),
        })
    }
}

/// Detect format from a file extension.
pub fn format_from_extension(path: &str) -> Option<Format> {
    let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(Format::Json),
        "conll" | "conllu" => Some(Format::Conll),
        _ => None,
    }
}

/// Where documents come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(String),
}

impl Source {
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" { Source::Stdin } else { Source::File(arg.to_string()) }
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Source::Stdin => "<stdin>",
            Source::File(path) => path,
        }
    }

    /// Explicit format wins; otherwise guess from the extension, falling back to JSON.
    pub fn format(&self, explicit: Option<Format>) -> Format {
        explicit
            .or_else(|| match self {
                Source::File(path) => format_from_extension(path),
                Source::Stdin => None,
            })
            .unwrap_or(Format::Json)
    }

    /// Read every document from this source.
    pub fn read(&self, explicit: Option<Format>) -> Result<Vec<Document>, InputError> {
        let name = self.name();
        let mut reader: Box<dyn BufRead> = match self {
            Source::Stdin => Box::new(BufReader::new(io::stdin())),
            Source::File(path) => {
                let file = File::open(path)
                    .map_err(|source| InputError::Io { path: path.clone(), source })?;
                Box::new(BufReader::new(file))
            }
        };
        self.format(explicit).reader()?.read_documents(reader.as_mut(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extension_detection() {
        assert_eq!(format_from_extension("out/parse.json"), Some(Format::Json));
        assert_eq!(format_from_extension("ud/en.CONLLU"), Some(Format::Conll));
        assert_eq!(format_from_extension("notes.txt"), None);
        assert_eq!(format_from_extension("noext"), None);
    }

    #[test]
    fn source_format_precedence() {
        let src = Source::from_arg("a.conll");
        assert_eq!(src.format(None), Format::Conll);
        assert_eq!(src.format(Some(Format::Json)), Format::Json);
        assert_eq!(Source::from_arg("-").format(None), Format::Json);
        assert_eq!(Source::from_arg("a.txt").format(None), Format::Json);
    }

    #[test]
    fn reads_file_by_extension() {
        let mut f = tempfile::Builder::new().suffix(".conllu").tempfile().unwrap();
        writeln!(f, "1\tHi\thi\tINTJ\t_\t_\t0\troot\t_\t_").unwrap();
        let path = f.path().to_str().unwrap().to_string();
        let docs = Source::File(path).read(None).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].tokens[0].label, "ROOT");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Source::from_arg("/nonexistent/depviz.json").read(None).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
        assert!(err.to_string().starts_with("/nonexistent/depviz.json: "));
    }
}
