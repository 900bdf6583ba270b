//! Level-by-level row layout.
//!
//! A render at level `L` draws three rows with one cell per token:
//!
//! ```text
//! /‾‾‾‾‾‾‾‾‾‾‾‾\      <- block row: groups tokens sharing an ancestor at L
//!  Dogs    bark       <- word row: tokens at L are inverted
//!  NSUBJ  ▪ROOT▪      <- label row: tokens at L show where their head is
//! ```
//!
//! Layout is computed into plain [`Cell`]s first; colour is applied only when
//! the rows are assembled, through a [`Theme`].

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::colour::{Hsv, assign_colours};
use crate::error::Error;
use crate::format::Theme;
use crate::token::Document;
use crate::tree::Tree;

const MERGE: &str = "‾";
const LEFT_EDGE: &str = "/";
const RIGHT_EDGE: &str = "\\ ";
const RIGHT_MERGE: &str = "‾‾";

/// What to draw and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Level to cut at. `None` renders every level from 0 to the tree depth.
    pub max_level: Option<usize>,
    /// Hide the words of every token whose ancestor at the cut carries this label.
    pub blank_label: Option<String>,
    /// Blank out cells of tokens above the cut.
    pub mobile_layout: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { max_level: None, blank_label: None, mobile_layout: true }
    }
}

/// One token's column in a rendered level, before styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub block: String,
    pub word: String,
    pub label: String,
    pub colour: Hsv,
    /// Token sits exactly at the cut level.
    pub boundary: bool,
}

/// All cells for one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub level: usize,
    pub cells: Vec<Cell>,
}

/// The three output lines of one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rows {
    pub block: String,
    pub words: String,
    pub labels: String,
}

fn width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn centre(s: &str, len: usize) -> String {
    let excess = len.saturating_sub(width(s));
    let left = excess / 2;
    let mut out = String::with_capacity(s.len() + excess);
    out.push_str(&" ".repeat(left));
    out.push_str(s);
    out.push_str(&" ".repeat(excess - left));
    out
}

fn blank(s: &str) -> String {
    " ".repeat(width(s))
}

/// Role label for token `i`, decorated with the head direction when the token
/// is at the cut.
fn display_label(label: &str, i: usize, parent: Option<usize>, boundary: bool) -> String {
    if !boundary {
        return format!(" {label} ");
    }
    match parent {
        None => format!("▪{label}▪"),
        Some(h) if h + 1 < i => format!("↰ {label}"),
        Some(h) if h + 1 == i => format!("◄ {label}"),
        Some(h) if h == i + 1 => format!("{label} ►"),
        Some(_) => format!("{label} ↱"),
    }
}

fn block_cell(cell_width: usize, join_prev: bool, join_next: bool) -> String {
    let left = if join_prev { MERGE } else { LEFT_EDGE };
    let right = if join_next { RIGHT_MERGE } else { RIGHT_EDGE };
    if cell_width >= 2 {
        format!("{left}{}{right}", MERGE.repeat(cell_width - 2))
    } else {
        right.to_string()
    }
}

/// Lay out the cells of `doc` cut at `level`.
pub fn layout_level(doc: &Document, tree: &Tree, level: usize, opts: &RenderOptions) -> LevelLayout {
    let colours = assign_colours(tree, level);
    let n = doc.len();
    let ancestors: Vec<usize> = (0..n).map(|i| tree.ancestor_at(i, level)).collect();

    let cells = doc
        .tokens
        .iter()
        .enumerate()
        .map(|(i, tok)| {
            let node = tree.node(i);
            let boundary = node.level == level;
            let label = display_label(&tok.label, i, node.parent, boundary);
            let cell_width = width(&tok.text).max(width(&label));
            let mut word = centre(&tok.text, cell_width);
            let mut label = centre(&label, cell_width);

            let join_prev = i > 0 && ancestors[i] == ancestors[i - 1];
            let join_next = i + 1 < n && ancestors[i] == ancestors[i + 1];
            let mut block = block_cell(cell_width, join_prev, join_next);

            if opts
                .blank_label
                .as_deref()
                .is_some_and(|b| doc.tokens[ancestors[i]].label == b)
            {
                word = blank(&word);
            }

            if opts.mobile_layout && node.level < level {
                block = blank(&block);
                word = blank(&word);
                label = blank(&label);
            }

            Cell { block, word, label, colour: colours[i], boundary }
        })
        .collect();

    LevelLayout { level, cells }
}

impl LevelLayout {
    /// Assemble the styled rows. Word and label cells each get one trailing space.
    pub fn rows(&self, theme: &dyn Theme) -> Rows {
        let mut block = String::new();
        let mut words = String::new();
        let mut labels = String::new();
        for cell in &self.cells {
            block.push_str(&cell.block);
            theme.paint_into(&mut words, &cell.word, cell.colour, cell.boundary);
            words.push(' ');
            theme.paint_into(&mut labels, &cell.label, cell.colour, false);
            labels.push(' ');
        }
        Rows { block, words, labels }
    }
}

/// Write one level's block: a blank line, then the three rows.
pub fn render_level(
    doc: &Document,
    tree: &Tree,
    level: usize,
    opts: &RenderOptions,
    theme: &dyn Theme,
    out: &mut dyn Write,
) -> io::Result<()> {
    let rows = layout_level(doc, tree, level, opts).rows(theme);
    let text = format!("\n{}\n{}\n{}\n", rows.block, rows.words, rows.labels);
    out.write_all(text.as_bytes())
}

/// Render `doc` at the requested level, or at every level in turn.
///
/// The tree is validated before anything is written, so a malformed document
/// produces no output.
pub fn render(
    doc: &Document,
    opts: &RenderOptions,
    theme: &dyn Theme,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let tree = Tree::build(&doc.tokens)?;
    render_tree(doc, &tree, opts, theme, out)?;
    Ok(())
}

/// Like [`render`], for a tree that has already been built from `doc`.
pub fn render_tree(
    doc: &Document,
    tree: &Tree,
    opts: &RenderOptions,
    theme: &dyn Theme,
    out: &mut dyn Write,
) -> io::Result<()> {
    match opts.max_level {
        Some(level) => render_level(doc, tree, level, opts, theme, out),
        None => (0..=tree.depth()).try_for_each(|level| render_level(doc, tree, level, opts, theme, out)),
    }
}
