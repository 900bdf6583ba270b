use std::env;
use std::io::{self, IsTerminal, Write};
use std::process;

use depviz::cli::{self, Command};
use depviz::error::Error;
use depviz::format::AnsiTheme;
use depviz::render;
use depviz::token::{self, Document};
use depviz::tree::Tree;

/// Report `err` unless it is a closed pipe, then exit with its status.
fn exit_with(err: Error) -> ! {
    if err.is_reported() {
        eprintln!("depviz: {}", err);
    }
    process::exit(err.exit_code());
}

/// Render every document, reporting per-document tree errors on stderr.
/// Returns false if any document failed. Write errors end the process.
fn render_all(
    name: &str,
    docs: &[Document],
    args: &cli::Args,
    theme: &AnsiTheme,
    out: &mut dyn Write,
) -> bool {
    let mut ok = true;
    for (n, doc) in docs.iter().enumerate() {
        // Documents are numbered in diagnostics only when a source holds several.
        let label = if docs.len() > 1 { format!("{} [{}]", name, n + 1) } else { name.to_string() };

        let tree = match Tree::build(&doc.tokens) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("depviz: {}: {}", label, e);
                ok = false;
                continue;
            }
        };
        if args.verbose {
            eprintln!("depviz: {}: {}", label, tree.summary());
        }

        if let Err(e) = render::render_tree(doc, &tree, &args.options, theme, out) {
            exit_with(Error::from(e));
        }
    }
    ok
}

fn main() {
    let args = match cli::parse_args() {
        Command::Help => {
            cli::print_usage();
            return;
        }
        Command::Version => {
            println!("depviz {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Command::Render(args) => args,
    };

    let no_color = env::var("NO_COLOR").ok();
    let colorterm = env::var("COLORTERM").ok();
    let theme = AnsiTheme::select(
        args.color,
        no_color.as_deref(),
        colorterm.as_deref(),
        io::stdout().is_terminal(),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut ok = true;

    if args.demo {
        ok = render_all("<demo>", &[token::hammer_sentence()], &args, &theme, &mut out);
    } else {
        for source in &args.sources {
            let docs = match source.read(args.input_format) {
                Ok(d) => d,
                Err(e) => exit_with(Error::from(e)),
            };
            ok &= render_all(source.name(), &docs, &args, &theme, &mut out);
        }
    }

    if let Err(e) = out.flush() {
        exit_with(Error::from(e));
    }
    if !ok {
        process::exit(1);
    }
}
