use std::env;
use std::process;

use crate::format::ColorMode;
use crate::input::{Format, Source};
use crate::render::RenderOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub options: RenderOptions,
    pub color: ColorMode,
    pub input_format: Option<Format>,
    pub sources: Vec<Source>,
    pub verbose: bool,
    /// Render the built-in sample sentence instead of reading input.
    pub demo: bool,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Render(Args),
    Help,
    Version,
}

/// Parse the process arguments, exiting with status 2 on a usage error.
pub fn parse_args() -> Command {
    let args: Vec<String> = env::args().skip(1).collect();
    match parse_from(&args) {
        Ok(cmd) => cmd,
        Err(msg) => {
            eprintln!("depviz: {}", msg);
            eprintln!("Try 'depviz --help' for usage.");
            process::exit(2);
        }
    }
}

/// Parse arguments (without the program name).
pub fn parse_from(args: &[String]) -> Result<Command, String> {
    let mut options = RenderOptions::default();
    let mut color = ColorMode::Auto;
    let mut input_format: Option<Format> = None;
    let mut files: Vec<String> = Vec::new();
    let mut verbose = false;
    let mut demo = false;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];

        if arg == "--" {
            // Everything after -- is a file operand
            files.extend(args[i + 1..].iter().cloned());
            break;
        }

        // `--flag=value` and `--flag value` are both accepted for long options.
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f, Some(v.to_string())),
            _ => (arg.as_str(), None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            if let Some(v) = inline.clone() {
                return Ok(v);
            }
            i += 1;
            args.get(i).cloned().ok_or_else(|| format!("{} requires an argument", name))
        };

        match flag {
            "-l" | "--level" => {
                let v = value(flag)?;
                let level = v
                    .parse::<usize>()
                    .map_err(|_| format!("invalid level '{}': expected a non-negative integer", v))?;
                options.max_level = Some(level);
            }
            "-b" | "--blank" => {
                let v = value(flag)?;
                options.blank_label = (!v.is_empty()).then_some(v);
            }
            "--full" => options.mobile_layout = false,
            "--mobile" => options.mobile_layout = true,
            "--color" | "--colour" => {
                let v = value(flag)?;
                color = ColorMode::parse(&v)
                    .ok_or_else(|| format!("unknown color mode: {} (auto, always, never)", v))?;
            }
            "-i" => {
                let v = value(flag)?;
                input_format = Some(
                    Format::parse(&v)
                        .ok_or_else(|| format!("unknown input format: {} (json, conll)", v))?,
                );
            }
            "-v" | "--verbose" => verbose = true,
            "--demo" => demo = true,
            "-h" | "--help" => return Ok(Command::Help),
            "--version" => return Ok(Command::Version),
            "-" => files.push(arg.clone()),
            _ if arg.starts_with('-') => return Err(format!("unknown option: {}", arg)),
            _ => files.push(arg.clone()),
        }

        i += 1;
    }

    let sources = if files.is_empty() {
        vec![Source::Stdin]
    } else {
        files.iter().map(|f| Source::from_arg(f)).collect()
    };

    Ok(Command::Render(Args { options, color, input_format, sources, verbose, demo }))
}

pub fn print_usage() {
    println!(
        "depviz {} — dependency parses as terminal diagrams",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage: depviz [options] [file ...]");
    println!();
    println!("Options:");
    println!("  -l, --level N     Render only tree level N (default: every level)");
    println!("  -b, --blank LABEL Hide words under any level-N ancestor labelled LABEL");
    println!("  --full            Keep cells above the rendered level visible");
    println!("  --color WHEN      auto, always or never (NO_COLOR honoured in auto)");
    println!("  -i FORMAT         Input format: json, conll (default: from extension)");
    println!("  -v, --verbose     Print a tree summary per document to stderr");
    println!("  --demo            Render a built-in sample sentence");
    println!("  -h, --help        Show this help");
    println!();
    println!("  Reads stdin when no file (or '-') is given.");
    println!("  JSON input is a syntax-analysis response, or an array of them.");
    println!();
    println!("Examples:");
    println!("  depviz parse.json");
    println!("  depviz -l 1 --blank NSUBJ parse.json");
    println!("  depviz -i conll < en_ewt-ud-dev.conllu");
}
