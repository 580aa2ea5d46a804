//! `katie`: builds a piecewise-linear triangulation from a planar-diagram
//! code and a framing sequence, and prints either its iso-sig or the raw
//! edge-coloured graph gluing list.

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use color_eyre::eyre::Result;
use link_graph::{build_graph, build_triangulation, Dim, LinkGraphError};

/// Kirby-diagram-to-triangulation builder.
#[derive(Parser)]
#[command(name = "katie", about, disable_version_flag = true)]
struct Args {
    /// The planar-diagram code, e.g. "(4,8,1,9),(9,3,10,4),..."
    pd_code: String,

    /// Whitespace-separated framing tokens, one per link component
    /// ("x"/"." for a 1-handle, an integer for a 2-handle).
    framings: String,

    /// Dim-3 output (integer Dehn surgery).
    #[arg(short = '3', long = "dim3", conflicts_with = "dim4")]
    dim3: bool,

    /// Dim-4 output (default).
    #[arg(short = '4', long = "dim4")]
    dim4: bool,

    /// Emit the edge-coloured graph's gluing list instead of an iso-sig.
    #[arg(short = 'g', long = "graph")]
    graph: bool,

    /// Progress to stderr.
    #[arg(short = 'V', long = "verbose")]
    verbose: bool,

    /// Print version and exit.
    #[arg(short = 'v', short_alias = '?', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let dim = if args.dim3 { Dim::Three } else { Dim::Four };

    if args.graph {
        let g = match build_graph(&args.pd_code, &args.framings, dim) {
            Ok(g) => g,
            Err(e) => return Err(report_error(&args.pd_code, e)),
        };
        let max_colour = if dim == Dim::Three { 3 } else { 4 };
        for (from, to, colour) in g.gluing_list(max_colour) {
            println!("{from} {to} {colour}");
        }
    } else {
        let t = match build_triangulation(&args.pd_code, &args.framings, dim) {
            Ok(t) => t,
            Err(e) => return Err(report_error(&args.pd_code, e)),
        };
        println!("{}", t.iso_sig());
    }

    Ok(())
}

/// Pretty-prints a diagnostic for PD-code-shaped errors via `ariadne`, then
/// wraps the error for `color-eyre` to surface on exit.
fn report_error(pd_code: &str, err: LinkGraphError) -> color_eyre::Report {
    if matches!(err, LinkGraphError::MalformedPd) {
        let _ = Report::build(ReportKind::Error, ("<pd-code>", 0..pd_code.len()))
            .with_message("malformed PD code or framing sequence")
            .with_label(
                Label::new(("<pd-code>", 0..pd_code.len()))
                    .with_message("expected groups of four integers, separated by punctuation")
                    .with_color(Color::Red),
            )
            .finish()
            .eprint(("<pd-code>", Source::from(pd_code)));
    }
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dim3_and_verbose_flags_parse() {
        let args = Args::try_parse_from(["katie", "(1,2,3,4)", "0", "-3", "-V"]).unwrap();
        assert!(args.dim3);
        assert!(args.verbose);
        assert!(!args.graph);
    }

    #[test]
    fn dim3_and_dim4_are_mutually_exclusive() {
        assert!(Args::try_parse_from(["katie", "(1,2,3,4)", "0", "-3", "-4"]).is_err());
    }

    #[test]
    fn graph_flag_parses_with_long_form() {
        let args = Args::try_parse_from(["katie", "(1,2,3,4)", "0", "--graph"]).unwrap();
        assert!(args.graph);
    }
}
