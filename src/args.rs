use std::path::PathBuf;
use clap::{Arg, Command};
use crate::config::{Args, DEFAULT_SAMPLE};
use crate::io::print_error;

fn command() -> Command {
    Command::new("plntmap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate sitemap.xml for the static site in the current directory.")
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_parser(clap::value_parser!(String))
                .value_name("SITE_DIR")
                .help("Site root to scan (defaults to current directory if not provided)"),
        )
        .arg(
            Arg::new("lastmod")
                .long("lastmod")
                .action(clap::ArgAction::SetTrue)
                .help("Adds <lastmod> from each page's modification time"),
        )
        .arg(
            Arg::new("sample")
                .long("sample")
                .value_parser(clap::value_parser!(usize))
                .value_name("COUNT")
                .default_value("5")
                .help("Number of generated URLs to print after writing"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Enables verbose output"),
        )
}

/// parse command line arguments
pub fn parse_args() -> Args {
    args_from(command().get_matches())
}

fn args_from(matches: clap::ArgMatches) -> Args {
    let root_str = matches
        .get_one::<String>("root")
        .cloned()
        .unwrap_or_else(|| {
            std::env::current_dir()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|_| {
                    print_error("Unable to determine the current directory.");
                    std::process::exit(1);
                })
        });

    Args {
        root: PathBuf::from(root_str),
        lastmod: matches.get_flag("lastmod"),
        sample: matches.get_one::<usize>("sample").copied().unwrap_or(DEFAULT_SAMPLE),
        verbose: matches.get_flag("verbose"),
    }
}
