use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use rewritemap::config::Config;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

const EXAMPLE: &str = "Example contents:

/some/old/url/   /new/url
/another/url   /another/new/url
...   ...

NOTE: hostnames will be omitted in result xml url map.";

#[derive(Parser)]
#[command(
    name = "rewritemap",
    about = "Convert a text list of URL redirects into a rewrite-map config",
    after_help = EXAMPLE
)]
struct Cli {
    /// Text file with one `old new` redirect per line
    input: PathBuf,

    /// Output file (default: RewriteMaps.config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rewrite map name (default: input file name without extension)
    #[arg(long)]
    map_name: Option<String>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn usage() -> ! {
    println!("ERROR: no input file. Provide path to the txt file with url map.");
    println!("{}", Cli::command().render_usage());
    println!();
    println!("{}", EXAMPLE);
    process::exit(2);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => usage(),
    };

    let mut config = Config::discover(cli.config.as_deref()).unwrap_or_else(|e| die(&e.to_string()));

    // CLI overrides
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(name) = cli.map_name {
        config.map_name = Some(name);
    }

    let conversion = match rewritemap::run(&cli.input, &config) {
        Ok(conversion) => conversion,
        Err(e @ rewritemap::Error::Read { .. }) => {
            println!("{}", EXAMPLE);
            die(&e.to_string())
        }
        Err(e) => die(&e.to_string()),
    };

    for line in rewritemap::report::render(&conversion) {
        println!("{}", line);
    }
    println!("OK! \"{}\" created successfully.", config.output.display());
}
