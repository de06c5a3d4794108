use artgal::gallery::Gallery;
use artgal::runtime::Dispatcher;
use artgal::source::HttpSource;
use artgal::config::ClientConfig;
use artgal::{config, output, render, session};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let hash = env!("ARTGAL_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{}+{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "artgal")]
#[command(about = "Browse the Art Institute of Chicago collection")]
#[command(long_about = "\
Browse the Art Institute of Chicago collection

Every command writes the resulting gallery page (cards, pager, detail view)
to an HTML file and prints a text summary.

  artgal browse --page 3          Third page of the full collection
  artgal search \"water lilies\"    Full-text search, first page
  artgal detail 16568             One artwork's details
  artgal session                  Interactive: search, next, prev, more <id>, close

Run 'artgal gen-config' to print a documented config file.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (missing file means stock defaults)
    #[arg(long, default_value = "artgal.toml", global = true)]
    config: PathBuf,

    /// Where to write the rendered gallery page
    #[arg(long, default_value = "gallery.html", global = true)]
    output: PathBuf,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the whole collection, one page at a time
    Browse {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Full-text search
    Search {
        text: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one artwork, by id or detail link
    Detail { target: String },
    /// Interactive session on stdin
    Session,
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::GenConfig => print!("{}", config::stock_config_toml()),
        Command::Browse { page } => {
            let (client_config, dispatcher) = connect(&cli.config)?;
            let mut gallery = Gallery::from_config(&client_config).with_initial_page(page);
            gallery.start();
            dispatcher.settle(&mut gallery);
            write_snapshot(&cli.output, &gallery)?;
            output::print_listing(&gallery);
        }
        Command::Search { text, page } => {
            let (client_config, dispatcher) = connect(&cli.config)?;
            let mut gallery = Gallery::from_config(&client_config)
                .with_query(&text)
                .with_initial_page(page);
            gallery.start();
            dispatcher.settle(&mut gallery);
            write_snapshot(&cli.output, &gallery)?;
            output::print_listing(&gallery);
        }
        Command::Detail { target } => {
            let (client_config, dispatcher) = connect(&cli.config)?;
            let mut gallery = Gallery::from_config(&client_config);
            let link = match target.parse::<u64>() {
                Ok(id) => gallery.endpoints().detail_url(id),
                Err(_) => target,
            };
            gallery.show_details(&link);
            dispatcher.settle(&mut gallery);
            write_snapshot(&cli.output, &gallery)?;
            match gallery.modal().content() {
                Some(view) => output::print_detail(view),
                None => eprintln!("No details loaded for {link}"),
            }
        }
        Command::Session => {
            let (client_config, dispatcher) = connect(&cli.config)?;
            let mut gallery = Gallery::from_config(&client_config);
            let stdin = std::io::stdin();
            println!("Writing gallery to {} (type 'help' for commands)", cli.output.display());
            session::run(
                &dispatcher,
                &mut gallery,
                stdin.lock(),
                std::io::stdout(),
                |g| write_snapshot(&cli.output, g),
            )?;
        }
    }

    Ok(())
}

/// Load the config file and build a dispatcher over the HTTP source.
fn connect(path: &Path) -> Result<(ClientConfig, Dispatcher<HttpSource>), Box<dyn std::error::Error>> {
    let client_config = config::load_config(path)?;
    let source = HttpSource::new(&client_config.api)?;
    let dispatcher = Dispatcher::new(source, config::effective_workers(&client_config.runtime))?;
    Ok((client_config, dispatcher))
}

/// Initialise env_logger. `-v` flags raise the default level; an explicit
/// `RUST_LOG` wins over both.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn write_snapshot(path: &Path, gallery: &Gallery) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render::render_page(gallery).into_string())
}
