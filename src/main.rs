use clap::Parser;
use css_bundle::cli::{self, Cli};
use env_logger::Env;

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .format_target(false)
        .init();

    if let Err(err) = cli::run(cli.command) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
