use std::{io, path::PathBuf};

use clap::Parser;
use mazesolv::{
    app::{self, AppError, Overrides, RunOptions},
    logging,
    settings::{LogLevel, Settings},
};

#[derive(Parser, Debug)]
#[clap(version, about, name = "mazesolv")]
struct Args {
    #[clap(long, value_parser = clap::value_parser!(i32).range(1..), help = "Maze width, asked for when missing")]
    width: Option<i32>,
    #[clap(long, value_parser = clap::value_parser!(i32).range(1..), help = "Maze height, asked for when missing")]
    height: Option<i32>,
    #[clap(short, long, help = "Seed of the maze, random when missing")]
    seed: Option<u64>,
    #[clap(short, long, help = "Path to the settings file")]
    config: Option<PathBuf>,
    #[clap(long, action, help = "Print only the solved maze")]
    no_plain: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "Log more, can be repeated")]
    verbose: u8,
    #[clap(short, long, action, help = "Log only errors")]
    quiet: bool,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Show config in debug format and quit")]
    debug_config: bool,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(Settings::default_path);

    better_panic::install();
    logging::init(LogLevel::default().adjusted(args.verbose, args.quiet).to_filter())?;

    if args.reset_config {
        Settings::reset_config(&config_path)?;
        return Ok(());
    }

    if args.show_config_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    let settings = Settings::load(&config_path)?;

    if args.debug_config {
        println!("{:#?}", settings);
        return Ok(());
    }

    logging::set_level(
        settings
            .get_log_level()
            .adjusted(args.verbose, args.quiet)
            .to_filter(),
    );

    let overrides = Overrides {
        width: args.width,
        height: args.height,
        seed: args.seed,
        no_plain: args.no_plain,
    };
    let options = RunOptions::resolve(&overrides, &settings);
    log::debug!("Running with {:?}", options);

    let stdin = io::stdin();
    let stdout = io::stdout();
    if !app::run(&options, &mut stdin.lock(), &mut stdout.lock())? {
        log::warn!("Maze has no path from the entrance to the exit");
    }

    Ok(())
}
