extern crate nevermind_imgen;

use clap::{Arg, ArgAction, Command};

use log::info;

pub mod create_cfg;
pub mod gen_args;
pub mod patterns;
pub mod sample;
pub mod show;

#[cfg(feature = "log_log4rs")]
fn init_logger() -> Result<(), Box<dyn std::error::Error>> {
    use log::LevelFilter;
    use log4rs::append::console::ConsoleAppender;
    use log4rs::append::file::FileAppender;
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::default()))
        .build("log.txt")?;

    let console = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::default()))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .appender(Appender::builder().build("console", Box::new(console)))
        .build(
            Root::builder()
                .appender("console")
                .appender("logfile")
                .build(LevelFilter::Info),
        )?;

    log4rs::init_config(config)?;

    Ok(())
}

#[cfg(not(feature = "log_log4rs"))]
fn init_logger() -> Result<(), Box<dyn std::error::Error>> {
    use env_logger::Env;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger()?;

    let matches = Command::new("nevermind-imgen")
        .version("0.1.0")
        .author("Regular-dev")
        .about("Sample image batches, draw patterns and inspect datasets")
        .subcommand_required(true)
        .subcommand(
            Command::new("create_cfg")
                .about("Write a default generator configuration")
                .arg(
                    Arg::new("OutFile")
                        .long("out")
                        .short('o')
                        .help("Generator configuration output file")
                        .default_value("generator.yaml")
                        .require_equals(true)
                        .takes_value(true)
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("patterns")
                .about("Draw a pattern and save it as png")
                .arg(
                    Arg::new("Kind")
                        .long("kind")
                        .required(true)
                        .require_equals(true)
                        .takes_value(true)
                        .value_parser(["checker", "circle", "spectrum"]),
                )
                .arg(
                    Arg::new("Resolution")
                        .long("resolution")
                        .require_equals(true)
                        .takes_value(true)
                        .default_value("256")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("TileSize")
                        .long("tile_size")
                        .help("Checker tile size")
                        .require_equals(true)
                        .takes_value(true)
                        .default_value("32")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("Radius")
                        .long("radius")
                        .help("Circle radius")
                        .require_equals(true)
                        .takes_value(true)
                        .default_value("64")
                        .value_parser(clap::value_parser!(f32)),
                )
                .arg(
                    Arg::new("PosX")
                        .long("pos_x")
                        .help("Circle center column, defaults to the middle")
                        .require_equals(true)
                        .takes_value(true)
                        .value_parser(clap::value_parser!(f32)),
                )
                .arg(
                    Arg::new("PosY")
                        .long("pos_y")
                        .help("Circle center row, defaults to the middle")
                        .require_equals(true)
                        .takes_value(true)
                        .value_parser(clap::value_parser!(f32)),
                )
                .arg(
                    Arg::new("OutFile")
                        .long("out")
                        .short('o')
                        .require_equals(true)
                        .takes_value(true)
                        .default_value("pattern.png"),
                ),
        )
        .subcommand(
            Command::new("sample")
                .about("Print indices and labels of a few batches")
                .args(gen_args::generator_args())
                .arg(
                    Arg::new("Batches")
                        .long("batches")
                        .short('n')
                        .require_equals(true)
                        .takes_value(true)
                        .default_value("3")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Render one batch in the terminal, press q to quit")
                .args(gen_args::generator_args()),
        )
        .get_matches();

    info!("nevermind-imgen 0.1.0 starting...");

    match matches.subcommand() {
        Some(("create_cfg", args)) => create_cfg::create_cfg(args)?,
        Some(("patterns", args)) => patterns::draw_pattern(args)?,
        Some(("sample", args)) => sample::sample(args)?,
        Some(("show", args)) => show::show(args)?,
        _ => {}
    }

    Ok(())
}
