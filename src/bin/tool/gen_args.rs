use std::error::Error;

use clap::{Arg, ArgMatches};

use log::info;

use nevermind_imgen::config::*;

/// Arguments shared by the subcommands that build an ImageGenerator
pub fn generator_args() -> Vec<Arg<'static>> {
    vec![
        Arg::new("Cfg")
            .long("cfg")
            .help("Generator configuration yaml file, see create_cfg")
            .require_equals(true)
            .takes_value(true),
        Arg::new("Dataset")
            .long("dataset")
            .short('d')
            .help("Directory with .npy, .png, .jpg items")
            .require_equals(true)
            .takes_value(true),
        Arg::new("Labels")
            .long("labels")
            .help("Json file mapping item names to class ids")
            .require_equals(true)
            .takes_value(true),
        Arg::new("BatchSize")
            .long("batch_size")
            .require_equals(true)
            .takes_value(true)
            .value_parser(clap::value_parser!(usize)),
        Arg::new("ImageSize")
            .long("image_size")
            .help("height,width,channels")
            .require_equals(true)
            .takes_value(true)
            .value_parser(clap::value_parser!(ImageShape)),
        Arg::new("Rotation")
            .long("rotation")
            .require_equals(true)
            .takes_value(true)
            .value_parser(clap::value_parser!(bool)),
        Arg::new("Mirroring")
            .long("mirroring")
            .require_equals(true)
            .takes_value(true)
            .value_parser(clap::value_parser!(bool)),
        Arg::new("Shuffle")
            .long("shuffle")
            .require_equals(true)
            .takes_value(true)
            .value_parser(clap::value_parser!(bool)),
        Arg::new("Seed")
            .long("seed")
            .require_equals(true)
            .takes_value(true)
            .value_parser(clap::value_parser!(u64)),
    ]
}

/// Config file (or defaults) with command line overrides applied
pub fn generator_config(args: &ArgMatches) -> Result<GeneratorConfig, Box<dyn Error>> {
    let mut cfg = match args.get_one::<String>("Cfg") {
        Some(path) => {
            info!("Reading generator configuration from {}", path);
            GeneratorConfig::from_file(path)?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(v) = args.get_one::<String>("Dataset") {
        cfg.file_path = v.clone();
    }
    if let Some(v) = args.get_one::<String>("Labels") {
        cfg.label_path = v.clone();
    }
    if let Some(v) = args.get_one::<usize>("BatchSize") {
        cfg.batch_size = *v;
    }
    if let Some(v) = args.get_one::<ImageShape>("ImageSize") {
        cfg.image_size = *v;
    }
    if let Some(v) = args.get_one::<bool>("Rotation") {
        cfg.rotation = *v;
    }
    if let Some(v) = args.get_one::<bool>("Mirroring") {
        cfg.mirroring = *v;
    }
    if let Some(v) = args.get_one::<bool>("Shuffle") {
        cfg.shuffle = *v;
    }
    if let Some(v) = args.get_one::<u64>("Seed") {
        cfg.seed = Some(*v);
    }

    Ok(cfg)
}
