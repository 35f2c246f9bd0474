use std::error::Error;

use clap::ArgMatches;

use log::info;

use nevermind_imgen::config::*;
use nevermind_imgen::err::*;

pub fn create_cfg(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let out = args
        .get_one::<String>("OutFile")
        .ok_or(CustomError::WrongArg)?;

    GeneratorConfig::default().to_file(out)?;

    info!("Default generator configuration written to {}", out);

    Ok(())
}
