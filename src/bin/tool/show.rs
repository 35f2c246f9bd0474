use std::error::Error;

use clap::ArgMatches;

use nevermind_imgen::dataloader::*;
use nevermind_imgen::display::*;

use crate::gen_args::generator_config;

pub fn show(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let cfg = generator_config(args)?;
    let mut gen = ImageGenerator::from_config(&cfg)?;

    let mut display = TuiDisplay::new()?;
    gen.show(&mut display)?;

    Ok(())
}
