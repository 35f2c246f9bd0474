use std::error::Error;

use clap::ArgMatches;

use nevermind_imgen::err::*;
use nevermind_imgen::patterns::*;

pub fn draw_pattern(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let kind = args.get_one::<String>("Kind").ok_or(CustomError::WrongArg)?;
    let out = args.get_one::<String>("OutFile").ok_or(CustomError::WrongArg)?;
    let resolution = *args
        .get_one::<usize>("Resolution")
        .ok_or(CustomError::WrongArg)?;

    match kind.as_str() {
        "checker" => {
            let tile_size = *args.get_one::<usize>("TileSize").ok_or(CustomError::WrongArg)?;
            Checker::new(resolution, tile_size).save(out)?;
        }
        "circle" => {
            let radius = *args.get_one::<f32>("Radius").ok_or(CustomError::WrongArg)?;
            let middle = resolution as f32 / 2.0;
            let x = args.get_one::<f32>("PosX").copied().unwrap_or(middle);
            let y = args.get_one::<f32>("PosY").copied().unwrap_or(middle);

            Circle::new(resolution, radius, (x, y)).save(out)?;
        }
        "spectrum" => {
            Spectrum::new(resolution).save(out)?;
        }
        _ => return Err(Box::new(CustomError::WrongArg)),
    }

    println!("Pattern {} saved to {}", kind, out);

    Ok(())
}
