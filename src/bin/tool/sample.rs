use std::error::Error;

use clap::ArgMatches;

use nevermind_imgen::dataloader::*;
use nevermind_imgen::err::*;

use crate::gen_args::generator_config;

pub fn sample(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let cfg = generator_config(args)?;
    let batches = *args.get_one::<usize>("Batches").ok_or(CustomError::WrongArg)?;

    let mut gen = ImageGenerator::from_config(&cfg)?;

    if gen.is_placeholder() {
        println!("Dataset is empty, sampling {} placeholder items", gen.len());
    }

    for b in 0..batches {
        let batch = gen.next();

        println!("Batch {} , epoch {}", b, gen.current_epoch());

        for (idx, lbl) in batch.indices.iter().zip(batch.labels.iter()) {
            println!(
                "  {:>5}  {:<24} {:>2}  {}",
                idx,
                gen.identifiers()[*idx],
                lbl,
                gen.class_name(*lbl)
            );
        }
    }

    Ok(())
}
