use std::error::Error;
use std::fs::File;
use std::io::Write;

use log::info;

use crate::err::*;
use crate::optimizers::*;

pub fn optimizer_from_file(filepath: &str) -> Result<Box<dyn Optimizer>, Box<dyn Error>> {
    let cfg_file = File::open(filepath)?;
    let optim_params: SerdeWithParams = serde_yaml::from_reader(cfg_file)?;

    let optim_type = match optim_params.0.get("type") {
        Some(Variant::String(t)) => t.clone(),
        _ => return Err(Box::new(CustomError::InvalidFormat)),
    };

    let mut optim = optimizer_from_type(&optim_type).map_err(|_| CustomError::InvalidFormat)?;
    optim.set_cfg(&optim_params.0);

    info!("Loaded {} optimizer from {}", optim_type, filepath);

    Ok(optim)
}

pub fn optimizer_to_file(optimizer: &dyn Optimizer, filepath: &str) -> Result<(), Box<dyn Error>> {
    let helper = SerdeWithParams(optimizer.cfg());

    let yaml_str = serde_yaml::to_string(&helper)?;
    let mut output = File::create(filepath)?;
    output.write_all(yaml_str.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_round() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("optim.yaml");
        let path = path.to_str().unwrap();

        let sgd = OptimizerSGD::new(0.3, 0.7);
        optimizer_to_file(&sgd, path).unwrap();

        let loaded = optimizer_from_file(path).unwrap();
        assert_eq!(loaded.cfg(), sgd.cfg());
    }

    #[test]
    fn unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("optim.yaml");
        std::fs::write(&path, "type:\n  String: nadam\n").unwrap();

        assert!(optimizer_from_file(path.to_str().unwrap()).is_err());
    }
}
