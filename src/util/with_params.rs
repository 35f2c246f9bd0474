use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::util::*;

pub trait WithParams {
    fn cfg(&self) -> HashMap<String, Variant> {
        HashMap::new()
    }

    fn set_cfg(&mut self, _args: &HashMap<String, Variant>) {}
}

#[derive(Serialize, Deserialize, Default)]
pub struct SerdeWithParams(pub HashMap<String, Variant>);

/// Reads float value, integers are accepted too
pub fn cfg_float(args: &HashMap<String, Variant>, key: &str) -> Option<f32> {
    match args.get(key) {
        Some(Variant::Float(v)) => Some(*v),
        Some(Variant::Int(v)) => Some(*v as f32),
        _ => None,
    }
}

pub fn cfg_int(args: &HashMap<String, Variant>, key: &str) -> Option<i32> {
    match args.get(key) {
        Some(Variant::Int(v)) => Some(*v),
        _ => None,
    }
}
