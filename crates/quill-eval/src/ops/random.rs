//! Randomness. The generator is owned by the engine and seeded once per
//! run, so a fixed seed gives a reproducible run.

use super::{count, same_shape};
use quill_types::value::format_number;
use quill_types::{QuillError, Result, Value};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// `?`: an integer in `[0, n)` for a number, a random element for a
/// sequence.
pub fn random(value: &Value, rng: &mut StdRng) -> Result<Value> {
    match value {
        Value::Number(n) => {
            let bound = count(*n);
            if bound == 0 {
                return Err(QuillError::Runtime(format!(
                    "'?' needs a bound of at least 1, got {}",
                    format_number(*n)
                )));
            }
            Ok(Value::number(rng.gen_range(0..bound) as f64))
        }
        seq => seq
            .projection()
            .choose(rng)
            .cloned()
            .ok_or_else(|| QuillError::Runtime("'?' of an empty sequence".into())),
    }
}

/// `X`: a random permutation of a sequence.
pub fn shuffle(value: &Value, rng: &mut StdRng) -> Result<Value> {
    if let Value::Number(_) = value {
        return Err(QuillError::unary_types('X', value.kind()));
    }
    let mut items = value.projection();
    items.shuffle(rng);
    Ok(same_shape(value, items))
}
