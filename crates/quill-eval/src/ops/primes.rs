//! Number theory on integers.

use super::map_numeric;
use quill_types::{QuillError, Result, Value};

fn as_integer(n: f64) -> Option<u64> {
    (n.is_finite() && n.fract() == 0.0 && n >= 0.0 && n <= u64::MAX as f64).then_some(n as u64)
}

fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// `p`: 1 for a prime integer, 0 otherwise.
pub fn is_prime(value: &Value) -> Result<Value> {
    map_numeric('p', value, &|n| {
        Ok(Value::boolean(as_integer(n).is_some_and(is_prime_u64)))
    })
}

/// `P`: prime factors of an integer ≥ 2, ascending with multiplicity.
pub fn prime_factors(value: &Value) -> Result<Value> {
    let Value::Number(n) = value else {
        return Err(QuillError::unary_types('P', value.kind()));
    };
    let mut factors = Vec::new();
    if let Some(mut rest) = as_integer(*n).filter(|&k| k >= 2) {
        let mut d = 2;
        while d * d <= rest {
            while rest % d == 0 {
                factors.push(Value::number(d as f64));
                rest /= d;
            }
            d += if d == 2 { 1 } else { 2 };
        }
        if rest > 1 {
            factors.push(Value::number(rest as f64));
        }
    }
    Ok(Value::array(factors))
}

/// `π`: the n-th prime, counting from `π 0 = 2`.
pub fn nth_prime(value: &Value) -> Result<Value> {
    map_numeric('π', value, &|n| {
        let target = as_integer(n).ok_or_else(|| {
            QuillError::Runtime(format!("'π' needs a non-negative integer, got {n}"))
        })?;
        let mut primes: Vec<u64> = vec![2];
        let mut candidate = 3;
        while (primes.len() as u64) <= target {
            if primes
                .iter()
                .take_while(|&&p| p * p <= candidate)
                .all(|&p| candidate % p != 0)
            {
                primes.push(candidate);
            }
            candidate += 2;
        }
        Ok(Value::number(primes[target as usize] as f64))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime() {
        let flags: Vec<Value> = [0.0, 1.0, 2.0, 9.0, 13.0, 7.5, -7.0]
            .iter()
            .map(|&n| is_prime(&Value::number(n)).unwrap())
            .collect();
        let expected: Vec<Value> = [false, false, true, false, true, false, false]
            .into_iter()
            .map(Value::boolean)
            .collect();
        assert_eq!(flags, expected);
    }

    #[test]
    fn test_prime_factors() {
        assert_eq!(
            prime_factors(&Value::number(360.0)).unwrap(),
            Value::array([2, 2, 2, 3, 3, 5].map(Value::from))
        );
        assert_eq!(prime_factors(&Value::number(1.0)).unwrap(), Value::array([]));
        assert_eq!(
            prime_factors(&Value::number(97.0)).unwrap(),
            Value::array([Value::number(97.0)])
        );
    }

    #[test]
    fn test_nth_prime_is_zero_based() {
        assert_eq!(nth_prime(&Value::number(0.0)).unwrap(), Value::number(2.0));
        assert_eq!(nth_prime(&Value::number(4.0)).unwrap(), Value::number(11.0));
        assert_eq!(nth_prime(&Value::number(99.0)).unwrap(), Value::number(541.0));
        assert!(nth_prime(&Value::number(-1.0)).is_err());
    }
}
