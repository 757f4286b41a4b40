//! The execution engine: a cursor over a flat op sequence.
//!
//! There is no tree. Each op pulls its operands by evaluating whatever
//! follows the cursor, `arity` times, so the sequence reads as prefix
//! notation. Blocks that must not run eagerly (the second operand of
//! `&` and `|`, the body of `Φ` and `Ψ`) are located with
//! [`Engine::find_end_of_block`] from arities alone and then skipped or
//! replayed.

use crate::bindings::{BindingKind, Bindings};
use crate::config::RunConfig;
use crate::ops::{
    arith, compare, convert, interpolate, iteration_source, primes, random, same_shape, sequence,
};
use quill_codepage::CodePage;
use quill_types::{Op, QuillError, Result, Value};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, trace};

/// Number of variable slots.
pub const VARIABLE_COUNT: usize = 10;

/// Everything a run produced: one value per top-level expression, and the
/// error that stopped it, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    pub results: Vec<Value>,
    #[serde(serialize_with = "error_message")]
    pub error: Option<QuillError>,
}

impl RunOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The final value, or the error if the run failed.
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.results.into_iter().last().unwrap_or(Value::number(0.0))),
        }
    }
}

fn error_message<S: serde::Serializer>(
    error: &Option<QuillError>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Program state for one run.
pub struct Engine<'p> {
    ops: Vec<Op>,
    cursor: usize,
    arguments: Vec<Value>,
    variables: [Value; VARIABLE_COUNT],
    bindings: Bindings,
    rng: StdRng,
    code_page: &'p CodePage,
}

impl<'p> Engine<'p> {
    /// Create an engine positioned at the first op.
    pub fn new(
        ops: Vec<Op>,
        arguments: Vec<Value>,
        code_page: &'p CodePage,
        config: &RunConfig,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            ops,
            cursor: 0,
            arguments,
            variables: std::array::from_fn(|_| Value::number(0.0)),
            bindings: Bindings::new(),
            rng,
            code_page,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.ops.len()
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Current content of a variable slot.
    pub fn variable(&self, slot: usize) -> Option<&Value> {
        self.variables.get(slot)
    }

    /// The value read when an operand runs past the end of the program.
    fn implicit_input(&self) -> Value {
        self.arguments.first().cloned().unwrap_or(Value::number(0.0))
    }

    // ══════════════════════════════════════════════════════════════════════
    // Traversal
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate the expression at the cursor, leaving the cursor just past it.
    pub fn dequeue_and_evaluate(&mut self) -> Result<Value> {
        let Some(op) = self.ops.get(self.cursor).cloned() else {
            return Ok(self.implicit_input());
        };
        trace!(cursor = self.cursor, op = %op, "evaluate");
        self.cursor += 1;
        self.evaluate(op)
    }

    /// Index of the last op of the block rooted at `start`.
    ///
    /// A block starting past the end is empty and ends at `start - 1`.
    pub fn find_end_of_block(&self, start: usize) -> usize {
        let Some(op) = self.ops.get(start) else {
            return start.saturating_sub(1);
        };
        let mut end = start;
        for _ in 0..op.arity() {
            end = self.find_end_of_block(end + 1);
        }
        end
    }

    /// Move the cursor past the block at the cursor without evaluating it.
    pub fn skip_block(&mut self) {
        if self.is_finished() {
            return;
        }
        let end = self.find_end_of_block(self.cursor);
        debug!(from = self.cursor, to = end + 1, "skip block");
        self.cursor = end + 1;
    }

    fn unary<F>(&mut self, f: F) -> Result<Value>
    where
        F: FnOnce(&Value) -> Result<Value>,
    {
        let operand = self.dequeue_and_evaluate()?;
        f(&operand)
    }

    fn binary<F>(&mut self, f: F) -> Result<Value>
    where
        F: FnOnce(&Value, &Value) -> Result<Value>,
    {
        let left = self.dequeue_and_evaluate()?;
        let right = self.dequeue_and_evaluate()?;
        f(&left, &right)
    }

    fn evaluate(&mut self, op: Op) -> Result<Value> {
        match op {
            // ── Nullary ──
            Op::Number(n) => Ok(Value::number(n)),
            Op::String(s) => Ok(Value::string(s)),
            Op::Argument(i) => Ok(self
                .arguments
                .get(usize::from(i))
                .cloned()
                .unwrap_or(Value::number(0.0))),
            Op::GetVariable(i) => Ok(self.variables[usize::from(i)].clone()),
            Op::ArgumentArray => Ok(Value::array(self.arguments.iter().cloned())),
            Op::FilterValue => self.bound(BindingKind::Filter, 'φ'),
            Op::MapValue => self.bound(BindingKind::Map, 'ψ'),

            // ── Unary ──
            Op::SetVariable(i) => {
                let value = self.dequeue_and_evaluate()?;
                self.variables[usize::from(i)] = value.clone();
                Ok(value)
            }
            Op::Truthify => self.unary(|v| Ok(convert::truthify(v))),
            Op::Untruthify => self.unary(|v| Ok(convert::untruthify(v))),
            Op::Range => self.unary(sequence::range),
            Op::ReverseRange => self.unary(sequence::reverse_range),
            Op::RangeFrom1 => self.unary(sequence::range_from_1),
            Op::ReverseRangeFrom1 => self.unary(sequence::reverse_range_from_1),
            Op::Halve => self.unary(arith::halve),
            Op::Negate => self.unary(arith::negate),
            Op::Absolute => self.unary(arith::absolute),
            Op::Increment => self.unary(arith::increment),
            Op::Decrement => self.unary(arith::decrement),
            Op::Length => self.unary(|v| Ok(sequence::length(v))),
            Op::Reverse => self.unary(sequence::reverse),
            Op::Head => self.unary(sequence::head),
            Op::Tail => self.unary(sequence::tail),
            Op::Wrap => self.unary(|v| Ok(sequence::wrap(v))),
            Op::Chars => self.unary(|v| Ok(sequence::chars(v))),
            Op::ToNumber => self.unary(convert::to_number),
            Op::ToString => self.unary(|v| Ok(convert::to_string(v))),
            Op::Sort => self.unary(sequence::sort),
            Op::Sum => self.unary(sequence::sum),
            Op::Uppercase => self.unary(convert::uppercase),
            Op::Lowercase => self.unary(convert::lowercase),
            Op::IsPrime => self.unary(primes::is_prime),
            Op::PrimeFactors => self.unary(primes::prime_factors),
            Op::NthPrime => self.unary(primes::nth_prime),
            Op::Random => {
                let operand = self.dequeue_and_evaluate()?;
                random::random(&operand, &mut self.rng)
            }
            Op::Shuffle => {
                let operand = self.dequeue_and_evaluate()?;
                random::shuffle(&operand, &mut self.rng)
            }
            Op::Each => self.unary(|v| Ok(convert::each(v))),
            Op::Ordinal => {
                let page = self.code_page;
                self.unary(|v| convert::ordinal(v, page))
            }
            Op::FromBase256 => {
                let page = self.code_page;
                self.unary(|v| convert::from_base_256(v, page))
            }
            Op::Decompress => {
                let page = self.code_page;
                self.unary(|v| convert::decompress(v, page))
            }

            // ── Binary ──
            Op::Add => self.binary(arith::add),
            Op::Subtract => self.binary(arith::subtract),
            Op::Multiply => self.binary(arith::multiply),
            Op::Division => self.binary(arith::division),
            Op::Modulo => self.binary(arith::modulo),
            Op::Power => self.binary(arith::power),
            Op::Less => self.binary(compare::less),
            Op::Greater => self.binary(compare::greater),
            Op::Equal => self.binary(|l, r| Ok(compare::equal(l, r))),
            Op::NotEqual => self.binary(|l, r| Ok(compare::not_equal(l, r))),
            Op::Interpolate => self.binary(interpolate::interpolate),
            Op::Pair => self.binary(|l, r| Ok(sequence::pair(l, r))),
            Op::Index => self.binary(sequence::index),
            Op::Join => self.binary(sequence::join),
            Op::Split => self.binary(sequence::split),

            // ── Control ──
            Op::And => self.eval_and(),
            Op::Or => self.eval_or(),
            Op::Filter => self.eval_filter(),
            Op::Map => self.eval_map(),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Control constructs
    // ══════════════════════════════════════════════════════════════════════

    fn eval_and(&mut self) -> Result<Value> {
        let first = self.dequeue_and_evaluate()?;
        if !first.is_truthy() {
            self.skip_block();
            return Ok(first);
        }
        self.dequeue_and_evaluate()
    }

    fn eval_or(&mut self) -> Result<Value> {
        let first = self.dequeue_and_evaluate()?;
        if first.is_truthy() {
            self.skip_block();
            return Ok(first);
        }
        self.dequeue_and_evaluate()
    }

    fn bound(&self, kind: BindingKind, symbol: char) -> Result<Value> {
        self.bindings
            .current(kind)
            .cloned()
            .ok_or_else(|| QuillError::Runtime(format!("'{symbol}' used outside its block")))
    }

    /// Evaluate the block at `block_start` with `element` bound.
    fn evaluate_bound(
        &mut self,
        kind: BindingKind,
        element: Value,
        block_start: usize,
    ) -> Result<Value> {
        self.bindings.push(kind, element);
        self.cursor = block_start;
        let result = self.dequeue_and_evaluate();
        self.bindings.pop(kind);
        result
    }

    /// Leave the cursor just past the block at `block_start`.
    fn leave_block(&mut self, block_start: usize) {
        self.cursor = block_start;
        self.skip_block();
    }

    fn eval_filter(&mut self) -> Result<Value> {
        let source = self.dequeue_and_evaluate()?;
        let block_start = self.cursor;
        let elements = iteration_source('Φ', &source)?;
        debug!(block_start, elements = elements.len(), "enter filter");

        let mut kept = Vec::new();
        for element in elements {
            if self
                .evaluate_bound(BindingKind::Filter, element.clone(), block_start)?
                .is_truthy()
            {
                kept.push(element);
            }
        }
        self.leave_block(block_start);

        Ok(same_shape(&source, kept))
    }

    fn eval_map(&mut self) -> Result<Value> {
        let source = self.dequeue_and_evaluate()?;
        let block_start = self.cursor;
        let elements = iteration_source('Ψ', &source)?;
        debug!(block_start, elements = elements.len(), "enter map");

        let mut mapped = Vec::with_capacity(elements.len());
        for element in elements {
            mapped.push(self.evaluate_bound(BindingKind::Map, element, block_start)?);
        }
        self.leave_block(block_start);
        Ok(Value::array(mapped))
    }

    // ══════════════════════════════════════════════════════════════════════
    // Driving a run
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate the next top-level expression, or `None` once the cursor
    /// has reached the end.
    pub fn next_result(&mut self) -> Option<Result<Value>> {
        if self.is_finished() {
            return None;
        }
        Some(self.dequeue_and_evaluate())
    }

    /// Run to completion, keeping every top-level value. An empty program
    /// evaluates once and yields the implicit input.
    pub fn run(mut self) -> RunOutcome {
        debug!(ops = self.ops.len(), arguments = self.arguments.len(), "run start");
        let mut results = Vec::new();

        if self.ops.is_empty() {
            results.push(self.implicit_input());
            return RunOutcome { results, error: None };
        }

        while let Some(step) = self.next_result() {
            match step {
                Ok(value) => results.push(value),
                Err(error) => {
                    debug!(%error, produced = results.len(), "run failed");
                    return RunOutcome {
                        results,
                        error: Some(error),
                    };
                }
            }
        }
        debug!(produced = results.len(), "run end");
        RunOutcome { results, error: None }
    }
}
