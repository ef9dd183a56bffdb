use smallvec::SmallVec;

use crate::values::Value;

/// Evaluation stack of the VM.
///
/// Compiled code never underflows the stack; popping an empty stack is a
/// compiler bug and panics.
#[derive(Debug)]
pub(crate) struct Stack {
    values: Vec<Value>,
}

impl Stack {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    #[inline]
    pub fn pop(&mut self) -> Value {
        self.values
            .pop()
            .expect("VM stack underflow (compiler bug)")
    }

    #[inline]
    pub fn peek(&self) -> &Value {
        self.values
            .last()
            .expect("VM stack underflow (compiler bug)")
    }

    /// Pops the top `n` values, returned bottom-first.
    pub fn pop_n(&mut self, n: usize) -> SmallVec<[Value; 4]> {
        let len = self.values.len();
        assert!(n <= len, "VM stack underflow: popping {n} of {len} (compiler bug)");
        self.values.drain(len - n..).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
