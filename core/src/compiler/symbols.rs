//! Interning of literal constants and referenced names.

use hashbrown::HashMap;

use super::CompileError;
use crate::values::Value;

/// Dedup key for a literal. Equality is type-aware: `1`, `1.0` and `True`
/// never share an id even though they compare equal as values. Floats are
/// keyed by their bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LiteralKey {
    None,
    Bool(bool),
    Int(i64),
    Float(u64),
    Str(String),
}

impl LiteralKey {
    fn of(value: &Value) -> Option<Self> {
        Some(match value {
            Value::None => LiteralKey::None,
            Value::Bool(b) => LiteralKey::Bool(*b),
            Value::Int(i) => LiteralKey::Int(*i),
            Value::Float(f) => LiteralKey::Float(f.to_bits()),
            Value::Str(s) => LiteralKey::Str(s.to_string()),
            _ => return None,
        })
    }
}

/// Two independent interning tables: literal values and reference names.
///
/// Ids are dense, start at 0 and are assigned in first-seen order.
///
/// # Example
///
/// ```
/// use sel_core::compiler::SymbolTable;
/// use sel_core::Value;
///
/// let mut symbols = SymbolTable::new();
/// assert_eq!(symbols.add_literal(Value::Int(1)).unwrap(), 0);
/// assert_eq!(symbols.add_literal(Value::from("a")).unwrap(), 1);
/// assert_eq!(symbols.add_literal(Value::Int(1)).unwrap(), 0);
/// assert_eq!(symbols.add_reference("x").unwrap(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    literals: Vec<Value>,
    literal_ids: HashMap<LiteralKey, u32>,
    references: Vec<String>,
    reference_ids: HashMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a literal and returns its id.
    ///
    /// Values without a dedup key (containers, callables) always get a
    /// fresh id.
    pub fn add_literal(&mut self, value: Value) -> Result<u32, CompileError> {
        let key = LiteralKey::of(&value);
        if let Some(&id) = key.as_ref().and_then(|key| self.literal_ids.get(key)) {
            return Ok(id);
        }
        let id = u32::try_from(self.literals.len()).map_err(|_| CompileError::TooManyLiterals)?;
        self.literals.push(value);
        if let Some(key) = key {
            self.literal_ids.insert(key, id);
        }
        Ok(id)
    }

    /// Interns a referenced name and returns its id.
    pub fn add_reference(&mut self, name: &str) -> Result<u32, CompileError> {
        if let Some(&id) = self.reference_ids.get(name) {
            return Ok(id);
        }
        let id =
            u32::try_from(self.references.len()).map_err(|_| CompileError::TooManyReferences)?;
        self.references.push(name.to_string());
        self.reference_ids.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn literal(&self, id: u32) -> Option<&Value> {
        self.literals.get(id as usize)
    }

    pub fn reference(&self, id: u32) -> Option<&str> {
        self.references.get(id as usize).map(String::as_str)
    }

    pub fn literals(&self) -> &[Value] {
        &self.literals
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense_in_first_seen_order() {
        let mut symbols = SymbolTable::new();
        assert_eq!(symbols.add_reference("b").unwrap(), 0);
        assert_eq!(symbols.add_reference("a").unwrap(), 1);
        assert_eq!(symbols.add_reference("b").unwrap(), 0);
        assert_eq!(symbols.references(), &["b".to_string(), "a".to_string()]);
        assert_eq!(symbols.reference(1), Some("a"));
        assert_eq!(symbols.reference(2), None);
    }

    #[test]
    fn test_literal_dedup_is_type_aware() {
        let mut symbols = SymbolTable::new();
        let int = symbols.add_literal(Value::Int(1)).unwrap();
        let float = symbols.add_literal(Value::Float(1.0)).unwrap();
        let boolean = symbols.add_literal(Value::Bool(true)).unwrap();
        assert_eq!((int, float, boolean), (0, 1, 2));
        assert_eq!(symbols.add_literal(Value::Float(1.0)).unwrap(), 1);
        assert_eq!(symbols.literals().len(), 3);
    }

    #[test]
    fn test_literals_and_references_are_independent() {
        let mut symbols = SymbolTable::new();
        assert_eq!(symbols.add_literal(Value::from("x")).unwrap(), 0);
        assert_eq!(symbols.add_reference("x").unwrap(), 0);
        assert_eq!(symbols.literal(0), Some(&Value::from("x")));
    }

    #[test]
    fn test_values_without_key_are_not_shared() {
        let mut symbols = SymbolTable::new();
        let list = Value::list([Value::Int(1)]);
        assert_eq!(symbols.add_literal(list.clone()).unwrap(), 0);
        assert_eq!(symbols.add_literal(list).unwrap(), 1);
    }
}
