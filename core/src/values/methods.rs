//! Built-in methods of strings, lists and dicts.
//!
//! `'abc'.upper` evaluates to a [`BoundMethod`] holding the receiver; calling
//! it dispatches on [`Method`].

use core::fmt;

use super::Value;
use super::ops;
use crate::evaluator::RuntimeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    // str
    Upper,
    Lower,
    Capitalize,
    Title,
    Strip,
    LStrip,
    RStrip,
    StartsWith,
    EndsWith,
    Find,
    Replace,
    Split,
    Join,
    IsDigit,
    IsAlpha,
    // str and list
    Count,
    // list
    Index,
    // dict
    Get,
    Keys,
    Values,
    Items,
}

impl Method {
    /// The method called `name` on `receiver`, if its type has one.
    pub fn resolve(receiver: &Value, name: &str) -> Option<Method> {
        let method = match (receiver, name) {
            (Value::Str(_), "upper") => Method::Upper,
            (Value::Str(_), "lower") => Method::Lower,
            (Value::Str(_), "capitalize") => Method::Capitalize,
            (Value::Str(_), "title") => Method::Title,
            (Value::Str(_), "strip") => Method::Strip,
            (Value::Str(_), "lstrip") => Method::LStrip,
            (Value::Str(_), "rstrip") => Method::RStrip,
            (Value::Str(_), "startswith") => Method::StartsWith,
            (Value::Str(_), "endswith") => Method::EndsWith,
            (Value::Str(_), "find") => Method::Find,
            (Value::Str(_), "replace") => Method::Replace,
            (Value::Str(_), "split") => Method::Split,
            (Value::Str(_), "join") => Method::Join,
            (Value::Str(_), "isdigit") => Method::IsDigit,
            (Value::Str(_), "isalpha") => Method::IsAlpha,
            (Value::Str(_) | Value::List(_), "count") => Method::Count,
            (Value::List(_), "index") => Method::Index,
            (Value::Dict(_), "get") => Method::Get,
            (Value::Dict(_), "keys") => Method::Keys,
            (Value::Dict(_), "values") => Method::Values,
            (Value::Dict(_), "items") => Method::Items,
            _ => return None,
        };
        Some(method)
    }

    pub fn name(self) -> &'static str {
        match self {
            Method::Upper => "upper",
            Method::Lower => "lower",
            Method::Capitalize => "capitalize",
            Method::Title => "title",
            Method::Strip => "strip",
            Method::LStrip => "lstrip",
            Method::RStrip => "rstrip",
            Method::StartsWith => "startswith",
            Method::EndsWith => "endswith",
            Method::Find => "find",
            Method::Replace => "replace",
            Method::Split => "split",
            Method::Join => "join",
            Method::IsDigit => "isdigit",
            Method::IsAlpha => "isalpha",
            Method::Count => "count",
            Method::Index => "index",
            Method::Get => "get",
            Method::Keys => "keys",
            Method::Values => "values",
            Method::Items => "items",
        }
    }

    /// Accepted argument counts, inclusive.
    fn arity(self) -> (usize, usize) {
        match self {
            Method::Upper
            | Method::Lower
            | Method::Capitalize
            | Method::Title
            | Method::IsDigit
            | Method::IsAlpha
            | Method::Keys
            | Method::Values
            | Method::Items => (0, 0),
            Method::Strip | Method::LStrip | Method::RStrip | Method::Split => (0, 1),
            Method::StartsWith
            | Method::EndsWith
            | Method::Find
            | Method::Join
            | Method::Count
            | Method::Index => (1, 1),
            Method::Get => (1, 2),
            Method::Replace => (2, 3),
        }
    }
}

/// A built-in method together with the value it was looked up on.
#[derive(Clone)]
pub struct BoundMethod {
    receiver: Value,
    method: Method,
}

impl BoundMethod {
    pub fn new(receiver: Value, method: Method) -> Self {
        Self { receiver, method }
    }

    pub fn receiver(&self) -> &Value {
        &self.receiver
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn name(&self) -> &'static str {
        self.method.name()
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, RuntimeError> {
        let (min, max) = self.method.arity();
        if args.len() < min || args.len() > max {
            let expected = if min == max {
                min.to_string()
            } else {
                format!("{min} to {max}")
            };
            return Err(RuntimeError::ArgumentCount {
                name: self.name().to_string(),
                expected,
                got: args.len(),
            });
        }
        match &self.receiver {
            Value::Str(s) => self.call_str(s, args),
            Value::List(items) => self.call_list(items, args),
            Value::Dict(_) => self.call_dict(args),
            other => Err(RuntimeError::AttributeNotFound {
                type_name: other.type_name().to_string(),
                attr: self.name().to_string(),
            }),
        }
    }

    fn str_arg<'v>(&self, value: &'v Value) -> Result<&'v str, RuntimeError> {
        value.as_str().ok_or_else(|| RuntimeError::ArgumentType {
            function: self.name().to_string(),
            expected: "str",
            found: value.type_name().to_string(),
        })
    }

    /// Optional `chars`/`sep` argument: absent and `None` mean the default.
    fn optional_str_arg<'v>(&self, args: &'v [Value]) -> Result<Option<&'v str>, RuntimeError> {
        match args.first() {
            None | Some(Value::None) => Ok(None),
            Some(value) => self.str_arg(value).map(Some),
        }
    }

    fn call_str(&self, s: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        let value = match self.method {
            Method::Upper => Value::from(s.to_uppercase()),
            Method::Lower => Value::from(s.to_lowercase()),
            Method::Capitalize => {
                let mut chars = s.chars();
                let capitalized: String = match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.as_str().to_lowercase().chars())
                        .collect(),
                    None => String::new(),
                };
                Value::from(capitalized)
            }
            Method::Title => Value::from(title_case(s)),
            Method::Strip | Method::LStrip | Method::RStrip => {
                let chars = self.optional_str_arg(args)?;
                let strip = |c: char| match chars {
                    Some(chars) => chars.contains(c),
                    None => c.is_whitespace(),
                };
                let stripped = match self.method {
                    Method::LStrip => s.trim_start_matches(strip),
                    Method::RStrip => s.trim_end_matches(strip),
                    _ => s.trim_matches(strip),
                };
                Value::str(stripped)
            }
            Method::StartsWith => Value::Bool(s.starts_with(self.str_arg(&args[0])?)),
            Method::EndsWith => Value::Bool(s.ends_with(self.str_arg(&args[0])?)),
            Method::Find => {
                let needle = self.str_arg(&args[0])?;
                let position = s
                    .find(needle)
                    .map(|byte| s[..byte].chars().count() as i64)
                    .unwrap_or(-1);
                Value::Int(position)
            }
            Method::Count => {
                let needle = self.str_arg(&args[0])?;
                let count = if needle.is_empty() {
                    s.chars().count() + 1
                } else {
                    s.matches(needle).count()
                };
                Value::Int(count as i64)
            }
            Method::Replace => {
                let old = self.str_arg(&args[0])?;
                let new = self.str_arg(&args[1])?;
                match args.get(2) {
                    None => Value::from(s.replace(old, new)),
                    Some(Value::Int(n)) if *n < 0 => Value::from(s.replace(old, new)),
                    Some(Value::Int(n)) => {
                        Value::from(s.replacen(old, new, usize::try_from(*n).unwrap_or(0)))
                    }
                    Some(other) => {
                        return Err(RuntimeError::ArgumentType {
                            function: self.name().to_string(),
                            expected: "int",
                            found: other.type_name().to_string(),
                        });
                    }
                }
            }
            Method::Split => match self.optional_str_arg(args)? {
                None => Value::list(s.split_whitespace().map(Value::str)),
                Some("") => {
                    return Err(RuntimeError::InvalidValue {
                        message: "empty separator".to_string(),
                    });
                }
                Some(sep) => Value::list(s.split(sep).map(Value::str)),
            },
            Method::Join => {
                let Some(items) = args[0].as_list() else {
                    return Err(RuntimeError::ArgumentType {
                        function: self.name().to_string(),
                        expected: "list",
                        found: args[0].type_name().to_string(),
                    });
                };
                let parts = items
                    .iter()
                    .map(|item| self.str_arg(item))
                    .collect::<Result<Vec<&str>, _>>()?;
                Value::from(parts.join(s))
            }
            Method::IsDigit => Value::Bool(!s.is_empty() && s.chars().all(|c| c.is_ascii_digit())),
            Method::IsAlpha => Value::Bool(!s.is_empty() && s.chars().all(char::is_alphabetic)),
            other => return Err(self.missing(other)),
        };
        Ok(value)
    }

    fn call_list(&self, items: &[Value], args: &[Value]) -> Result<Value, RuntimeError> {
        match self.method {
            Method::Count => {
                let count = items.iter().filter(|item| ops::equals(item, &args[0])).count();
                Ok(Value::Int(count as i64))
            }
            Method::Index => items
                .iter()
                .position(|item| ops::equals(item, &args[0]))
                .map(|i| Value::Int(i as i64))
                .ok_or_else(|| RuntimeError::InvalidValue {
                    message: format!("{} is not in list", args[0].repr()),
                }),
            other => Err(self.missing(other)),
        }
    }

    fn call_dict(&self, args: &[Value]) -> Result<Value, RuntimeError> {
        let Value::Dict(entries) = &self.receiver else {
            return Err(self.missing(self.method));
        };
        match self.method {
            Method::Get => Ok(self
                .receiver
                .dict_get(&args[0])
                .cloned()
                .unwrap_or_else(|| args.get(1).cloned().unwrap_or(Value::None))),
            Method::Keys => Ok(Value::list(entries.iter().map(|(k, _)| k.clone()))),
            Method::Values => Ok(Value::list(entries.iter().map(|(_, v)| v.clone()))),
            Method::Items => Ok(Value::list(
                entries
                    .iter()
                    .map(|(k, v)| Value::list([k.clone(), v.clone()])),
            )),
            other => Err(self.missing(other)),
        }
    }

    fn missing(&self, method: Method) -> RuntimeError {
        RuntimeError::AttributeNotFound {
            type_name: self.receiver.type_name().to_string(),
            attr: method.name().to_string(),
        }
    }
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

impl fmt::Debug for BoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("receiver", &self.receiver)
            .field("method", &self.method)
            .finish()
    }
}
