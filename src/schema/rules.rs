//! Field rules: one declaration drives both validation and documentation.

use serde_json::Value;

/// Declared value kind of a field. Used for the type check and for the
/// generated documentation; absent kinds are inferred from the example value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Enum,
    Array,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum => "enum",
            FieldKind::Array => "array",
        }
    }
}

/// Infer a kind from the runtime type of an example value. Null and object
/// examples are not inferable.
pub fn infer_kind(example: &Value) -> Option<FieldKind> {
    match example {
        Value::String(_) => Some(FieldKind::String),
        Value::Number(_) => Some(FieldKind::Number),
        Value::Bool(_) => Some(FieldKind::Boolean),
        Value::Array(_) => Some(FieldKind::Array),
        _ => None,
    }
}

/// Optional constraints applied after the presence and type checks.
#[derive(Clone, Debug, Default)]
pub struct Bounds {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub pattern: Option<String>,
    pub format: Option<String>,
    pub allowed: Option<Vec<Value>>,
}

/// The resolved bundle for one field: documentation attribute plus validation
/// predicate, produced from a single declaration.
#[derive(Clone, Debug)]
pub struct FieldRule {
    pub description: String,
    pub example: Value,
    pub required: bool,
    pub kind: Option<FieldKind>,
    pub bounds: Bounds,
}

/// Documentation attribute derived from a rule.
#[derive(Clone, Debug)]
pub struct FieldDoc {
    pub description: String,
    pub example: Value,
    pub required: bool,
    pub kind: Option<FieldKind>,
    pub enum_values: Option<Vec<Value>>,
    pub is_array: bool,
}

impl FieldRule {
    fn new(description: &str, example: Value, kind: FieldKind) -> Self {
        FieldRule {
            description: description.to_string(),
            example,
            required: true,
            kind: Some(kind),
            bounds: Bounds::default(),
        }
    }

    /// Required string field.
    pub fn string(description: &str, example: &str) -> Self {
        Self::new(description, Value::String(example.to_string()), FieldKind::String)
    }

    /// Required number field.
    pub fn number(description: &str, example: f64) -> Self {
        let example = serde_json::Number::from_f64(example)
            .map(Value::Number)
            .unwrap_or(Value::Null);
        Self::new(description, example, FieldKind::Number)
    }

    /// Required boolean field.
    pub fn boolean(description: &str, example: bool) -> Self {
        Self::new(description, Value::Bool(example), FieldKind::Boolean)
    }

    /// Required enum field; the value must be one of `values` and the
    /// documentation carries the full value set.
    pub fn enum_of(description: &str, example: &str, values: &[&str]) -> Self {
        let mut rule = Self::new(description, Value::String(example.to_string()), FieldKind::Enum);
        rule.bounds.allowed = Some(values.iter().map(|v| Value::String(v.to_string())).collect());
        rule
    }

    /// Required array field. No element-wise validation is implied; compose
    /// explicitly if elements need their own checks.
    pub fn array(description: &str, example: Value) -> Self {
        Self::new(description, example, FieldKind::Array)
    }

    /// Mark the field optional. Absent or null values then short-circuit
    /// before any constraint check.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn min_length(mut self, n: u32) -> Self {
        self.bounds.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: u32) -> Self {
        self.bounds.max_length = Some(n);
        self
    }

    pub fn minimum(mut self, n: f64) -> Self {
        self.bounds.minimum = Some(n);
        self
    }

    pub fn maximum(mut self, n: f64) -> Self {
        self.bounds.maximum = Some(n);
        self
    }

    pub fn pattern(mut self, re: &str) -> Self {
        self.bounds.pattern = Some(re.to_string());
        self
    }

    /// Named format check: "email" or "uuid".
    pub fn format(mut self, fmt: &str) -> Self {
        self.bounds.format = Some(fmt.to_string());
        self
    }

    /// Effective kind: the declared one, or inferred from the example.
    pub fn effective_kind(&self) -> Option<FieldKind> {
        self.kind.or_else(|| infer_kind(&self.example))
    }

    /// Documentation attribute for this rule.
    pub fn doc(&self) -> FieldDoc {
        let kind = self.effective_kind();
        FieldDoc {
            description: self.description.clone(),
            example: self.example.clone(),
            required: self.required,
            kind,
            enum_values: if kind == Some(FieldKind::Enum) {
                self.bounds.allowed.clone()
            } else {
                None
            },
            is_array: kind == Some(FieldKind::Array),
        }
    }

    /// Validation predicate. Presence is checked first: a missing or null
    /// value passes when the field is optional and fails when required,
    /// without running any constraint check.
    pub fn check(&self, field: &str, value: Option<&Value>) -> Result<(), String> {
        let v = match value {
            None | Some(Value::Null) => {
                if self.required {
                    return Err(format!("{} is required", field));
                }
                return Ok(());
            }
            Some(v) => v,
        };
        if let Some(kind) = self.effective_kind() {
            check_kind(field, v, kind)?;
        }
        check_bounds(field, v, &self.bounds)
    }
}

fn check_kind(field: &str, v: &Value, kind: FieldKind) -> Result<(), String> {
    match kind {
        FieldKind::String => {
            if !v.is_string() {
                return Err(format!("{} must be a string", field));
            }
        }
        FieldKind::Number => {
            if !v.is_number() {
                return Err(format!("{} must be a number", field));
            }
        }
        FieldKind::Boolean => {
            if !v.is_boolean() {
                return Err(format!("{} must be a boolean", field));
            }
        }
        FieldKind::Array => {
            if !v.is_array() {
                return Err(format!("{} must be an array", field));
            }
        }
        // Membership in `allowed` is the whole check for enums; it runs with
        // the other bounds.
        FieldKind::Enum => {}
    }
    Ok(())
}

fn check_bounds(field: &str, v: &Value, bounds: &Bounds) -> Result<(), String> {
    if let Some(ref format) = bounds.format {
        check_format(field, v, format)?;
    }
    if let Some(max) = bounds.max_length {
        if let Some(s) = v.as_str() {
            if s.len() > max as usize {
                return Err(format!("{} must be at most {} characters", field, max));
            }
        }
    }
    if let Some(min) = bounds.min_length {
        if let Some(s) = v.as_str() {
            if s.len() < min as usize {
                return Err(format!("{} must be at least {} characters", field, min));
            }
        }
    }
    if let Some(ref pattern) = bounds.pattern {
        let re = regex::Regex::new(pattern)
            .map_err(|_| format!("invalid pattern for {}", field))?;
        if let Some(s) = v.as_str() {
            if !re.is_match(s) {
                return Err(format!("{} does not match required pattern", field));
            }
        }
    }
    if let Some(ref allowed) = bounds.allowed {
        if !allowed.iter().any(|a| value_eq(v, a)) {
            return Err(one_of_message(field, allowed));
        }
    }
    if let Some(min) = bounds.minimum {
        if let Some(n) = v.as_f64() {
            if n < min {
                return Err(format!("{} must be at least {}", field, min));
            }
        }
    }
    if let Some(max) = bounds.maximum {
        if let Some(n) = v.as_f64() {
            if n > max {
                return Err(format!("{} must be at most {}", field, max));
            }
        }
    }
    Ok(())
}

fn one_of_message(field: &str, allowed: &[Value]) -> String {
    format!(
        "{} must be one of: {:?}",
        field,
        allowed.iter().take(5).collect::<Vec<_>>()
    )
}

fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(s), Value::String(t)) => s == t,
        (Value::Number(n), Value::Number(m)) => n.as_f64() == m.as_f64(),
        _ => a == b,
    }
}

fn check_format(field: &str, v: &Value, format: &str) -> Result<(), String> {
    match format.to_lowercase().as_str() {
        "email" => {
            if let Some(s) = v.as_str() {
                if !s.contains('@') || s.len() < 3 {
                    return Err(format!("{} must be a valid email", field));
                }
            }
        }
        "uuid" => {
            if let Some(s) = v.as_str() {
                if uuid::Uuid::parse_str(s).is_err() {
                    return Err(format!("{} must be a valid UUID", field));
                }
            }
        }
        _ => {}
    }
    Ok(())
}
