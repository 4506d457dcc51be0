use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VariableError {
    #[error("variable limit reached ({0})")]
    Full(usize),
}

/// Named float values shared by the evaluator, the interpreter and `set`.
///
/// Lookup is exact and case-sensitive; insertion order is kept for listing.
pub struct VariableStore {
    vars: Vec<(String, f32)>,
    capacity: usize,
}

impl VariableStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            vars: Vec::new(),
            capacity,
        }
    }

    /// Value of `name`, or 0.0 if it was never set
    pub fn get(&self, name: &str) -> f32 {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.iter().any(|(n, _)| n == name)
    }

    pub fn set(&mut self, name: &str, value: f32) -> Result<(), VariableError> {
        if let Some((_, v)) = self.vars.iter_mut().find(|(n, _)| n == name) {
            *v = value;
            return Ok(());
        }
        if self.vars.len() >= self.capacity {
            return Err(VariableError::Full(self.capacity));
        }
        self.vars.push((name.to_string(), value));
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new(64)
    }
}
