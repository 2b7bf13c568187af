use rug::Float;
use std::collections::HashMap;

/// A context to use when evaluating an expression, containing the values of its free symbols.
#[derive(Debug, Clone, Default)]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, Float>,
}

impl Ctxt {
    /// Creates a new, empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable to the context, replacing any existing value.
    pub fn add_var(&mut self, name: &str, value: Float) {
        self.vars.insert(name.to_string(), value);
    }

    /// Returns the value of the given variable.
    pub fn get_var(&self, name: &str) -> Option<&Float> {
        self.vars.get(name)
    }

    /// Builder-style version of [`Ctxt::add_var`].
    pub fn with_var(mut self, name: &str, value: Float) -> Self {
        self.add_var(name, value);
        self
    }
}
