use std::collections::HashMap;
use std::sync::Arc;

use typen_core::specifier::Specifier;
use typen_core::value::Class;

/// Names that annotation text may refer to beyond the builtin types.
///
/// Classes resolve to instance-of specifiers; aliases resolve to whatever
/// specifier they were registered with (external specifiers included).
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, Arc<Class>>,
    aliases: HashMap<String, Specifier>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class under its own name. A later class of the same name wins.
    pub fn register(&mut self, class: Arc<Class>) -> &mut Self {
        self.classes.insert(class.name().to_string(), class);
        self
    }

    pub fn alias(&mut self, name: impl Into<String>, specifier: Specifier) -> &mut Self {
        self.aliases.insert(name.into(), specifier);
        self
    }

    pub fn with_class(mut self, class: Arc<Class>) -> Self {
        self.register(class);
        self
    }

    pub fn with_alias(mut self, name: impl Into<String>, specifier: Specifier) -> Self {
        self.alias(name, specifier);
        self
    }

    pub fn class(&self, name: &str) -> Option<&Arc<Class>> {
        self.classes.get(name)
    }

    /// Resolve a user-defined name. Aliases shadow classes.
    pub fn lookup(&self, name: &str) -> Option<Specifier> {
        if let Some(spec) = self.aliases.get(name) {
            return Some(spec.clone());
        }
        self.classes
            .get(name)
            .map(|class| Specifier::instance_of(class.clone()))
    }

    pub fn len(&self) -> usize {
        self.classes.len() + self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.aliases.is_empty()
    }
}
