//! Ordered fallback providers
//!
//! A `Fallback` is a list of named providers tried in order; the first one
//! that yields a value wins. Precedence lives in the order the providers are
//! registered, so it can be inspected and tested as data.

type Provider<'a, T> = Box<dyn Fn() -> Option<T> + 'a>;

pub struct Fallback<'a, T> {
    providers: Vec<(&'static str, Provider<'a, T>)>,
}

impl<'a, T> Fallback<'a, T> {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Append a provider after the ones already registered
    pub fn provider(mut self, name: &'static str, provider: impl Fn() -> Option<T> + 'a) -> Self {
        self.providers.push((name, Box::new(provider)));
        self
    }

    /// Provider names in evaluation order
    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|(name, _)| *name).collect()
    }

    /// First present value and the name of the provider that supplied it
    pub fn resolve(&self) -> Option<(&'static str, T)> {
        self.providers
            .iter()
            .find_map(|(name, provider)| provider().map(|value| (*name, value)))
    }

    pub fn resolve_or(&self, default: T) -> T {
        match self.resolve() {
            Some((name, value)) => {
                log::debug!("fallback resolved by '{}'", name);
                value
            }
            None => {
                log::debug!("fallback chain {:?} empty; using default", self.names());
                default
            }
        }
    }
}

impl<T> Default for Fallback<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps only non-empty strings
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
