//! Name-keyed lookup of strategy factories.

use std::collections::BTreeMap;

use miam_system_contract::{RuleStrategy, StrategyFactory};
use miam_system_life::Life;
use miam_system_toggle::Toggle;

/// Strategy used when the driver does not request one explicitly.
pub const DEFAULT_STRATEGY: &str = miam_system_toggle::NAME;

/// Failure to resolve a strategy by name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No factory is registered under the requested name.
    #[error("unknown strategy `{name}` (available: {available})")]
    UnknownStrategy {
        /// Name requested by the caller.
        name: String,
        /// Comma-separated list of registered names.
        available: String,
    },
}

/// Registry mapping strategy names to their factory entry points.
#[derive(Clone, Debug)]
pub struct Registry {
    factories: BTreeMap<&'static str, StrategyFactory>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl Registry {
    /// Creates a registry without any strategy.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Creates a registry holding the toggle and Game of Life strategies.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        let _ = registry.register(miam_system_toggle::NAME, Toggle::create);
        let _ = registry.register(miam_system_life::NAME, Life::create);
        registry
    }

    /// Registers a factory, returning the one it replaced.
    pub fn register(
        &mut self,
        name: &'static str,
        factory: StrategyFactory,
    ) -> Option<StrategyFactory> {
        self.factories.insert(name, factory)
    }

    /// Instantiates the strategy registered under `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn RuleStrategy>, RegistryError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RegistryError::UnknownStrategy {
                name: name.to_owned(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })?;
        Ok(factory())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miam_core::BoardSize;

    #[test]
    fn builtin_registry_resolves_both_strategies() {
        let registry = Registry::default();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["default", "life"]);

        let life = registry.create("life").expect("registered");
        assert_eq!(life.name(), "life");
        assert_eq!(life.preferred_board_size(), BoardSize::new(16, 16));

        let toggle = registry.create(DEFAULT_STRATEGY).expect("registered");
        assert_eq!(toggle.name(), "default");
    }

    #[test]
    fn unknown_name_lists_available_strategies() {
        let registry = Registry::with_builtin();
        let error = registry.create("langton").expect_err("not registered");
        assert_eq!(
            error.to_string(),
            "unknown strategy `langton` (available: default, life)"
        );
    }

    #[test]
    fn register_replaces_existing_factory() {
        let mut registry = Registry::empty();
        assert!(registry.register("custom", Toggle::create).is_none());
        assert!(registry.register("custom", Life::create).is_some());
        let strategy = registry.create("custom").expect("registered");
        assert_eq!(strategy.name(), "life");
    }
}
