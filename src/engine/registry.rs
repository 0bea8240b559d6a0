use std::fmt;

use super::{HeuristicEngine, MoveSelector, RandomEngine};

/// Lookup of an engine id that is not registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEngine {
    pub id: String,
}

impl fmt::Display for UnknownEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No engine registered under id '{}'", self.id)
    }
}

impl std::error::Error for UnknownEngine {}

/// Named collection of engines with one default.
///
/// Engines are listed in registration order. Registering an engine under an
/// id that is already taken replaces the old one in place.
pub struct EngineRegistry {
    engines: Vec<Box<dyn MoveSelector>>,
    default: usize,
}

impl EngineRegistry {
    /// `random`, `reactive` and `heuristic`, with `heuristic` as default.
    pub fn with_defaults() -> Self {
        let mut registry = EngineRegistry {
            engines: Vec::new(),
            default: 0,
        };
        registry.register(Box::new(RandomEngine::default()));
        registry.register(Box::new(HeuristicEngine::reactive()));
        registry.default = registry.register(Box::new(HeuristicEngine::new()));
        registry
    }

    /// Add or replace an engine, returning its position in the listing.
    pub fn register(&mut self, engine: Box<dyn MoveSelector>) -> usize {
        match self.position(engine.id()) {
            Some(idx) => {
                self.engines[idx] = engine;
                idx
            }
            None => {
                self.engines.push(engine);
                self.engines.len() - 1
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&dyn MoveSelector> {
        self.position(id).map(|idx| self.engines[idx].as_ref())
    }

    pub fn ids(&self) -> Vec<&str> {
        self.engines.iter().map(|engine| engine.id()).collect()
    }

    pub fn default_id(&self) -> &str {
        self.engines[self.default].id()
    }

    pub fn default_engine(&self) -> &dyn MoveSelector {
        self.engines[self.default].as_ref()
    }

    pub fn set_default(&mut self, id: &str) -> Result<(), UnknownEngine> {
        let idx = self.position(id).ok_or_else(|| UnknownEngine { id: id.to_string() })?;
        self.default = idx;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.engines.iter().position(|engine| engine.id() == id)
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        EngineRegistry::with_defaults()
    }
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("engines", &self.ids())
            .field("default", &self.default_id())
            .finish()
    }
}
