//=========================================================================
// Model Registry
//=========================================================================
//
// Shared state container keyed by type.
//
// Each model type has exactly one instance for the lifetime of the
// simulation. Models are inserted during startup, mutated in place by
// gameplay systems and never removed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use log::debug;

//=== Public API ==========================================================

/// Marker trait for types that can live in the [`ModelRegistry`].
///
/// Automatically implemented for all types that are Send + 'static.
pub trait Model: Send + 'static {}

// Blanket implementation
impl<T: Send + 'static> Model for T {}

//=== ModelError ==========================================================

/// Registry access errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A model of this type already exists.
    AlreadyRegistered(&'static str),

    /// No model of this type has been registered.
    Missing(&'static str),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRegistered(name) => write!(f, "Model {} is already registered", name),
            Self::Missing(name) => write!(f, "Model {} is not registered", name),
        }
    }
}

impl std::error::Error for ModelError {}

//=== ModelRegistry =======================================================

/// Singleton-per-type store for simulation models.
pub struct ModelRegistry {
    models: HashMap<TypeId, Box<dyn Any + Send>>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    /// Inserts the singleton instance of `T`.
    ///
    /// Fails if an instance of `T` already exists; the existing model is
    /// left untouched.
    pub fn insert<T: Model>(&mut self, model: T) -> Result<(), ModelError> {
        let name = std::any::type_name::<T>();
        if self.models.contains_key(&TypeId::of::<T>()) {
            return Err(ModelError::AlreadyRegistered(name));
        }

        debug!("Registered model {}", name);
        self.models.insert(TypeId::of::<T>(), Box::new(model));
        Ok(())
    }

    /// Returns the model of type `T`, if registered.
    pub fn get<T: Model>(&self) -> Option<&T> {
        self.models
            .get(&TypeId::of::<T>())
            .and_then(|m| m.downcast_ref::<T>())
    }

    /// Returns the model of type `T` mutably, if registered.
    pub fn get_mut<T: Model>(&mut self) -> Option<&mut T> {
        self.models
            .get_mut(&TypeId::of::<T>())
            .and_then(|m| m.downcast_mut::<T>())
    }

    /// Like [`get`](Self::get) but reports a missing model as an error.
    pub fn require<T: Model>(&self) -> Result<&T, ModelError> {
        self.get::<T>()
            .ok_or(ModelError::Missing(std::any::type_name::<T>()))
    }

    /// Like [`get_mut`](Self::get_mut) but reports a missing model as an error.
    pub fn require_mut<T: Model>(&mut self) -> Result<&mut T, ModelError> {
        self.get_mut::<T>()
            .ok_or(ModelError::Missing(std::any::type_name::<T>()))
    }

    /// Returns true if a model of type `T` is registered.
    pub fn contains<T: Model>(&self) -> bool {
        self.models.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns true if no models are registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
