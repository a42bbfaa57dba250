//! Per-model descriptor registry.
//!
//! Models declared with `#[derive(QueryModel)]` are auto-registered via the
//! `inventory` crate: the process-wide registry collects every
//! [`ModelRegistration`] the first time it is touched. Descriptors can also be
//! added by hand with [`register`].
//!
//! Registration is append-only. Registering the same descriptor twice adds it
//! twice.

use crate::descriptor::FieldDescriptor;
use crate::value::{ToValue, Value};
use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, HashMap};
use std::sync::{OnceLock, PoisonError, RwLock};

/// A filter model whose fields can be read by name.
///
/// This trait is automatically implemented by the `#[derive(QueryModel)]` macro.
pub trait QueryModel: 'static {
    /// Read the current value of `field`. Unknown fields read as
    /// [`Value::Absent`].
    fn field_value(&self, field: &str) -> Value;
}

// Map-shaped models, for filters that arrive as loose key/value data.
impl QueryModel for BTreeMap<String, Value> {
    fn field_value(&self, field: &str) -> Value {
        self.get(field).cloned().unwrap_or_default()
    }
}

impl QueryModel for HashMap<String, Value> {
    fn field_value(&self, field: &str) -> Value {
        self.get(field).cloned().unwrap_or_default()
    }
}

impl QueryModel for serde_json::Map<String, serde_json::Value> {
    fn field_value(&self, field: &str) -> Value {
        self.get(field).map(ToValue::to_value).unwrap_or_default()
    }
}

/// Registration entry for auto-registering models.
///
/// This is used by the `#[derive(QueryModel)]` macro to push a model's
/// descriptors into the process-wide registry.
pub struct ModelRegistration {
    /// Function that registers a model's descriptors, in declaration order.
    pub register_fn: fn(&mut DescriptorRegistry),
}

inventory::collect!(ModelRegistration);

#[derive(Debug, Clone, Default)]
struct ModelEntry {
    type_name: Option<&'static str>,
    descriptors: Vec<FieldDescriptor>,
}

/// Ordered descriptor lists keyed by model type.
#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    models: HashMap<TypeId, ModelEntry>,
}

impl DescriptorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every model submitted through `inventory`.
    pub fn from_inventory() -> Self {
        let mut registry = Self::new();
        for reg in inventory::iter::<ModelRegistration> {
            (reg.register_fn)(&mut registry);
        }
        tracing::trace!(
            target: "paramql.registry",
            models = registry.models.len(),
            descriptors = registry.len(),
            "descriptor registry initialized"
        );
        registry
    }

    /// Append a descriptor to the list of model `M`.
    pub fn register<M: 'static>(&mut self, descriptor: FieldDescriptor) {
        let entry = self.models.entry(TypeId::of::<M>()).or_default();
        entry.type_name.get_or_insert_with(type_name::<M>);
        entry.descriptors.push(descriptor);
    }

    /// Append a descriptor to the list of the model identified by `type_id`.
    pub fn register_for(&mut self, type_id: TypeId, descriptor: FieldDescriptor) {
        self.models
            .entry(type_id)
            .or_default()
            .descriptors
            .push(descriptor);
    }

    /// Descriptors of model `M` in registration order; empty if none.
    pub fn lookup<M: 'static>(&self) -> &[FieldDescriptor] {
        self.lookup_id(TypeId::of::<M>())
    }

    /// Descriptors of the model identified by `type_id`; empty if none.
    pub fn lookup_id(&self, type_id: TypeId) -> &[FieldDescriptor] {
        self.models
            .get(&type_id)
            .map(|e| e.descriptors.as_slice())
            .unwrap_or_default()
    }

    /// Type names of models registered through [`DescriptorRegistry::register`].
    pub fn models(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.models.values().filter_map(|e| e.type_name)
    }

    /// Total number of registered descriptors.
    pub fn len(&self) -> usize {
        self.models.values().map(|e| e.descriptors.len()).sum()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.models.values().all(|e| e.descriptors.is_empty())
    }
}

fn global() -> &'static RwLock<DescriptorRegistry> {
    static GLOBAL: OnceLock<RwLock<DescriptorRegistry>> = OnceLock::new();
    GLOBAL.get_or_init(|| RwLock::new(DescriptorRegistry::from_inventory()))
}

/// Append a descriptor to model `M` in the process-wide registry.
///
/// Meant for startup; registering while builders run on other threads only
/// works because of the lock, not because ordering is defined.
pub fn register<M: 'static>(descriptor: FieldDescriptor) {
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register::<M>(descriptor);
}

/// Descriptors of model `M` from the process-wide registry.
pub fn lookup<M: 'static>() -> Vec<FieldDescriptor> {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .lookup::<M>()
        .to_vec()
}

/// Run `f` over the descriptors of model `M` while holding the registry's
/// read lock, without copying them.
///
/// `f` must not call [`register`]; that would wait on the lock held here.
pub fn with_descriptors<M: 'static, R>(f: impl FnOnce(&[FieldDescriptor]) -> R) -> R {
    let registry = global().read().unwrap_or_else(PoisonError::into_inner);
    f(registry.lookup::<M>())
}
