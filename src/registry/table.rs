//! Generic namespaced registry.
//!
//! A `Registry<T>` holds the live descriptors of one kind in registration
//! order, indexed by key. Storage is persistent (`im`), so cloning a registry
//! is O(1) and a clone handed to another thread never observes later changes.
//!
//! ## Example
//!
//! ```
//! use voxel_items::core::NamespacedKey;
//! use voxel_items::platform::BaseCatalog;
//! use voxel_items::registry::{MaterialDescriptor, MaterialFields, Registry};
//!
//! let catalog = BaseCatalog::vanilla();
//! let stone = catalog.builtin_material("stone").unwrap().clone();
//!
//! let mut materials: Registry<MaterialDescriptor> = Registry::new();
//! let key: NamespacedKey = "pack:ruby_ore".parse().unwrap();
//! assert!(materials.register(MaterialFields::new(key.clone(), stone)).is_registered());
//!
//! assert!(materials.get(&key).is_some());
//! assert!(materials.get_str("pack:ruby_ore").is_some());
//! assert!(materials.get_str("pack:missing").is_none());
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::descriptor::Descriptor;
use super::interceptor::{Interceptor, InterceptorChain, Phase};
use crate::core::NamespacedKey;
use crate::platform::NativeRef;

/// Outcome of a registration attempt.
#[derive(Debug)]
pub enum Registration<T> {
    /// The descriptor joined the live set.
    Registered(Arc<T>),
    /// An interceptor cancelled the registration.
    Rejected { phase: Phase, by: String },
    /// A descriptor with this key is already live; the existing one wins.
    Duplicate(NamespacedKey),
}

impl<T> Registration<T> {
    /// Did the descriptor join the live set?
    #[must_use]
    pub fn is_registered(&self) -> bool {
        matches!(self, Registration::Registered(_))
    }

    /// The registered descriptor, if any.
    #[must_use]
    pub fn descriptor(&self) -> Option<&Arc<T>> {
        match self {
            Registration::Registered(d) => Some(d),
            _ => None,
        }
    }

    /// Consume into the registered descriptor, if any.
    #[must_use]
    pub fn into_descriptor(self) -> Option<Arc<T>> {
        match self {
            Registration::Registered(d) => Some(d),
            _ => None,
        }
    }
}

/// Registration table for one descriptor kind.
pub struct Registry<T: Descriptor> {
    entries: im::Vector<Arc<T>>,
    index: im::HashMap<NamespacedKey, usize>,
    interceptors: InterceptorChain<T>,
}

impl<T: Descriptor> Registry<T> {
    /// Create an empty registry with no interceptors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: im::Vector::new(),
            index: im::HashMap::new(),
            interceptors: InterceptorChain::new(),
        }
    }

    /// Append an interceptor to the registration pipeline.
    pub fn add_interceptor(&mut self, interceptor: Arc<dyn Interceptor<T>>) {
        debug!(kind = T::KIND, name = interceptor.name(), "interceptor added");
        self.interceptors.push(interceptor);
    }

    /// Add an interceptor (builder pattern).
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor<T>>) -> Self {
        self.add_interceptor(interceptor);
        self
    }

    /// The interceptor pipeline.
    #[must_use]
    pub fn interceptors(&self) -> &InterceptorChain<T> {
        &self.interceptors
    }

    /// Run `fields` through the pipeline and, if nobody objects, add the
    /// resulting descriptor to the live set.
    ///
    /// The duplicate check uses the key as it stands after the proposal
    /// phase, since interceptors may rewrite it.
    pub fn register(&mut self, fields: T::Fields) -> Registration<T> {
        let fields = match self.interceptors.run_proposed(fields) {
            Ok(fields) => fields,
            Err(by) => {
                info!(kind = T::KIND, %by, phase = %Phase::Proposed, "registration rejected");
                return Registration::Rejected {
                    phase: Phase::Proposed,
                    by,
                };
            }
        };

        let key = T::fields_key(&fields).clone();
        if self.index.contains_key(&key) {
            warn!(kind = T::KIND, %key, "duplicate registration ignored");
            return Registration::Duplicate(key);
        }

        let descriptor = Arc::new(T::build(fields));
        if let Err(by) = self.interceptors.run_registered(&descriptor) {
            info!(kind = T::KIND, %key, %by, phase = %Phase::Registered, "registration rejected");
            return Registration::Rejected {
                phase: Phase::Registered,
                by,
            };
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push_back(Arc::clone(&descriptor));
        debug!(kind = T::KIND, %key, "registered");
        Registration::Registered(descriptor)
    }

    /// Look up by key.
    #[must_use]
    pub fn get(&self, key: &NamespacedKey) -> Option<&Arc<T>> {
        self.index.get(key).and_then(|&i| self.entries.get(i))
    }

    /// Look up by `(namespace, identifier)`. Malformed parts are simply not found.
    #[must_use]
    pub fn get_parts(&self, namespace: &str, identifier: &str) -> Option<&Arc<T>> {
        let key = NamespacedKey::new(namespace, identifier).ok()?;
        self.get(&key)
    }

    /// Look up by canonical `namespace:identifier` string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&Arc<T>> {
        let key = NamespacedKey::parse(key).ok()?;
        self.get(&key)
    }

    /// Look up the descriptor adapted from a platform-native object.
    #[must_use]
    pub fn get_native(&self, native: &impl NativeRef) -> Option<&Arc<T>> {
        self.get(native.native_key())
    }

    /// Is `key` registered?
    #[must_use]
    pub fn contains(&self, key: &NamespacedKey) -> bool {
        self.index.contains_key(key)
    }

    /// Live descriptors in registration order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Arc<T>> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Live keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &NamespacedKey> {
        self.entries.iter().map(|d| d.key())
    }

    /// Number of live descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the registry empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every live descriptor. Interceptors stay attached.
    ///
    /// Callers must re-run the builtin adaptation pass afterwards; see
    /// [`RegistryContext::reload`](super::RegistryContext::reload).
    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.index.clear();
        debug!(kind = T::KIND, dropped, "registry cleared");
    }
}

impl<T: Descriptor> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Descriptor> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
            interceptors: self.interceptors.clone(),
        }
    }
}

impl<T: Descriptor> std::fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &T::KIND)
            .field("len", &self.entries.len())
            .field("interceptors", &self.interceptors)
            .finish()
    }
}
