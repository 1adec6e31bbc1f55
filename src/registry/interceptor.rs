//! Registration interceptors.
//!
//! Every registration runs through an ordered chain of named interceptors in
//! two phases:
//!
//! 1. **Proposed**: each interceptor receives the mutable fields and returns
//!    them (possibly edited) or rejects. A rejection stops the chain and
//!    nothing is added.
//! 2. **Registered**: each interceptor sees the built descriptor and may veto
//!    it one last time before it joins the live set.
//!
//! Interceptors run in the order they were added. They are synchronous and
//! must not touch the registry they are attached to.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::descriptor::Descriptor;

/// Result of the proposal phase for one interceptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Proposal<F> {
    /// Continue with these (possibly edited) fields.
    Accept(F),
    /// Cancel the registration.
    Reject,
}

/// Result of the registered phase for one interceptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accept,
    Reject,
}

/// The phase in which a registration was cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Proposed,
    Registered,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Proposed => f.write_str("proposed"),
            Phase::Registered => f.write_str("registered"),
        }
    }
}

/// A named hook into registration.
///
/// Both phases default to accepting, so an interceptor only overrides the
/// phase it cares about.
pub trait Interceptor<T: Descriptor>: Send + Sync {
    /// Name reported when this interceptor cancels a registration.
    fn name(&self) -> &str;

    /// Inspect or edit the proposed fields.
    fn on_proposed(&self, fields: T::Fields) -> Proposal<T::Fields> {
        Proposal::Accept(fields)
    }

    /// Inspect the built descriptor; last chance to veto.
    fn on_registered(&self, _descriptor: &T) -> Verdict {
        Verdict::Accept
    }
}

/// Interceptor wrapping a proposal-phase closure.
pub struct ProposalFn<F> {
    name: String,
    func: F,
}

impl<F> ProposalFn<F> {
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<T, F> Interceptor<T> for ProposalFn<F>
where
    T: Descriptor,
    F: Fn(T::Fields) -> Proposal<T::Fields> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_proposed(&self, fields: T::Fields) -> Proposal<T::Fields> {
        (self.func)(fields)
    }
}

/// Interceptor wrapping a registered-phase closure.
pub struct VetoFn<F> {
    name: String,
    func: F,
}

impl<F> VetoFn<F> {
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<T, F> Interceptor<T> for VetoFn<F>
where
    T: Descriptor,
    F: Fn(&T) -> Verdict + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_registered(&self, descriptor: &T) -> Verdict {
        (self.func)(descriptor)
    }
}

/// Ordered list of interceptors.
pub struct InterceptorChain<T: Descriptor> {
    interceptors: Vec<Arc<dyn Interceptor<T>>>,
}

impl<T: Descriptor> InterceptorChain<T> {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    /// Append an interceptor; it runs after all existing ones.
    pub fn push(&mut self, interceptor: Arc<dyn Interceptor<T>>) {
        self.interceptors.push(interceptor);
    }

    /// Number of interceptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Is the chain empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.interceptors.iter().map(|i| i.name())
    }

    /// Run the proposal phase. `Err` carries the name of the rejecting interceptor.
    pub fn run_proposed(&self, mut fields: T::Fields) -> Result<T::Fields, String> {
        for interceptor in &self.interceptors {
            match interceptor.on_proposed(fields) {
                Proposal::Accept(next) => fields = next,
                Proposal::Reject => return Err(interceptor.name().to_string()),
            }
        }
        Ok(fields)
    }

    /// Run the registered phase. `Err` carries the name of the vetoing interceptor.
    pub fn run_registered(&self, descriptor: &T) -> Result<(), String> {
        for interceptor in &self.interceptors {
            if interceptor.on_registered(descriptor) == Verdict::Reject {
                return Err(interceptor.name().to_string());
            }
        }
        Ok(())
    }
}

impl<T: Descriptor> Default for InterceptorChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Descriptor> Clone for InterceptorChain<T> {
    fn clone(&self) -> Self {
        Self {
            interceptors: self.interceptors.clone(),
        }
    }
}

impl<T: Descriptor> std::fmt::Debug for InterceptorChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
