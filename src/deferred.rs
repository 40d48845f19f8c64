// src/deferred.rs

//! Deferred capabilities: an eagerly available base value combined with a
//! second value that is only computed the first time somebody needs it.
//!
//! This is the building block behind [`Command`](crate::Command): the
//! argument vector and options are the base, the running process is the
//! deferred part. The process itself is again a `Deferred`, with the
//! collected text output as its deferred part.
//!
//! Presence on the base side is explicit (`Option`), so an empty string or a
//! zero stored on the base is still a real value and never falls through to
//! the computed side.

use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

type Initializer<B, C> = Box<dyn FnOnce(&B) -> C + Send>;

/// Base value `B` plus a lazily computed `C`.
///
/// The initializer runs at most once, even when several threads race on the
/// first access; every later access observes the same `C`.
pub struct Deferred<B, C> {
    base: B,
    init: Mutex<Option<Initializer<B, C>>>,
    computed: OnceLock<C>,
}

/// Which side of a [`Deferred`] answered a lookup.
#[derive(Debug)]
pub enum Capability<'a, B, C> {
    Base(&'a B),
    Computed(&'a C),
}

impl<B, C> Deferred<B, C> {
    pub fn new<F>(base: B, init: F) -> Self
    where
        F: FnOnce(&B) -> C + Send + 'static,
    {
        Self {
            base,
            init: Mutex::new(Some(Box::new(init))),
            computed: OnceLock::new(),
        }
    }

    /// The eagerly available side. Never triggers the initializer.
    pub fn base(&self) -> &B {
        &self.base
    }

    /// The computed side, running the initializer on first use.
    ///
    /// # Panics
    ///
    /// Panics if a previous call to the initializer panicked.
    pub fn get(&self) -> &C {
        self.computed.get_or_init(|| {
            let init = self
                .init
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take()
                .expect("deferred initializer panicked on an earlier access");
            init(&self.base)
        })
    }

    /// The computed side if it already exists.
    pub fn get_if_ready(&self) -> Option<&C> {
        self.computed.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.computed.get().is_some()
    }

    /// Pick the base when `probe` says it holds the capability, otherwise
    /// force the computed side.
    pub fn resolve(&self, probe: impl FnOnce(&B) -> bool) -> Capability<'_, B, C> {
        if probe(&self.base) {
            Capability::Base(&self.base)
        } else {
            Capability::Computed(self.get())
        }
    }

    /// Read one field through the combined view.
    ///
    /// `from_base` returns `Some` when the base populates the field; only
    /// when it returns `None` is the computed side created and asked.
    pub fn lookup<'a, T: ?Sized>(
        &'a self,
        from_base: impl FnOnce(&'a B) -> Option<&'a T>,
        from_computed: impl FnOnce(&'a C) -> &'a T,
    ) -> &'a T {
        match from_base(&self.base) {
            Some(value) => value,
            None => from_computed(self.get()),
        }
    }
}

impl<B: fmt::Debug, C: fmt::Debug> fmt::Debug for Deferred<B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("base", &self.base)
            .field("computed", &self.computed.get())
            .finish()
    }
}
