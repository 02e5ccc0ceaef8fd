//! Shared failures carried by `EXCEPTION_CAUGHT` events.

use crate::error::BoxError;
use std::{error::Error, fmt, sync::Arc};

/// A shareable error value carried by `EXCEPTION_CAUGHT` events.
///
/// Cloning is cheap; every clone refers to the same underlying error.
#[derive(Clone)]
pub struct Fault(Arc<dyn Error + Send + Sync + 'static>);

impl Fault {
    /// Wrap an error.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// Wrap an already boxed error, e.g. one returned by a pipeline stage.
    pub fn from_boxed(error: BoxError) -> Self {
        Self(Arc::from(error))
    }

    /// Borrow the wrapped error.
    pub fn get(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.0
    }

    /// Borrow the wrapped error as a concrete type, if it is one.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }
}

impl From<BoxError> for Fault {
    fn from(error: BoxError) -> Self {
        Fault::from_boxed(error)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}
