//! Opaque event payloads.

use std::{any::Any, fmt, sync::Arc};

/// A value that can travel in an event's payload slot.
///
/// Anything `Display + Debug + Send + Sync + 'static` qualifies; the blanket
/// implementation records the concrete type so dispatch can perform a checked
/// cast later.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as an event payload",
    label = "must be `Display + Debug + Send + Sync + 'static`",
    note = "Payloads are rendered in event descriptions and shared across threads."
)]
pub trait Payload: Any + fmt::Display + fmt::Debug + Send + Sync {
    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// The concrete type name, used in type mismatch reports.
    fn type_name(&self) -> &'static str;
}

impl<T> Payload for T
where
    T: Any + fmt::Display + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl dyn Payload {
    /// Returns `true` if the payload is a `T`.
    pub fn is<T: Payload>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow the payload as a `T`, if it is one.
    pub fn downcast_ref<T: Payload>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// A shared, type-erased payload.
pub type Parameter = Arc<dyn Payload>;

/// Wrap a value as a shared [`Parameter`].
///
/// A value that already is a [`Parameter`] is returned as is, so the shared
/// payload keeps its identity and its concrete type.
pub fn parameter<P: Payload>(value: P) -> Parameter {
    if let Some(shared) = (&value as &dyn Any).downcast_ref::<Parameter>() {
        return Arc::clone(shared);
    }
    Arc::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_through_parameter() {
        let param = parameter(String::from("hello"));
        let payload: &dyn Payload = &*param;

        assert!(payload.is::<String>());
        assert!(!payload.is::<u32>());
        assert_eq!(payload.downcast_ref::<String>().unwrap(), "hello");
        assert_eq!(payload.type_name(), std::any::type_name::<String>());
        assert_eq!(payload.to_string(), "hello");
    }

    #[test]
    fn test_parameter_keeps_shared_payload() {
        let param = parameter(42u32);
        let again = parameter(param.clone());

        assert!(Arc::ptr_eq(&param, &again));
        assert_eq!((*again).downcast_ref::<u32>(), Some(&42));
        assert_eq!((*again).type_name(), std::any::type_name::<u32>());
    }
}
