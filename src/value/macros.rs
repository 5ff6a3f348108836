//! Macros for opting serializable types into inspection.

/// Implement [`Inspect`](crate::core::Inspect) for types that implement
/// `serde::Serialize`, converting through [`to_value`](crate::value::to_value).
///
/// A conversion failure never aborts rendering: the value degrades to an
/// opaque label carrying the error message.
///
/// Serde's data model has no set or timestamp types, so the conversion
/// cannot recover them: `BTreeSet` and `HashSet` fields inspect as
/// sequences, and timestamps inspect as whatever their `Serialize` impl
/// writes (text for chrono's). Implement [`Inspect`](crate::core::Inspect)
/// by hand for types with such fields; the std set impls and the
/// `DateTime<Utc>` impl then keep their shapes.
///
/// # Example
///
/// ```
/// use rewind::core::Inspect;
/// use rewind::inspect_via_serde;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// enum CounterAction {
///     Increment,
///     Add(i64),
/// }
///
/// #[derive(Serialize)]
/// struct Counter {
///     count: i64,
/// }
///
/// inspect_via_serde!(CounterAction, Counter);
///
/// assert_eq!(CounterAction::Add(2).type_name(), "Add");
/// assert_eq!(Counter { count: 1 }.type_name(), "Counter");
/// ```
#[macro_export]
macro_rules! inspect_via_serde {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::core::Inspect for $ty {
                fn inspect(&self) -> $crate::value::Value {
                    $crate::value::to_value(self)
                        .unwrap_or_else(|err| $crate::value::Value::opaque(err.to_string()))
                }
            }
        )+
    };
}
