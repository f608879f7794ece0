//! Macros for ergonomic event firing.

/// Generate a trait with one method per event, implemented for
/// [`Instance`](crate::machine::Instance).
///
/// Each generated method takes `persist` and the fire arguments and
/// forwards to `fire_event`.
///
/// # Example
///
/// ```
/// use statewise::builder::{EventBuilder, MachineBuilder};
/// use statewise::core::Stateful;
/// use statewise::event_methods;
/// use statewise::machine::Instance;
/// use std::sync::Arc;
///
/// struct Order;
/// impl Stateful for Order {}
///
/// event_methods! {
///     pub trait OrderEvents for Order, () {
///         ship => "ship",
///         cancel => "cancel",
///     }
/// }
///
/// let machine = MachineBuilder::<Order>::new()
///     .states(["pending", "shipped", "cancelled"])
///     .event(EventBuilder::new("ship").transitions("pending", "shipped"))
///     .unwrap()
///     .event(EventBuilder::new("cancel").transitions("shipped", "cancelled"))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let mut order = Instance::new(Arc::new(machine), Order);
/// assert!(order.ship(true, &()).unwrap());
/// assert!(order.cancel(false, &()).unwrap());
/// assert!(order.is_in_state("cancelled"));
/// ```
#[macro_export]
macro_rules! event_methods {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident for $host:ty, $args:ty {
            $(
                $(#[$method_meta:meta])*
                $method:ident => $event:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis trait $name {
            $(
                $(#[$method_meta])*
                fn $method(
                    &mut self,
                    persist: bool,
                    args: &$args,
                ) -> ::std::result::Result<bool, $crate::core::FsmError>;
            )*
        }

        impl $name for $crate::machine::Instance<$host, $args> {
            $(
                fn $method(
                    &mut self,
                    persist: bool,
                    args: &$args,
                ) -> ::std::result::Result<bool, $crate::core::FsmError> {
                    self.fire_event($event, persist, args)
                }
            )*
        }
    };
}
