//! E-commerce Order Processing
//!
//! This example demonstrates an order lifecycle driven by events.
//!
//! Key concepts:
//! - Order states (Pending -> Paid -> Shipped, Cancelled from anywhere open)
//! - Guards reading the order and the fire arguments
//! - Enter/exit hooks and a success hook on persisted fires
//! - Persistence through the `Stateful` capability trait
//!
//! Run with: cargo run --example order_processing

use statewise::builder::{EventBuilder, MachineBuilder, TransitionBuilder};
use statewise::core::{Action, BoxError, FsmError, State, StateName, Stateful};
use statewise::event_methods;
use statewise::machine::Instance;
use std::sync::Arc;
use stillwater::validation::Validation;

// Order entity
struct Order {
    id: u64,
    total: u64,
    shipping_address: Option<String>,
    status_column: Option<String>,
    notifications: Vec<String>,
}

impl Order {
    fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        println!("  [notify] order {}: {}", self.id, message);
        self.notifications.push(message);
    }
}

impl Stateful for Order {
    fn read_state(&self) -> Option<StateName> {
        self.status_column.as_deref().map(StateName::from)
    }

    fn write_state(&mut self, state: &StateName) -> Result<(), BoxError> {
        println!("  [db] order {} status <- {}", self.id, state);
        self.status_column = Some(state.to_string());
        Ok(())
    }

    fn event_fired(&mut self, from: &StateName, to: &StateName) {
        println!("  [event] {} -> {}", from, to);
    }

    fn event_failed(&mut self, event: &str) {
        println!("  [event] '{}' declined", event);
    }

    fn receive(&mut self, message: &str) -> Result<(), BoxError> {
        match message {
            "send_receipt" => {
                let total = self.total;
                self.notify(format!("receipt for {} cents", total));
                Ok(())
            }
            other => Err(FsmError::UnhandledMessage {
                message: other.to_string(),
            }
            .into()),
        }
    }
}

/// Payment amount passed when firing events.
struct Payment {
    amount: u64,
}

event_methods! {
    trait OrderEvents for Order, Payment {
        pay => "pay",
        ship => "ship",
        cancel => "cancel",
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Order Processing Example ===\n");

    let machine = MachineBuilder::<Order, Payment>::new()
        .state("pending")
        .state(State::new("paid").on_enter(Action::message("send_receipt")))
        .state(
            State::new("shipped")
                .on_enter(Action::function(|order: &mut Order| {
                    order.notify("your order is on its way");
                    Ok(())
                }))
                .describe("title", "Shipped"),
        )
        .state("cancelled")
        .event(
            EventBuilder::new("pay").transition(
                TransitionBuilder::new()
                    .from("pending")
                    .to("paid")
                    .when(|order: &Order, payment: &Payment| payment.amount >= order.total),
            ),
        )?
        .event(
            EventBuilder::new("ship")
                .transition(
                    TransitionBuilder::new()
                        .from("paid")
                        .to("shipped")
                        .when(|order: &Order, _: &Payment| order.shipping_address.is_some()),
                )
                .on_success(|order: &mut Order| {
                    order.notify("shipment confirmed");
                    Ok(())
                }),
        )?
        .event(
            EventBuilder::new("cancel")
                .transition(TransitionBuilder::new().from_any(["pending", "paid"]).to("cancelled")),
        )?
        .build()?;

    if let Validation::Failure(violations) = machine.validate() {
        for violation in violations.iter() {
            println!("definition problem: {}", violation);
        }
    }

    let mut order = Instance::new(
        Arc::new(machine),
        Order {
            id: 42,
            total: 1_500,
            shipping_address: None,
            status_column: None,
            notifications: Vec::new(),
        },
    );

    println!("Initial state: {}", order.current_state());
    println!("Available events: {:?}\n", order.events_for_current_state());

    println!("Paying too little:");
    let paid = order.pay(true, &Payment { amount: 1_000 })?;
    println!("  paid: {}, state: {}\n", paid, order.current_state());

    println!("Paying in full:");
    order.pay(true, &Payment { amount: 1_500 })?;
    println!("  state: {}\n", order.current_state());

    println!("Shipping without an address:");
    let shipped = order.ship(true, &Payment { amount: 0 })?;
    println!("  shipped: {}\n", shipped);

    println!("Shipping with an address:");
    order.object_mut().shipping_address = Some("1 Main St".to_string());
    order.ship(true, &Payment { amount: 0 })?;
    println!("  state: {}\n", order.current_state());

    println!("Cancelling a shipped order:");
    match order.cancel(true, &Payment { amount: 0 }) {
        Err(e @ FsmError::InvalidTransition { .. }) => println!("  rejected: {}\n", e),
        other => println!("  unexpected: {:?}\n", other.map_err(|e| e.to_string())),
    }

    println!("Path taken:");
    for state in order.history().get_path() {
        println!("  {}", state);
    }

    let checkpoint = order.checkpoint();
    println!("\nCheckpoint {}:\n{}", checkpoint.id, checkpoint.to_json()?);

    Ok(())
}
