//! # Pizza Commands
//!
//! Add, edit, delete and list pizzas.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PizzaForm { is_editing: false, ... }                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  form.submit()  ── Err ──► ApiError (VALIDATION_ERROR / PARSE_ERROR)   │
//! │       │                                                                 │
//! │       ├── PizzaDraft::Create ──► menu.insert() ─► "Pizza added ..."    │
//! │       └── PizzaDraft::Update ──► menu.update() ─► "Pizza updated ..."  │
//! │                                      │                                  │
//! │                                      └─ worker gone? ──► QUEUE_CLOSED  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{ConfigState, MenuState, WriteOutcome, WriteTicket};
use pizzeria_core::{Pizza, PizzaDraft, PizzaForm, PizzaStatus};
use pizzeria_db::PizzaSubscription;

/// One row of the pizza list.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PizzaListItem {
    pub id: Option<i64>,
    pub name: String,
    /// `"{ingredients} - {price} {currency}"`
    pub info: String,
    pub status: PizzaStatus,
    pub status_label: String,
}

impl PizzaListItem {
    pub fn from_pizza(pizza: &Pizza, config: &ConfigState) -> Self {
        PizzaListItem {
            id: pizza.id(),
            name: pizza.name().to_string(),
            info: format!(
                "{} - {}",
                pizza.ingredients(),
                config.format_price(pizza.price())
            ),
            status: pizza.status(),
            status_label: pizza.status().label().to_string(),
        }
    }
}

/// A write that was accepted, with the confirmation to show.
#[derive(Debug)]
pub struct SubmitOutcome {
    /// User-facing confirmation.
    pub message: String,
    /// Completion handle; drop it to fire and forget.
    pub ticket: WriteTicket,
}

impl SubmitOutcome {
    /// Waits for the store and returns the confirmation message.
    pub async fn confirm(self) -> Result<(String, WriteOutcome), ApiError> {
        let outcome = self.ticket.wait().await?;
        Ok((self.message, outcome))
    }
}

/// Validates an add/edit form and queues the matching write.
///
/// ## Returns
/// * `Ok(SubmitOutcome)` - write queued, dialog can close
/// * `Err(ApiError)` - nothing queued; show the message
pub fn submit_pizza_form(menu: &MenuState, form: &PizzaForm) -> Result<SubmitOutcome, ApiError> {
    let draft = form.submit().map_err(|e| {
        debug!(error = %e, "Form rejected");
        ApiError::from(e)
    })?;

    match draft {
        PizzaDraft::Create(pizza) => {
            info!(name = %pizza.name(), "Adding pizza");
            let ticket = menu.insert(pizza)?;
            Ok(SubmitOutcome {
                message: "Pizza added successfully!".to_string(),
                ticket,
            })
        }
        PizzaDraft::Update(pizza) => {
            info!(id = ?pizza.id(), name = %pizza.name(), "Updating pizza");
            let ticket = menu.update(pizza)?;
            Ok(SubmitOutcome {
                message: "Pizza updated successfully!".to_string(),
                ticket,
            })
        }
    }
}

/// Queues deletion of `pizza` (after the user confirmed).
pub fn delete_pizza(menu: &MenuState, pizza: Pizza) -> Result<SubmitOutcome, ApiError> {
    if !pizza.is_persisted() {
        warn!(name = %pizza.name(), "Deleting a pizza that was never saved");
    }

    let message = format!("'{}' deleted successfully!", pizza.name());
    info!(id = ?pizza.id(), name = %pizza.name(), "Deleting pizza");

    let ticket = menu.delete(pizza)?;
    Ok(SubmitOutcome { message, ticket })
}

/// Live list for the list screen.
pub fn get_pizzas(menu: &MenuState) -> PizzaSubscription {
    menu.get_all_pizzas()
}

/// Prefilled form for the edit dialog.
pub fn edit_pizza_form(pizza: &Pizza) -> PizzaForm {
    PizzaForm::from_pizza(pizza)
}

/// Renders a list snapshot into rows.
pub fn list_items(pizzas: &[Pizza], config: &ConfigState) -> Vec<PizzaListItem> {
    pizzas
        .iter()
        .map(|pizza| PizzaListItem::from_pizza(pizza, config))
        .collect()
}
