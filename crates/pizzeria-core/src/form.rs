//! # Pizza Form
//!
//! Turns a raw add/edit form submission into a validated [`Pizza`].
//!
//! The presentation layer sends every field as text exactly as typed;
//! parsing and validation happen here so the rules live next to the entity.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PizzaForm { name, ingredients, price: "150", size: "30", ... }        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Trim every field                                                   │
//! │  2. name / ingredients / price / size empty? → MissingFields           │
//! │  3. price / size not numeric?                → CoreError::Parse        │
//! │  4. Entity setters (price > 0, size > 0, status literal)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PizzaDraft::Create(pizza)   or   PizzaDraft::Update(pizza with id)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Pizza, PizzaStatus};

/// A form submission as sent by the add/edit dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PizzaForm {
    pub name: String,
    pub ingredients: String,
    /// Raw price text, parsed as a decimal.
    pub price: String,
    /// Raw size text, parsed as an integer.
    pub size: String,
    #[serde(default)]
    pub description: String,
    /// Status literal picked in the dialog.
    #[serde(default = "default_status")]
    pub status: String,
    /// Whether the dialog was opened on an existing pizza.
    #[serde(default)]
    pub is_editing: bool,
    /// Id of the pizza being edited.
    #[serde(default)]
    pub existing_id: Option<i64>,
}

fn default_status() -> String {
    PizzaStatus::default().as_str().to_string()
}

impl Default for PizzaForm {
    /// An empty add dialog; the status picker starts on the default status.
    fn default() -> Self {
        PizzaForm {
            name: String::new(),
            ingredients: String::new(),
            price: String::new(),
            size: String::new(),
            description: String::new(),
            status: default_status(),
            is_editing: false,
            existing_id: None,
        }
    }
}

/// What a valid submission asks the menu to do.
#[derive(Debug, Clone, PartialEq)]
pub enum PizzaDraft {
    /// Insert a new pizza (id unset).
    Create(Pizza),
    /// Overwrite the pizza with the carried id.
    Update(Pizza),
}

impl PizzaDraft {
    /// Returns the validated pizza.
    pub fn pizza(&self) -> &Pizza {
        match self {
            PizzaDraft::Create(pizza) | PizzaDraft::Update(pizza) => pizza,
        }
    }

    /// Consumes the draft and returns the validated pizza.
    pub fn into_pizza(self) -> Pizza {
        match self {
            PizzaDraft::Create(pizza) | PizzaDraft::Update(pizza) => pizza,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, PizzaDraft::Update(_))
    }
}

impl PizzaForm {
    /// Prefills a form for editing an existing pizza.
    pub fn from_pizza(pizza: &Pizza) -> Self {
        PizzaForm {
            name: pizza.name().to_string(),
            ingredients: pizza.ingredients().to_string(),
            price: pizza.price().to_string(),
            size: pizza.size().to_string(),
            description: pizza.description().unwrap_or_default().to_string(),
            status: pizza.status().as_str().to_string(),
            is_editing: pizza.is_persisted(),
            existing_id: pizza.id(),
        }
    }

    /// Parses and validates the submission.
    ///
    /// ## Errors
    /// - `ValidationError::MissingFields` when any of name, ingredients,
    ///   price or size is blank
    /// - `CoreError::Parse` when price or size is not a (finite) number
    /// - any entity `ValidationError` (price/size <= 0, unknown status)
    /// - `ValidationError::Required { field: "id" }` when editing without an id
    ///
    /// ## Example
    /// ```rust
    /// use pizzeria_core::form::{PizzaDraft, PizzaForm};
    ///
    /// let form = PizzaForm {
    ///     name: "Margherita".into(),
    ///     ingredients: "tomato, mozzarella".into(),
    ///     price: "150".into(),
    ///     size: "30".into(),
    ///     status: "available".into(),
    ///     ..Default::default()
    /// };
    /// assert!(matches!(form.submit().unwrap(), PizzaDraft::Create(_)));
    /// ```
    pub fn submit(&self) -> CoreResult<PizzaDraft> {
        let price_raw = self.price.trim();
        let size_raw = self.size.trim();

        let missing: Vec<String> = [
            ("name", self.name.trim()),
            ("ingredients", self.ingredients.trim()),
            ("price", price_raw),
            ("size", size_raw),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field.to_string())
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields { fields: missing }.into());
        }

        // "NaN" and "inf" parse as f64 but are not numbers a user can mean
        let price: f64 = price_raw
            .parse()
            .ok()
            .filter(|price: &f64| price.is_finite())
            .ok_or_else(|| CoreError::parse("price", price_raw))?;
        let size: i32 = size_raw
            .parse()
            .map_err(|_| CoreError::parse("size", size_raw))?;

        let mut pizza = Pizza::new(&self.name, &self.ingredients, price, size)?;
        pizza.set_status(self.status.trim())?;

        let description = self.description.trim();
        if !description.is_empty() {
            pizza.set_description(Some(description.to_string()));
        }

        if !self.is_editing {
            return Ok(PizzaDraft::Create(pizza));
        }

        let id = self.existing_id.ok_or_else(|| ValidationError::Required {
            field: "id".to_string(),
        })?;
        Ok(PizzaDraft::Update(pizza.with_id(id)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PizzaForm {
        PizzaForm {
            name: " Margherita ".to_string(),
            ingredients: "tomato, mozzarella".to_string(),
            price: "150.0".to_string(),
            size: "30".to_string(),
            description: String::new(),
            status: "available".to_string(),
            is_editing: false,
            existing_id: None,
        }
    }

    #[test]
    fn test_submit_new_pizza() {
        let draft = valid_form().submit().unwrap();
        assert!(!draft.is_update());

        let pizza = draft.into_pizza();
        assert_eq!(pizza.id(), None);
        assert_eq!(pizza.name(), "Margherita");
        assert_eq!(pizza.price(), 150.0);
        assert_eq!(pizza.size(), 30);
        assert_eq!(pizza.description(), None);
        assert_eq!(pizza.status(), PizzaStatus::Available);
    }

    #[test]
    fn test_submit_edit_retargets_id() {
        let mut form = valid_form();
        form.is_editing = true;
        form.existing_id = Some(42);
        form.status = "preparing".to_string();
        form.description = "  thin crust ".to_string();

        let draft = form.submit().unwrap();
        assert!(draft.is_update());
        assert_eq!(draft.pizza().id(), Some(42));
        assert_eq!(draft.pizza().status(), PizzaStatus::Preparing);
        assert_eq!(draft.pizza().description(), Some("thin crust"));
    }

    #[test]
    fn test_edit_without_id_is_rejected() {
        let mut form = valid_form();
        form.is_editing = true;

        let err = form.submit().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "id"
        ));
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let mut form = valid_form();
        form.name = "  ".to_string();
        form.size = String::new();

        match form.submit().unwrap_err() {
            CoreError::Validation(ValidationError::MissingFields { fields }) => {
                assert_eq!(fields, vec!["name".to_string(), "size".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_input_is_parse_error() {
        let mut form = valid_form();
        form.price = "abc".to_string();
        assert!(matches!(
            form.submit().unwrap_err(),
            CoreError::Parse { ref field, .. } if field == "price"
        ));

        let mut form = valid_form();
        form.size = "30.5".to_string();
        assert!(matches!(
            form.submit().unwrap_err(),
            CoreError::Parse { ref field, .. } if field == "size"
        ));
    }

    #[test]
    fn test_non_finite_price_is_parse_error() {
        for raw in ["NaN", "inf", "-infinity"] {
            let mut form = valid_form();
            form.price = raw.to_string();
            assert!(matches!(
                form.submit().unwrap_err(),
                CoreError::Parse { ref field, ref value } if field == "price" && value == raw
            ));
        }
    }

    #[test]
    fn test_default_form_uses_default_status() {
        let form = PizzaForm {
            name: "Margherita".to_string(),
            ingredients: "tomato, mozzarella".to_string(),
            price: "150".to_string(),
            size: "30".to_string(),
            ..PizzaForm::default()
        };

        assert_eq!(form.status, "available");
        let pizza = form.submit().unwrap().into_pizza();
        assert_eq!(pizza.status(), PizzaStatus::Available);
    }

    #[test]
    fn test_out_of_range_numbers_are_validation_errors() {
        let mut form = valid_form();
        form.price = "0".to_string();
        assert!(matches!(
            form.submit().unwrap_err(),
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));

        let mut form = valid_form();
        form.size = "-5".to_string();
        assert!(matches!(
            form.submit().unwrap_err(),
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let mut form = valid_form();
        form.status = "sold".to_string();
        assert!(matches!(
            form.submit().unwrap_err(),
            CoreError::Validation(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_prefill_from_pizza() {
        let pizza = Pizza::new("Diavola", "salami, chili", 189.5, 32)
            .unwrap()
            .with_id(3)
            .with_status(PizzaStatus::OutOfStock);

        let form = PizzaForm::from_pizza(&pizza);
        assert!(form.is_editing);
        assert_eq!(form.existing_id, Some(3));
        assert_eq!(form.price, "189.5");
        assert_eq!(form.status, "out_of_stock");

        let draft = form.submit().unwrap();
        assert_eq!(draft.into_pizza(), pizza);
    }

    #[test]
    fn test_deserialize_from_camel_case_json() {
        let form: PizzaForm = serde_json::from_str(
            r#"{
                "name": "Margherita",
                "ingredients": "tomato, mozzarella",
                "price": "150",
                "size": "30",
                "isEditing": true,
                "existingId": 5
            }"#,
        )
        .unwrap();

        assert_eq!(form.status, "available");
        assert_eq!(form.existing_id, Some(5));
        assert!(form.submit().unwrap().is_update());
    }
}
