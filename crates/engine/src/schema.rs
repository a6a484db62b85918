//! Invoice form validation.
//!
//! Turns an untyped [`FormData`] into an [`InvoiceInput`] or into the set of
//! per-field messages the form shows next to each input. Every field is
//! checked, so a form with three bad inputs gets three entries back.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{FormData, InvoiceStatus, MoneyCents};

/// An invoice form field, keyed the way the form submits it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    CustomerId,
    Amount,
    Status,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CustomerId => "customerId",
            Self::Amount => "amount",
            Self::Status => "status",
        }
    }

    fn rejection(self) -> &'static str {
        match self {
            Self::CustomerId => "select a customer.",
            Self::Amount => "enter an amount greater than $0.",
            Self::Status => "select an invoice status.",
        }
    }
}

/// Rejection messages keyed by field. Only fields that failed appear.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: Field) -> Option<&[String]> {
        self.0.get(&field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &[String])> {
        self.0.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", field.as_str(), messages.join(" "))?;
        }
        Ok(())
    }
}

/// A validated invoice form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvoiceInput {
    pub customer_id: String,
    pub amount: MoneyCents,
    pub status: InvoiceStatus,
}

/// Validate the `customerId`, `amount` and `status` fields of an invoice form.
pub fn validate_invoice_form(form: &FormData) -> Result<InvoiceInput, FieldErrors> {
    let mut errors = FieldErrors::default();

    let customer_id = form
        .get(Field::CustomerId.as_str())
        .map(str::trim)
        .filter(|id| !id.is_empty());
    if customer_id.is_none() {
        errors.push(Field::CustomerId, Field::CustomerId.rejection());
    }

    let amount = form
        .get(Field::Amount.as_str())
        .and_then(|raw| raw.parse::<MoneyCents>().ok())
        .filter(|amount| amount.is_positive());
    if amount.is_none() {
        errors.push(Field::Amount, Field::Amount.rejection());
    }

    let status = form.get(Field::Status.as_str()).and_then(InvoiceStatus::parse);
    if status.is_none() {
        errors.push(Field::Status, Field::Status.rejection());
    }

    match (customer_id, amount, status) {
        (Some(customer_id), Some(amount), Some(status)) => Ok(InvoiceInput {
            customer_id: customer_id.to_string(),
            amount,
            status,
        }),
        _ => Err(errors),
    }
}
