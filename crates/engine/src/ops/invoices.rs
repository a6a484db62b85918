use crate::{
    ActionOutcome, ActionState, EngineError, FormData, Invoice, Mutation, NavigationIntent,
    ResultEngine,
    invoices::{InvoiceChanges, NewInvoice},
    validate_invoice_form,
};

use super::Engine;

impl Engine {
    /// Creates an invoice from a submitted form.
    ///
    /// The date is today's date from the engine clock. On success the listing
    /// view is invalidated and the outcome asks the caller to navigate to it.
    pub async fn create_invoice(&self, form: &FormData) -> ResultEngine<ActionOutcome> {
        let result = async {
            let input = validate_invoice_form(form)?;
            let id = self
                .store
                .insert(NewInvoice {
                    customer_id: input.customer_id,
                    amount: input.amount,
                    status: input.status,
                    date: self.clock.today(),
                })
                .await?;
            tracing::info!(invoice_id = %id, "invoice created");
            Ok::<_, EngineError>(())
        }
        .await;
        self.settle(Mutation::Create, result)
    }

    /// Updates customer, amount and status of the invoice `id`.
    ///
    /// Invalid input short-circuits before the store is touched, same as
    /// [`create_invoice`](Self::create_invoice). The date is never changed.
    pub async fn update_invoice(&self, id: &str, form: &FormData) -> ResultEngine<ActionOutcome> {
        let result = async {
            let input = validate_invoice_form(form)?;
            self.store
                .update(
                    id,
                    InvoiceChanges {
                        customer_id: input.customer_id,
                        amount: input.amount,
                        status: input.status,
                    },
                )
                .await?;
            tracing::info!(invoice_id = %id, "invoice updated");
            Ok::<_, EngineError>(())
        }
        .await;
        self.settle(Mutation::Update, result)
    }

    /// Deletes the invoice `id`.
    ///
    /// Success only invalidates the listing view: delete is issued from the
    /// listing itself, so there is nowhere to navigate to.
    pub async fn delete_invoice(&self, id: &str) -> ResultEngine<ActionOutcome> {
        let result = self
            .store
            .delete(id)
            .await
            .map_err(EngineError::from)
            .inspect(|_| tracing::info!(invoice_id = %id, "invoice deleted"));
        self.settle(Mutation::Delete, result)
    }

    /// Every invoice, newest first. This is the read the listing view is built from.
    pub async fn list_invoices(&self) -> ResultEngine<Vec<Invoice>> {
        Ok(self.store.list().await?)
    }

    /// Reacts to the result of a mutation attempt.
    ///
    /// Field-validation and persistence errors become form state; anything
    /// else is not ours to handle and is returned as `Err`.
    fn settle(&self, mutation: Mutation, result: ResultEngine<()>) -> ResultEngine<ActionOutcome> {
        match result {
            Ok(()) => {
                self.cache.invalidate(&self.listing_view);
                Ok(match mutation {
                    Mutation::Delete => ActionOutcome::Completed,
                    Mutation::Create | Mutation::Update => {
                        ActionOutcome::Navigate(NavigationIntent::to(self.listing_view.as_str()))
                    }
                })
            }
            Err(EngineError::Validation(errors)) => {
                tracing::debug!("{} invoice rejected: {errors}", mutation.verb());
                Ok(ActionOutcome::State(ActionState::invalid(mutation, errors)))
            }
            Err(EngineError::Persistence(cause)) => {
                tracing::warn!("failed to {} invoice: {cause}", mutation.verb());
                Ok(ActionOutcome::State(ActionState::failed(mutation)))
            }
            Err(other) => Err(other),
        }
    }
}
