//! Invoice Workflow Coordinator
//!
//! Owns the [`WorkflowState`] and every collaborator of one invoice run.
//! Each step mutates state only through the narrow methods below; after
//! every successful mutation observers are notified synchronously.
//!
//! Mutators are bound to their step:
//! - `CustomerInfo`: `set_customer`, `lookup_customer`
//! - `DocumentSelection`: `set_line_items`, `add/edit/remove_line_item`
//! - `Assignment`: `set_assignments`, `assign_copy`, `unassign_copy`, `assign_item`
//! - `InvoiceDetails`: `set_invoice_details`, `apply_financial_change`
//! - `Preview`: `snapshot`, `finish`

use super::customer::{normalize_customer, validate_customer};
use super::error::{WorkflowError, WorkflowResult};
use super::navigation::{next_step, prev_step};
use super::observer::{ObserverRegistry, StateObserver, SubscriptionId};
use super::snapshot::InvoiceSnapshot;
use super::state::WorkflowState;
use crate::assignment::{AssignmentError, AssignmentLedger, unpack_items};
use crate::core::Config;
use crate::finance::{self, FinancialChange};
use crate::pricing::{PriceCatalog, calculate_line_item, recalculate_line_item};
use crate::services::{CustomerDirectory, FeeScheduleProvider, InvoiceSequence, SnapshotSink};
use shared::error::{FieldError, ValidationErrors};
use shared::invoice::{
    CopyId, InvoiceDetails, InvoiceLineItem, LineItemId, PricingOptions, UnpackedCopy,
    WorkflowStep,
};
use shared::models::Customer;
use std::collections::HashSet;

pub struct InvoiceWorkflow {
    config: Config,
    catalog: PriceCatalog,
    directory: Box<dyn CustomerDirectory>,
    sequence: Box<dyn InvoiceSequence>,
    state: WorkflowState,
    observers: ObserverRegistry,
}

impl InvoiceWorkflow {
    /// Start a new invoice run
    ///
    /// The catalog and fee table are fetched once here; provider failures are
    /// returned untouched.
    pub fn start(
        config: Config,
        provider: &dyn FeeScheduleProvider,
        directory: Box<dyn CustomerDirectory>,
        sequence: Box<dyn InvoiceSequence>,
    ) -> WorkflowResult<Self> {
        let catalog = PriceCatalog::load(provider).map_err(WorkflowError::External)?;
        tracing::info!(
            services = catalog.services().len(),
            "Invoice workflow started"
        );
        Ok(Self {
            config,
            catalog,
            directory,
            sequence,
            state: WorkflowState::new(),
            observers: ObserverRegistry::default(),
        })
    }

    // ========== Queries ==========

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn step(&self) -> WorkflowStep {
        self.state.step
    }

    /// `1 + companions` once a customer is entered, 0 before
    pub fn number_of_people(&self) -> usize {
        self.state.number_of_people()
    }

    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    pub fn directory(&self) -> &dyn CustomerDirectory {
        self.directory.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ========== Observers ==========

    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Returns false when the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn publish(&mut self) {
        self.observers.notify(&self.state);
    }

    fn require_step(&self, step: WorkflowStep, action: &'static str) -> WorkflowResult<()> {
        if self.state.step != step {
            return Err(WorkflowError::StepNotAllowed {
                step: self.state.step,
                action,
            });
        }
        Ok(())
    }

    // ========== CustomerInfo ==========

    /// Replace the customer draft; validated when leaving the step
    pub fn set_customer(&mut self, customer: Customer) -> WorkflowResult<()> {
        self.require_step(WorkflowStep::CustomerInfo, "set_customer")?;
        self.state.customer = Some(normalize_customer(customer));
        self.publish();
        Ok(())
    }

    /// Pre-fill the customer from the directory when the identifier is known
    pub fn lookup_customer(&mut self, identifier: &str) -> WorkflowResult<Option<Customer>> {
        self.require_step(WorkflowStep::CustomerInfo, "lookup_customer")?;
        let found = self
            .directory
            .lookup_customer(identifier)
            .map_err(WorkflowError::External)?;
        let found = found.map(normalize_customer);
        if let Some(customer) = &found {
            tracing::debug!(identifier, "Existing customer found");
            self.state.customer = Some(customer.clone());
            self.publish();
        }
        Ok(found)
    }

    // ========== DocumentSelection ==========

    /// Replace every line item
    ///
    /// Items must reference catalog services, carry distinct ids and satisfy
    /// `total_price == sum of sub-prices`.
    pub fn set_line_items(&mut self, items: Vec<InvoiceLineItem>) -> WorkflowResult<()> {
        self.require_step(WorkflowStep::DocumentSelection, "set_line_items")?;
        self.validate_line_items(&items).into_result()?;
        self.state.line_items = items;
        self.state.touch_items();
        self.publish();
        Ok(())
    }

    /// Price a catalog service and append it
    pub fn add_line_item(
        &mut self,
        service_id: &str,
        options: &PricingOptions,
    ) -> WorkflowResult<LineItemId> {
        self.require_step(WorkflowStep::DocumentSelection, "add_line_item")?;
        let service = self
            .catalog
            .service(service_id)
            .ok_or_else(|| WorkflowError::ServiceNotFound(service_id.to_string()))?;
        let item = calculate_line_item(service, self.catalog.fees(), options)?;
        let id = item.id;

        tracing::info!(%id, service_id, total_price = item.total_price, "Line item added");
        self.state.line_items.push(item);
        self.state.touch_items();
        self.publish();
        Ok(id)
    }

    /// Re-price an item under new options, keeping its identity and position
    pub fn edit_line_item(
        &mut self,
        id: LineItemId,
        options: &PricingOptions,
    ) -> WorkflowResult<()> {
        self.require_step(WorkflowStep::DocumentSelection, "edit_line_item")?;
        let index = self.item_index(id)?;
        let current = &self.state.line_items[index];
        let service = self
            .catalog
            .service(&current.service_id)
            .ok_or_else(|| WorkflowError::ServiceNotFound(current.service_id.clone()))?;
        let item = recalculate_line_item(current, service, self.catalog.fees(), options)?;

        tracing::info!(%id, total_price = item.total_price, "Line item edited");
        self.state.line_items[index] = item;
        self.state.touch_items();
        self.publish();
        Ok(())
    }

    pub fn remove_line_item(&mut self, id: LineItemId) -> WorkflowResult<InvoiceLineItem> {
        self.require_step(WorkflowStep::DocumentSelection, "remove_line_item")?;
        let index = self.item_index(id)?;
        let removed = self.state.line_items.remove(index);

        tracing::info!(%id, "Line item removed");
        self.state.touch_items();
        self.publish();
        Ok(removed)
    }

    fn item_index(&self, id: LineItemId) -> WorkflowResult<usize> {
        self.state
            .line_items
            .iter()
            .position(|i| i.id == id)
            .ok_or(WorkflowError::LineItemNotFound(id))
    }

    fn validate_line_items(&self, items: &[InvoiceLineItem]) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let mut ids = HashSet::new();
        for (i, item) in items.iter().enumerate() {
            if !ids.insert(item.id) {
                errors.add(format!("line_items[{i}].id"), "duplicates another line item");
            }
            if self.catalog.service(&item.service_id).is_none() {
                errors.add(
                    format!("line_items[{i}].service_id"),
                    format!("{} is not in the catalog", item.service_id),
                );
            }
            if item.quantity < 1 || item.page_count < 1 {
                errors.add(format!("line_items[{i}].quantity"), "must be at least 1");
            }
            if item.quantity != item.copies + item.extra_copies {
                errors.add(
                    format!("line_items[{i}].quantity"),
                    "must equal copies plus extra copies",
                );
            }
            if item.total_price != item.sum_of_parts() {
                errors.add(
                    format!("line_items[{i}].total_price"),
                    "must equal the sum of its sub-prices",
                );
            }
        }
        errors
    }

    // ========== Assignment ==========

    /// Replace the whole ledger
    ///
    /// It must be built for exactly the people of this invoice and partition
    /// exactly the current copies.
    pub fn set_assignments(&mut self, ledger: AssignmentLedger) -> WorkflowResult<()> {
        self.require_step(WorkflowStep::Assignment, "set_assignments")?;
        if !ledger.has_people(self.state.people()) {
            return Err(WorkflowError::Validation(
                FieldError::new("assignments", "must list exactly the people on this invoice")
                    .into(),
            ));
        }
        self.check_partition(&ledger)?;
        self.state.ledger = Some(ledger);
        self.publish();
        Ok(())
    }

    pub fn assign_copy(&mut self, copy_id: CopyId, person: &str) -> WorkflowResult<()> {
        self.require_step(WorkflowStep::Assignment, "assign_copy")?;
        self.mutate_ledger(|ledger| ledger.assign(copy_id, person))?;
        tracing::debug!(%copy_id, person, "Copy assigned");
        Ok(())
    }

    pub fn unassign_copy(&mut self, copy_id: CopyId) -> WorkflowResult<()> {
        self.require_step(WorkflowStep::Assignment, "unassign_copy")?;
        self.mutate_ledger(|ledger| ledger.unassign(copy_id))?;
        tracing::debug!(%copy_id, "Copy unassigned");
        Ok(())
    }

    /// Move every copy of one line item to `person`; returns the count moved
    pub fn assign_item(&mut self, item_id: LineItemId, person: &str) -> WorkflowResult<usize> {
        self.require_step(WorkflowStep::Assignment, "assign_item")?;
        let moved = self.mutate_ledger(|ledger| ledger.assign_item(item_id, person))?;
        tracing::debug!(%item_id, person, moved, "Line item copies assigned");
        Ok(moved)
    }

    fn mutate_ledger<T>(
        &mut self,
        op: impl FnOnce(&mut AssignmentLedger) -> Result<T, AssignmentError>,
    ) -> WorkflowResult<T> {
        let Some(ledger) = self.state.ledger.as_mut() else {
            return Err(WorkflowError::PartitionViolation(
                "no ledger at the Assignment step".into(),
            ));
        };
        let result = op(ledger)?;
        if let Some(ledger) = &self.state.ledger {
            self.check_partition(ledger)?;
        }
        self.publish();
        Ok(result)
    }

    fn check_partition(&self, ledger: &AssignmentLedger) -> WorkflowResult<()> {
        ledger.verify_partition(&self.state.copies).map_err(|e| {
            tracing::error!(error = %e, "Assignment ledger partition violated");
            WorkflowError::from(e)
        })
    }

    /// Build a fresh ledger unless the current one still matches
    ///
    /// Returns the unpacked copies and the ledger without touching state.
    fn build_ledger(
        &self,
        single_person: bool,
    ) -> WorkflowResult<Option<(Vec<UnpackedCopy>, AssignmentLedger)>> {
        if self.state.ledger_is_current() {
            return Ok(None);
        }

        let copies = unpack_items(&self.state.line_items, &self.config.misc_category);
        let people: Vec<String> = self.state.people().into_iter().map(String::from).collect();
        let ledger = if single_person && people.len() == 1 {
            AssignmentLedger::auto_assign(people[0].clone(), copies.clone())?
        } else {
            AssignmentLedger::new(people, copies.clone())?
        };
        Ok(Some((copies, ledger)))
    }

    fn install_ledger(&mut self, copies: Vec<UnpackedCopy>, ledger: AssignmentLedger) {
        tracing::debug!(copies = copies.len(), "Assignment ledger rebuilt");
        self.state.copies = copies;
        self.state.ledger = Some(ledger);
        self.state.ledger_revision = Some(self.state.items_revision);
    }

    // ========== InvoiceDetails ==========

    /// Replace the details form
    ///
    /// Subtotals and document count always come from the line items, and an
    /// already assigned invoice number is kept.
    pub fn set_invoice_details(&mut self, mut details: InvoiceDetails) -> WorkflowResult<()> {
        self.require_step(WorkflowStep::InvoiceDetails, "set_invoice_details")?;
        finance::validate_details(&details).into_result()?;
        if self.state.details.invoice_number.is_some() {
            details.invoice_number = self.state.details.invoice_number.clone();
        }
        finance::refresh_from_items(&mut details, &self.state.line_items);
        self.state.details = details;
        self.publish();
        Ok(())
    }

    pub fn apply_financial_change(&mut self, change: FinancialChange) -> WorkflowResult<()> {
        self.require_step(WorkflowStep::InvoiceDetails, "apply_financial_change")?;
        finance::apply_change(&mut self.state.details, change)?;
        self.publish();
        Ok(())
    }

    fn reserve_invoice_number(&mut self) -> WorkflowResult<Option<String>> {
        if self.state.details.invoice_number.is_some() {
            return Ok(None);
        }
        let number = self
            .sequence
            .next_invoice_number()
            .map_err(WorkflowError::External)?;
        tracing::info!(invoice_number = %number, "Invoice number assigned");
        Ok(Some(number))
    }

    // ========== Navigation ==========

    /// Validate the current step and move forward
    pub fn next(&mut self) -> WorkflowResult<WorkflowStep> {
        let from = self.state.step;
        let people = self.number_of_people();
        let Some(to) = next_step(from, people) else {
            return Err(WorkflowError::StepNotAllowed {
                step: from,
                action: "next",
            });
        };

        // Everything fallible runs before state is touched
        let mut rebuilt = None;
        match from {
            WorkflowStep::CustomerInfo => self.leave_customer_info()?,
            WorkflowStep::DocumentSelection => {
                if self.state.line_items.is_empty() {
                    return Err(WorkflowError::NoLineItems);
                }
                rebuilt = self.build_ledger(to == WorkflowStep::InvoiceDetails)?;
            }
            WorkflowStep::Assignment => self.leave_assignment()?,
            WorkflowStep::InvoiceDetails | WorkflowStep::Preview => {}
        }
        let invoice_number = if to == WorkflowStep::InvoiceDetails {
            self.reserve_invoice_number()?
        } else {
            None
        };

        if let Some((copies, ledger)) = rebuilt {
            self.install_ledger(copies, ledger);
        }
        if from == WorkflowStep::DocumentSelection {
            self.state.assignment_visited = to == WorkflowStep::Assignment;
        }
        if to == WorkflowStep::InvoiceDetails {
            if invoice_number.is_some() {
                self.state.details.invoice_number = invoice_number;
            }
            finance::refresh_from_items(&mut self.state.details, &self.state.line_items);
        }

        self.state.step = to;
        tracing::info!(%from, %to, people, "Workflow step advanced");
        self.publish();
        Ok(to)
    }

    /// Move backward; never discards entered data
    pub fn back(&mut self) -> WorkflowResult<WorkflowStep> {
        let from = self.state.step;
        let Some(to) = prev_step(from, self.state.assignment_visited) else {
            return Err(WorkflowError::StepNotAllowed {
                step: from,
                action: "back",
            });
        };
        self.state.step = to;
        tracing::info!(%from, %to, "Workflow step went back");
        self.publish();
        Ok(to)
    }

    fn leave_customer_info(&mut self) -> WorkflowResult<()> {
        let customer = self.state.customer.as_ref().ok_or(WorkflowError::CustomerMissing)?;
        validate_customer(customer).into_result()?;

        if self.config.save_customer_on_advance {
            let saved = self
                .directory
                .save_customer(customer.clone())
                .map_err(WorkflowError::External)?;
            tracing::info!(customer_id = ?saved.id, "Customer saved");
            self.state.customer = Some(saved);
        }
        Ok(())
    }

    fn leave_assignment(&mut self) -> WorkflowResult<()> {
        let Some(ledger) = &self.state.ledger else {
            return Err(WorkflowError::PartitionViolation(
                "no ledger at the Assignment step".into(),
            ));
        };
        self.check_partition(ledger)?;

        let unassigned = ledger.unassigned_count();
        if unassigned > 0 {
            if self.config.require_full_assignment {
                return Err(WorkflowError::UnassignedCopies(unassigned));
            }
            tracing::warn!(unassigned, "Leaving assignment with unassigned copies");
        }
        Ok(())
    }

    // ========== Preview ==========

    /// Build the final snapshot without consuming the workflow
    pub fn snapshot(&self) -> WorkflowResult<InvoiceSnapshot> {
        self.require_step(WorkflowStep::Preview, "snapshot")?;
        let customer = self.state.customer.clone().ok_or(WorkflowError::CustomerMissing)?;
        let ledger = self.state.ledger.clone().ok_or_else(|| {
            WorkflowError::PartitionViolation("no ledger at the Preview step".into())
        })?;
        Ok(InvoiceSnapshot::new(
            customer,
            self.state.line_items.clone(),
            ledger,
            self.state.details.clone(),
        ))
    }

    /// Hand the snapshot to `sink` and discard the workflow state
    ///
    /// On failure the workflow is returned alongside the error so the caller
    /// can retry or go back.
    pub fn finish(
        self,
        sink: &mut dyn SnapshotSink,
    ) -> Result<InvoiceSnapshotReceipt, (Self, WorkflowError)> {
        let snapshot = match self.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => return Err((self, e)),
        };
        let receipt = InvoiceSnapshotReceipt {
            invoice_number: snapshot.invoice_details.invoice_number.clone(),
            final_amount: snapshot.final_amount(),
        };
        if let Err(e) = sink.accept(snapshot) {
            return Err((self, WorkflowError::External(e)));
        }
        tracing::info!(
            invoice_number = ?receipt.invoice_number,
            final_amount = receipt.final_amount,
            "Invoice snapshot handed off"
        );
        Ok(receipt)
    }
}

/// Summary returned once the sink accepted the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSnapshotReceipt {
    pub invoice_number: Option<String>,
    pub final_amount: i64,
}

impl std::fmt::Debug for InvoiceWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceWorkflow")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
