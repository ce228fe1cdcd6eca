use super::*;
use crate::assignment::{AssignmentLedger, UNASSIGNED_KEY};
use crate::core::Config;
use crate::finance::FinancialChange;
use crate::services::{
    CollectingSink, CounterSequence, CustomerDirectory, InMemoryCatalog,
    InMemoryCustomerDirectory, InvoiceSequence, SnapshotSink,
};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::invoice::{PricingOptions, WorkflowStep};
use shared::models::{Customer, DynamicFee, FeeKind, FixedFee, Service};
use std::cell::RefCell;
use std::rc::Rc;

// ========== Fixtures ==========

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(
        vec![
            Service {
                id: "birth".into(),
                name: "Birth certificate".into(),
                category: "certificate".into(),
                base_price: 100_000,
                dynamic_fees: vec![DynamicFee {
                    name: "per page".into(),
                    unit_price: 5_000,
                }],
            },
            Service {
                id: "courier".into(),
                name: "Courier".into(),
                category: "other".into(),
                base_price: 30_000,
                dynamic_fees: vec![],
            },
        ],
        vec![
            FixedFee::new(FeeKind::CertifiedCopy, 0),
            FixedFee::new(FeeKind::OfficialRegistration, 50_000),
            FixedFee::new(FeeKind::JudiciarySeal, 30_000),
            FixedFee::new(FeeKind::ForeignAffairsSeal, 40_000),
            FixedFee::new(FeeKind::ExtraCopy, 20_000),
        ],
    )
}

fn workflow_with(config: Config) -> InvoiceWorkflow {
    InvoiceWorkflow::start(
        config,
        &catalog(),
        Box::new(InMemoryCustomerDirectory::new()),
        Box::new(CounterSequence::new("INV-", 1)),
    )
    .unwrap()
}

fn workflow() -> InvoiceWorkflow {
    workflow_with(Config::default())
}

fn sara() -> Customer {
    Customer::new("0012345678", "Sara", "09121234567")
}

fn copies(quantity: u32) -> PricingOptions {
    PricingOptions {
        quantity,
        ..Default::default()
    }
}

/// Customer entered, one 3-copy item added, at DocumentSelection
fn at_documents(customer: Customer) -> InvoiceWorkflow {
    let mut wf = workflow();
    wf.set_customer(customer).unwrap();
    wf.next().unwrap();
    wf.add_line_item("birth", &copies(3)).unwrap();
    wf
}

struct FailingDirectory;

impl CustomerDirectory for FailingDirectory {
    fn lookup_customer(&self, _identifier: &str) -> AppResult<Option<Customer>> {
        Err(AppError::external("customer directory", "connection refused"))
    }

    fn save_customer(&mut self, _customer: Customer) -> AppResult<Customer> {
        Err(AppError::external("customer directory", "connection refused"))
    }
}

struct FailingSequence;

impl InvoiceSequence for FailingSequence {
    fn next_invoice_number(&mut self) -> AppResult<String> {
        Err(AppError::external("invoice sequence", "exhausted"))
    }
}

struct RejectingSink;

impl SnapshotSink for RejectingSink {
    fn accept(&mut self, _snapshot: InvoiceSnapshot) -> AppResult<()> {
        Err(AppError::external("archive", "disk full"))
    }
}

// ========== Customer step ==========

#[test]
fn test_next_without_customer_is_blocked() {
    let mut wf = workflow();
    assert!(matches!(wf.next(), Err(WorkflowError::CustomerMissing)));
    assert_eq!(wf.step(), WorkflowStep::CustomerInfo);
    assert_eq!(wf.number_of_people(), 0);
}

#[test]
fn test_invalid_customer_reports_fields_and_recovers() {
    let mut wf = workflow();
    wf.set_customer(Customer::new("", "Sara", "12")).unwrap();

    let Err(WorkflowError::Validation(errors)) = wf.next() else {
        panic!("expected validation error");
    };
    assert!(errors.has_field("customer.identifier"));
    assert!(errors.has_field("customer.phone"));
    assert_eq!(wf.step(), WorkflowStep::CustomerInfo);

    wf.set_customer(sara()).unwrap();
    assert_eq!(wf.next().unwrap(), WorkflowStep::DocumentSelection);
}

#[test]
fn test_number_of_people() {
    let mut wf = workflow();
    wf.set_customer(sara().with_companion("Reza", None).with_companion("Mina", None))
        .unwrap();
    assert_eq!(wf.number_of_people(), 3);
}

#[test]
fn test_save_customer_on_advance() {
    let config = Config {
        save_customer_on_advance: true,
        ..Config::default()
    };
    let mut wf = workflow_with(config);
    wf.set_customer(sara()).unwrap();
    wf.next().unwrap();

    assert_eq!(wf.state().customer.as_ref().unwrap().id, Some(1));
    let stored = wf.directory().lookup_customer("0012345678").unwrap();
    assert_eq!(stored.unwrap().name, "Sara");
}

#[test]
fn test_lookup_customer_prefills() {
    let mut directory = InMemoryCustomerDirectory::new();
    directory.save_customer(sara().with_companion("Reza", None)).unwrap();
    let mut wf = InvoiceWorkflow::start(
        Config::default(),
        &catalog(),
        Box::new(directory),
        Box::new(CounterSequence::new("INV-", 1)),
    )
    .unwrap();

    assert!(wf.lookup_customer("unknown").unwrap().is_none());
    assert!(wf.state().customer.is_none());

    let found = wf.lookup_customer("0012345678").unwrap().unwrap();
    assert_eq!(found.companions.len(), 1);
    assert_eq!(wf.number_of_people(), 2);
}

#[test]
fn test_lookup_customer_trims_stored_record() {
    let mut directory = InMemoryCustomerDirectory::new();
    directory
        .save_customer(
            Customer::new("0012345678", "  Sara ", " 09121234567 ")
                .with_companion(" Reza  ", None),
        )
        .unwrap();
    let mut wf = InvoiceWorkflow::start(
        Config::default(),
        &catalog(),
        Box::new(directory),
        Box::new(CounterSequence::new("INV-", 1)),
    )
    .unwrap();

    let found = wf.lookup_customer("0012345678").unwrap().unwrap();
    assert_eq!(found.name, "Sara");
    assert_eq!(wf.state().people(), vec!["Sara", "Reza"]);
    assert_eq!(wf.state().customer.as_ref().unwrap().phone, "09121234567");
}

#[test]
fn test_reserved_companion_name_blocks_customer_step() {
    let mut wf = workflow();
    wf.set_customer(sara().with_companion(UNASSIGNED_KEY, None)).unwrap();

    let Err(WorkflowError::Validation(errors)) = wf.next() else {
        panic!("expected validation error");
    };
    assert!(errors.has_field("companions[0].name"));
    assert_eq!(wf.step(), WorkflowStep::CustomerInfo);
}

#[test]
fn test_directory_failure_propagates_untouched() {
    let config = Config {
        save_customer_on_advance: true,
        ..Config::default()
    };
    let mut wf = InvoiceWorkflow::start(
        config,
        &catalog(),
        Box::new(FailingDirectory),
        Box::new(CounterSequence::new("INV-", 1)),
    )
    .unwrap();

    let Err(WorkflowError::External(err)) = wf.lookup_customer("1") else {
        panic!("expected external error");
    };
    assert_eq!(err.code, ErrorCode::ExternalServiceError);

    wf.set_customer(sara()).unwrap();
    let Err(WorkflowError::External(err)) = wf.next() else {
        panic!("expected external error");
    };
    assert_eq!(err.message, "customer directory failed: connection refused");
    assert_eq!(wf.step(), WorkflowStep::CustomerInfo);
}

#[test]
fn test_catalog_failure_propagates() {
    let broken = InMemoryCatalog::new(vec![], vec![FixedFee::new(FeeKind::ExtraCopy, 1)]);
    let err = InvoiceWorkflow::start(
        Config::default(),
        &broken,
        Box::new(InMemoryCustomerDirectory::new()),
        Box::new(CounterSequence::new("INV-", 1)),
    )
    .unwrap_err();
    let WorkflowError::External(err) = err else {
        panic!("expected external error");
    };
    assert_eq!(err.code, ErrorCode::CatalogUnavailable);
}

// ========== Document step ==========

#[test]
fn test_mutators_bound_to_their_step() {
    let mut wf = workflow();
    assert!(matches!(
        wf.add_line_item("birth", &copies(1)),
        Err(WorkflowError::StepNotAllowed {
            step: WorkflowStep::CustomerInfo,
            ..
        })
    ));
    assert!(matches!(
        wf.apply_financial_change(FinancialChange::DiscountAmount(1)),
        Err(WorkflowError::StepNotAllowed { .. })
    ));
    assert!(matches!(wf.back(), Err(WorkflowError::StepNotAllowed { .. })));
}

#[test]
fn test_line_item_lifecycle() {
    let mut wf = at_documents(sara());
    let first = wf.state().line_items[0].id;
    let second = wf.add_line_item("courier", &copies(1)).unwrap();
    assert_eq!(wf.state().line_items.len(), 2);

    let mut options = copies(2);
    options.judiciary_seal = true;
    wf.edit_line_item(first, &options).unwrap();
    let edited = wf.state().line_item(first).unwrap();
    assert_eq!(edited.quantity, 2);
    assert_eq!(edited.judiciary_seal_price, 60_000);
    assert_eq!(wf.state().line_items[0].id, first);

    let removed = wf.remove_line_item(second).unwrap();
    assert_eq!(removed.service_id, "courier");
    assert!(matches!(
        wf.remove_line_item(second),
        Err(WorkflowError::LineItemNotFound(_))
    ));
}

#[test]
fn test_add_line_item_errors() {
    let mut wf = at_documents(sara());
    assert!(matches!(
        wf.add_line_item("apostille", &copies(1)),
        Err(WorkflowError::ServiceNotFound(_))
    ));
    let Err(WorkflowError::Validation(errors)) = wf.add_line_item("birth", &copies(0)) else {
        panic!("expected validation error");
    };
    assert!(errors.has_field("options.quantity"));
    assert_eq!(wf.state().line_items.len(), 1);
}

#[test]
fn test_set_line_items_validates_shape() {
    let mut wf = at_documents(sara());
    let mut item = wf.state().line_items[0].clone();
    item.total_price += 1;

    let Err(WorkflowError::Validation(errors)) = wf.set_line_items(vec![item.clone(), item]) else {
        panic!("expected validation error");
    };
    assert!(errors.has_field("line_items[0].total_price"));
    assert!(errors.has_field("line_items[1].id"));

    wf.set_line_items(vec![]).unwrap();
    assert!(matches!(wf.next(), Err(WorkflowError::NoLineItems)));
}

// ========== Skip rule ==========

#[test]
fn test_single_person_skips_assignment() {
    let mut wf = at_documents(sara());
    assert_eq!(wf.next().unwrap(), WorkflowStep::InvoiceDetails);

    let state = wf.state();
    assert!(!state.assignment_visited);
    let ledger = state.ledger.as_ref().unwrap();
    assert_eq!(ledger.buckets().len(), 1);
    assert_eq!(ledger.bucket("Sara").unwrap().len(), 3);
    assert_eq!(ledger.unassigned_count(), 0);
    ledger.verify_partition(&state.copies).unwrap();

    assert_eq!(wf.back().unwrap(), WorkflowStep::DocumentSelection);
}

#[test]
fn test_multi_person_enters_assignment() {
    let mut wf = at_documents(sara().with_companion("Reza", None));
    assert_eq!(wf.next().unwrap(), WorkflowStep::Assignment);

    let ledger = wf.state().ledger.as_ref().unwrap();
    assert_eq!(ledger.unassigned_count(), 3);
    assert_eq!(ledger.people().collect::<Vec<_>>(), vec!["Sara", "Reza"]);
}

// ========== Assignment step ==========

#[test]
fn test_assignment_preserved_across_back_and_forth() {
    let mut wf = at_documents(sara().with_companion("Reza", None));
    wf.next().unwrap();
    let ids: Vec<_> = wf.state().copies.iter().map(|c| c.id).collect();
    wf.assign_copy(ids[0], "Sara").unwrap();
    wf.assign_copy(ids[1], "Reza").unwrap();

    assert_eq!(wf.next().unwrap(), WorkflowStep::InvoiceDetails);
    assert_eq!(wf.back().unwrap(), WorkflowStep::Assignment);
    assert_eq!(wf.back().unwrap(), WorkflowStep::DocumentSelection);
    assert_eq!(wf.next().unwrap(), WorkflowStep::Assignment);

    let ledger = wf.state().ledger.as_ref().unwrap();
    assert_eq!(ledger.owner_of(ids[0]), Some("Sara"));
    assert_eq!(ledger.owner_of(ids[1]), Some("Reza"));
    assert_eq!(ledger.owner_of(ids[2]), Some(UNASSIGNED_KEY));
}

#[test]
fn test_item_change_rebuilds_ledger() {
    let mut wf = at_documents(sara().with_companion("Reza", None));
    wf.next().unwrap();
    let item = wf.state().line_items[0].id;
    wf.assign_item(item, "Reza").unwrap();

    wf.back().unwrap();
    wf.edit_line_item(item, &copies(2)).unwrap();
    wf.next().unwrap();

    let ledger = wf.state().ledger.as_ref().unwrap();
    assert_eq!(ledger.copy_count(), 2);
    assert_eq!(ledger.unassigned_count(), 2);
    assert_eq!(ledger.person_total("Reza"), Some(0));
}

#[test]
fn test_assignment_errors() {
    let mut wf = at_documents(sara().with_companion("Reza", None));
    wf.next().unwrap();
    let id = wf.state().copies[0].id;

    assert!(matches!(
        wf.assign_copy(id, "Mina"),
        Err(WorkflowError::Assignment(_))
    ));

    let foreign = AssignmentLedger::new(["Sara", "Reza"], vec![]).unwrap();
    assert!(matches!(
        wf.set_assignments(foreign),
        Err(WorkflowError::PartitionViolation(_))
    ));

    let wrong_people = AssignmentLedger::new(["Sara"], wf.state().copies.clone()).unwrap();
    assert!(matches!(
        wf.set_assignments(wrong_people),
        Err(WorkflowError::Validation(_))
    ));

    let mut replacement =
        AssignmentLedger::new(["Sara", "Reza"], wf.state().copies.clone()).unwrap();
    replacement.assign(id, "Reza").unwrap();
    wf.set_assignments(replacement).unwrap();
    assert_eq!(wf.state().ledger.as_ref().unwrap().owner_of(id), Some("Reza"));
}

#[test]
fn test_require_full_assignment() {
    let config = Config::with_overrides("other", true);
    let mut wf = workflow_with(config);
    wf.set_customer(sara().with_companion("Reza", None)).unwrap();
    wf.next().unwrap();
    let item = wf.add_line_item("birth", &copies(2)).unwrap();
    wf.next().unwrap();

    assert!(matches!(wf.next(), Err(WorkflowError::UnassignedCopies(2))));
    wf.assign_item(item, "Sara").unwrap();
    assert_eq!(wf.next().unwrap(), WorkflowStep::InvoiceDetails);
}

// ========== Details step ==========

#[test]
fn test_entering_details_calculates_and_numbers_once() {
    let mut wf = at_documents(sara());
    wf.next().unwrap();
    let details = &wf.state().details;
    assert_eq!(details.invoice_number.as_deref(), Some("INV-000001"));
    assert_eq!(details.document_count, 3);
    assert_eq!(details.subtotals.translation, 300_000);
    assert_eq!(details.final_amount, 300_000);

    wf.back().unwrap();
    wf.add_line_item("courier", &copies(1)).unwrap();
    wf.next().unwrap();
    let details = &wf.state().details;
    assert_eq!(details.invoice_number.as_deref(), Some("INV-000001"));
    assert_eq!(details.document_count, 4);
    assert_eq!(details.final_amount, 330_000);
}

#[test]
fn test_sequence_failure_blocks_entry() {
    let mut wf = InvoiceWorkflow::start(
        Config::default(),
        &catalog(),
        Box::new(InMemoryCustomerDirectory::new()),
        Box::new(FailingSequence),
    )
    .unwrap();
    wf.set_customer(sara()).unwrap();
    wf.next().unwrap();
    wf.add_line_item("birth", &copies(1)).unwrap();

    let published = Rc::new(RefCell::new(0));
    let counter = published.clone();
    wf.subscribe(move |_: &WorkflowState| *counter.borrow_mut() += 1);

    assert!(matches!(wf.next(), Err(WorkflowError::External(_))));
    assert_eq!(wf.step(), WorkflowStep::DocumentSelection);
    // nothing was rebuilt behind the observers' back
    assert!(wf.state().ledger.is_none());
    assert!(wf.state().copies.is_empty());
    assert!(wf.state().details.invoice_number.is_none());
    assert_eq!(*published.borrow(), 0);
}

#[test]
fn test_financial_changes_and_details_replacement() {
    let mut wf = at_documents(sara());
    wf.next().unwrap();

    wf.apply_financial_change(FinancialChange::DiscountPercent(Decimal::TEN))
        .unwrap();
    assert_eq!(wf.state().details.discount.amount, 30_000);

    let mut details = wf.state().details.clone();
    details.invoice_number = None;
    details.subtotals.translation = 1;
    details.remarks = Some("call before delivery".into());
    wf.set_invoice_details(details).unwrap();

    let details = &wf.state().details;
    assert_eq!(details.invoice_number.as_deref(), Some("INV-000001"));
    assert_eq!(details.subtotals.translation, 300_000);
    assert_eq!(details.discount.amount, 30_000);
    assert_eq!(details.final_amount, 270_000);
}

// ========== Observers ==========

#[test]
fn test_observers_notified_synchronously() {
    let mut wf = workflow();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let log = seen.clone();
    let id = wf.subscribe(move |state: &WorkflowState| log.borrow_mut().push(state.step));

    wf.set_customer(sara()).unwrap();
    wf.next().unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![WorkflowStep::CustomerInfo, WorkflowStep::DocumentSelection]
    );

    // failed mutations publish nothing
    let _ = wf.add_line_item("missing", &copies(1));
    assert_eq!(seen.borrow().len(), 2);

    assert!(wf.unsubscribe(id));
    assert_eq!(wf.observer_count(), 0);
    wf.back().unwrap();
    assert_eq!(seen.borrow().len(), 2);
}

// ========== Preview ==========

#[test]
fn test_finish_hands_off_snapshot() {
    let mut wf = at_documents(sara().with_companion("Reza", None));
    wf.next().unwrap();
    wf.next().unwrap();
    wf.next().unwrap();
    assert_eq!(wf.step(), WorkflowStep::Preview);
    assert!(matches!(wf.next(), Err(WorkflowError::StepNotAllowed { .. })));

    let mut sink = CollectingSink::default();
    let receipt = wf.finish(&mut sink).unwrap();
    assert_eq!(receipt.invoice_number.as_deref(), Some("INV-000001"));
    assert_eq!(receipt.final_amount, 300_000);

    let snapshot = &sink.snapshots[0];
    assert_eq!(snapshot.companions.len(), 1);
    assert!(snapshot.customer.companions.is_empty());
    assert_eq!(snapshot.line_items.len(), 1);
    assert_eq!(snapshot.assignment_ledger.unassigned_count(), 3);
}

#[test]
fn test_finish_outside_preview_returns_workflow() {
    let wf = at_documents(sara());
    let (wf, err) = wf.finish(&mut CollectingSink::default()).unwrap_err();
    assert!(matches!(err, WorkflowError::StepNotAllowed { .. }));
    assert_eq!(wf.step(), WorkflowStep::DocumentSelection);
}

#[test]
fn test_sink_failure_returns_workflow() {
    let mut wf = at_documents(sara());
    wf.next().unwrap();
    wf.next().unwrap();

    let (wf, err) = wf.finish(&mut RejectingSink).unwrap_err();
    let WorkflowError::External(err) = err else {
        panic!("expected external error");
    };
    assert_eq!(err.message, "archive failed: disk full");
    assert_eq!(wf.step(), WorkflowStep::Preview);
}
