use anyhow::Context;
use invoice_desk::services::{
    CounterSequence, InMemoryCustomerDirectory, JsonCatalog, JsonWriterSink,
};
use invoice_desk::{AppError, InvoiceDraft, InvoiceWorkflow, run_draft, setup_environment};

fn main() -> anyhow::Result<()> {
    // 1. dotenv, config, logging
    let config = setup_environment();

    let draft_path = std::env::args()
        .nth(1)
        .context("usage: invoice-desk <draft.json>")?;

    tracing::info!(catalog = %config.catalog_path, draft = %draft_path, "Invoice desk starting");

    // 2. Load the draft and the catalog
    let draft = InvoiceDraft::from_path(&draft_path)?;
    let catalog = JsonCatalog::new(&config.catalog_path);

    // 3. Compose the invoice
    let mut workflow = InvoiceWorkflow::start(
        config.clone(),
        &catalog,
        Box::new(InMemoryCustomerDirectory::new()),
        Box::new(CounterSequence::new(config.invoice_number_prefix.clone(), 1)),
    )
    .map_err(AppError::from)?;

    if let Err(e) = run_draft(&mut workflow, &draft) {
        let err = AppError::from(e);
        tracing::error!(code = %err.code, error = %err, "Draft rejected");
        return Err(err.into());
    }

    // 4. Hand the snapshot to stdout
    let mut sink = JsonWriterSink::new(std::io::stdout().lock());
    workflow
        .finish(&mut sink)
        .map_err(|(_, e)| AppError::from(e))?;

    Ok(())
}
