use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use bakeledger_invoicing::{InvoiceDraft, InvoiceNumber, RenderedInvoice, render};
use bakeledger_products::ProductId;

use super::PRODUCTS;
use crate::clock::Clock;
use crate::error::ServiceResult;
use crate::store::{KeyValueStore, StoreError, keys};

/// Invoice numbering, drafting and text export.
#[derive(Debug, Clone)]
pub struct InvoiceService<S, C> {
    store: S,
    clock: C,
    business_name: String,
}

impl<S, C> InvoiceService<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub fn new(store: S, clock: C, business_name: impl Into<String>) -> Self {
        Self {
            store,
            clock,
            business_name: business_name.into(),
        }
    }

    pub fn business_name(&self) -> &str {
        &self.business_name
    }

    /// The last number handed out. A missing or unreadable counter counts as none.
    pub fn last_number(&self) -> ServiceResult<Option<InvoiceNumber>> {
        let Some(raw) = self.store.get(keys::LAST_INVOICE_NUMBER)? else {
            return Ok(None);
        };
        match raw.trim().parse::<u32>() {
            Ok(n) => Ok(Some(InvoiceNumber(n))),
            Err(err) => {
                warn!(value = %raw, error = %err, "ignoring unreadable invoice counter");
                Ok(None)
            }
        }
    }

    /// Start a draft dated today with the next number.
    ///
    /// The counter is advanced as soon as the number is taken, so abandoned drafts
    /// leave gaps.
    pub fn new_draft(&self) -> ServiceResult<InvoiceDraft> {
        let number = InvoiceNumber::after(self.last_number()?)?;
        self.store.set(keys::LAST_INVOICE_NUMBER, number.0.to_string())?;
        info!(invoice = %number, "invoice number reserved");
        Ok(InvoiceDraft::new(number, self.clock.today()))
    }

    /// Add one unit of a catalog product to `draft`.
    pub fn add_product(
        &self,
        draft: &mut InvoiceDraft,
        product_id: ProductId,
    ) -> ServiceResult<()> {
        let product = PRODUCTS.find(&self.store, &product_id)?;
        draft.add_product(&product);
        Ok(())
    }

    pub fn render(&self, draft: &InvoiceDraft) -> ServiceResult<RenderedInvoice> {
        Ok(render(draft, &self.business_name)?)
    }

    /// Render `draft` and write it into `dir`, returning the file's path.
    pub fn export(&self, draft: &InvoiceDraft, dir: &Path) -> ServiceResult<PathBuf> {
        let rendered = self.render(draft)?;
        let path = dir.join(&rendered.file_name);
        fs::write(&path, rendered.body).map_err(|source| StoreError::Io {
            key: rendered.file_name.clone(),
            source,
        })?;
        info!(invoice = %draft.number, path = %path.display(), "invoice exported");
        Ok(path)
    }
}
