//! Invoicing domain module.
//!
//! An invoice is built up as a draft (lines picked from the product catalog, party
//! details, GST) and then rendered to a fixed plain-text layout. Numbering is a simple
//! counter owned by the caller's storage.

pub mod invoice;
pub mod layout;

pub use invoice::{GST_RATE, InvoiceDraft, InvoiceLine, InvoiceNumber, InvoiceTotals, PartyDetails};
pub use layout::{DEFAULT_BUSINESS_NAME, RenderedInvoice, render};
