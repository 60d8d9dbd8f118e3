//! Fixed plain-text invoice layout.

use core::fmt::{self, Write};

use rust_decimal::Decimal;

use bakeledger_core::{DomainError, DomainResult};

use crate::invoice::InvoiceDraft;

pub const DEFAULT_BUSINESS_NAME: &str = "Sweet Crumbs Bakery";

const WIDTH: usize = 64;
const DESCRIPTION_WIDTH: usize = 30;

/// A rendered invoice ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedInvoice {
    pub file_name: String,
    pub body: String,
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

fn write_header(out: &mut impl Write, draft: &InvoiceDraft, business_name: &str) -> fmt::Result {
    writeln!(out, "{business_name:^WIDTH$}")?;
    writeln!(out, "{:^WIDTH$}", "INVOICE")?;
    writeln!(out, "{:>WIDTH$}", format!("Invoice No: {}", draft.number))?;
    writeln!(out, "{:>WIDTH$}", format!("Date: {}", draft.issued.format("%d/%m/%Y")))?;
    writeln!(out)
}

fn write_party(out: &mut impl Write, draft: &InvoiceDraft) -> fmt::Result {
    writeln!(out, "Party Details:")?;
    writeln!(out, "Name: {}", or_dash(&draft.party.name))?;
    writeln!(out, "Phone: {}", or_dash(&draft.party.phone))?;
    writeln!(out, "Email: {}", or_dash(&draft.party.email))?;
    writeln!(out, "GSTIN: {}", or_dash(&draft.party.gstin))
}

fn write_lines(out: &mut impl Write, draft: &InvoiceDraft, rule: &str) -> fmt::Result {
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "{:<DESCRIPTION_WIDTH$}{:>6}{:>14}{:>14}",
        "Description", "Qty", "Price", "Amount"
    )?;
    writeln!(out, "{rule}")?;
    for line in &draft.lines {
        let description: String = line.description.chars().take(DESCRIPTION_WIDTH - 1).collect();
        writeln!(
            out,
            "{:<DESCRIPTION_WIDTH$}{:>6}{:>14}{:>14}",
            description,
            line.quantity,
            money(line.unit_price),
            money(line.amount())
        )?;
    }
    writeln!(out, "{rule}")
}

fn write_totals(out: &mut impl Write, draft: &InvoiceDraft) -> fmt::Result {
    let totals = draft.totals();
    for (label, value) in [
        ("Subtotal:", totals.subtotal),
        ("GST (18%):", totals.gst),
        ("Grand Total:", totals.total),
    ] {
        writeln!(out, "{:>50}{:>14}", label, money(value))?;
    }
    Ok(())
}

fn write_footer(out: &mut impl Write) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{:^WIDTH$}", "Thank you for your business!")?;
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "{:^WIDTH$}", "____________________")?;
    writeln!(out, "{:^WIDTH$}", "Authorized Signature")
}

/// Write every section of the layout into `out`.
fn write_invoice(out: &mut impl Write, draft: &InvoiceDraft, business_name: &str) -> fmt::Result {
    let rule = "-".repeat(WIDTH);
    write_header(out, draft, business_name)?;
    write_party(out, draft)?;
    write_lines(out, draft, &rule)?;
    write_totals(out, draft)?;
    write_footer(out)
}

/// Render `draft` as `Invoice_<number>.txt`.
///
/// Sections in order: business header and title, invoice number and date, party
/// block, line table, totals block, signature line.
pub fn render(draft: &InvoiceDraft, business_name: &str) -> DomainResult<RenderedInvoice> {
    if draft.is_empty() {
        return Err(DomainError::validation(
            "add at least one item before generating an invoice",
        ));
    }

    let mut body = String::new();
    write_invoice(&mut body, draft, business_name)
        .map_err(|_| DomainError::validation("invoice text could not be formatted"))?;

    Ok(RenderedInvoice {
        file_name: format!("Invoice_{}.txt", draft.number),
        body,
    })
}
