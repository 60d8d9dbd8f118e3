use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakeledger_core::{DomainError, DomainResult};
use bakeledger_products::{Product, ProductId};

/// Goods and services tax applied to every invoice (18%).
pub const GST_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Sequential invoice number. Displays zero-padded to four digits (`0007`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(pub u32);

impl InvoiceNumber {
    /// The number after `last`; a store that never issued one starts at 1.
    pub fn after(last: Option<InvoiceNumber>) -> DomainResult<Self> {
        let last = last.map_or(0, |n| n.0);
        last.checked_add(1)
            .map(Self)
            .ok_or_else(|| DomainError::conflict("invoice number space exhausted"))
    }
}

impl core::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Who the invoice is addressed to. Every field is optional free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub gstin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub product_id: ProductId,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl InvoiceLine {
    pub fn amount(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub gst: Decimal,
    pub total: Decimal,
}

/// An invoice being assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub number: InvoiceNumber,
    pub issued: NaiveDate,
    #[serde(default)]
    pub party: PartyDetails,
    #[serde(default)]
    pub lines: Vec<InvoiceLine>,
}

impl InvoiceDraft {
    pub fn new(number: InvoiceNumber, issued: NaiveDate) -> Self {
        Self {
            number,
            issued,
            party: PartyDetails::default(),
            lines: Vec::new(),
        }
    }

    pub fn with_party(mut self, party: PartyDetails) -> Self {
        self.party = party;
        self
    }

    /// Add one unit of `product`. A product already on the invoice gets its quantity
    /// bumped instead of a second line.
    pub fn add_product(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }
        self.lines.push(InvoiceLine {
            product_id: product.id,
            description: product.name.clone(),
            quantity: 1,
            unit_price: product.price,
        });
    }

    /// Set a line's quantity. Zero keeps the line (it just contributes nothing).
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> DomainResult<()> {
        let quantity = u32::try_from(quantity)
            .map_err(|_| DomainError::validation("quantity must be zero or more"))?;
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| DomainError::not_found("Invoice line", product_id))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn remove_line(&mut self, product_id: ProductId) -> DomainResult<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() == before {
            return Err(DomainError::not_found("Invoice line", product_id));
        }
        Ok(())
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(InvoiceLine::amount).sum()
    }

    pub fn totals(&self) -> InvoiceTotals {
        let subtotal = self.subtotal();
        let gst = (subtotal * GST_RATE).round_dp(2);
        InvoiceTotals {
            subtotal,
            gst,
            total: subtotal + gst,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
