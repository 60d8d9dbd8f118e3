use std::collections::BTreeMap;

use tracing::info;

use bakeledger_core::{DateRange, PaymentMethod};
use bakeledger_inventory::{PurchaseId, PurchaseRecord};
use bakeledger_payables::{
    Bill, BillId, BillUpdate, BillsSummary, NewBill, NewSalary, PurchaseHistoryLine,
    PurchasesSummary, SalariesSummary, Salary, SalaryId, SalaryUpdate, latest_bill_per_category,
    latest_salary_per_employee, purchase_history, within_range,
};

use super::{BILLS, ITEMS, PURCHASES, SALARIES};
use crate::clock::Clock;
use crate::error::ServiceResult;
use crate::store::KeyValueStore;

/// Bills, salaries and settlement of stock purchases.
#[derive(Debug, Clone)]
pub struct PayablesService<S, C> {
    store: S,
    clock: C,
}

impl<S, C> PayablesService<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn add_bill(&self, new: NewBill) -> ServiceResult<Bill> {
        let bill = Bill::create(BillId::new(), new, self.clock.now())?;
        let bill = BILLS.append(&self.store, bill)?;
        info!(bill_id = %bill.id, amount = %bill.amount, "bill added");
        Ok(bill)
    }

    pub fn bills(&self) -> ServiceResult<Vec<Bill>> {
        Ok(BILLS.load(&self.store)?)
    }

    pub fn update_bill(&self, id: BillId, update: BillUpdate) -> ServiceResult<Bill> {
        let now = self.clock.now();
        let bill = BILLS.update(&self.store, &id, |b| b.apply_update(update, now))?;
        info!(bill_id = %id, "bill updated");
        Ok(bill)
    }

    pub fn delete_bill(&self, id: BillId) -> ServiceResult<Bill> {
        let removed = BILLS.remove(&self.store, &id)?;
        info!(bill_id = %id, "bill deleted");
        Ok(removed)
    }

    pub fn bills_between(&self, range: DateRange) -> ServiceResult<Vec<Bill>> {
        Ok(within_range(&BILLS.load(&self.store)?, range))
    }

    pub fn add_salary(&self, new: NewSalary) -> ServiceResult<Salary> {
        let salary = Salary::create(SalaryId::new(), new, self.clock.now())?;
        let salary = SALARIES.append(&self.store, salary)?;
        info!(salary_id = %salary.id, employee = %salary.employee_name, "salary added");
        Ok(salary)
    }

    pub fn salaries(&self) -> ServiceResult<Vec<Salary>> {
        Ok(SALARIES.load(&self.store)?)
    }

    pub fn update_salary(&self, id: SalaryId, update: SalaryUpdate) -> ServiceResult<Salary> {
        let now = self.clock.now();
        let salary = SALARIES.update(&self.store, &id, |s| s.apply_update(update, now))?;
        info!(salary_id = %id, "salary updated");
        Ok(salary)
    }

    pub fn mark_salary_paid(&self, id: SalaryId, method: PaymentMethod) -> ServiceResult<Salary> {
        let now = self.clock.now();
        let salary = SALARIES.update(&self.store, &id, |s| {
            s.mark_paid(method, now);
            Ok(())
        })?;
        info!(salary_id = %id, method = method.label(), "salary marked paid");
        Ok(salary)
    }

    pub fn delete_salary(&self, id: SalaryId) -> ServiceResult<Salary> {
        let removed = SALARIES.remove(&self.store, &id)?;
        info!(salary_id = %id, "salary deleted");
        Ok(removed)
    }

    pub fn salaries_between(&self, range: DateRange) -> ServiceResult<Vec<Salary>> {
        Ok(within_range(&SALARIES.load(&self.store)?, range))
    }

    /// Every purchase labelled with its item's name and category.
    pub fn purchase_history(&self) -> ServiceResult<Vec<PurchaseHistoryLine>> {
        Ok(purchase_history(&PURCHASES.load(&self.store)?, &ITEMS.load(&self.store)?))
    }

    pub fn purchases_between(&self, range: DateRange) -> ServiceResult<Vec<PurchaseHistoryLine>> {
        let purchases = within_range(&PURCHASES.load(&self.store)?, range);
        Ok(purchase_history(&purchases, &ITEMS.load(&self.store)?))
    }

    pub fn update_purchase_payment(
        &self,
        id: PurchaseId,
        method: PaymentMethod,
    ) -> ServiceResult<PurchaseRecord> {
        let now = self.clock.now();
        let purchase = PURCHASES.update(&self.store, &id, |p| {
            p.set_payment_method(method, now);
            Ok(())
        })?;
        info!(purchase_id = %id, method = method.label(), "purchase payment updated");
        Ok(purchase)
    }

    pub fn bills_summary(&self) -> ServiceResult<BillsSummary> {
        Ok(BillsSummary::from_bills(&BILLS.load(&self.store)?))
    }

    pub fn salaries_summary(&self) -> ServiceResult<SalariesSummary> {
        Ok(SalariesSummary::from_salaries(&SALARIES.load(&self.store)?))
    }

    pub fn purchases_summary(&self) -> ServiceResult<PurchasesSummary> {
        Ok(PurchasesSummary::from_purchases(&PURCHASES.load(&self.store)?))
    }

    pub fn latest_bills(&self) -> ServiceResult<BTreeMap<String, Bill>> {
        Ok(latest_bill_per_category(&BILLS.load(&self.store)?))
    }

    pub fn latest_salaries(&self) -> ServiceResult<BTreeMap<String, Salary>> {
        Ok(latest_salary_per_employee(&SALARIES.load(&self.store)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    use bakeledger_core::PaymentStatus;
    use bakeledger_inventory::{ItemCategory, NewInventoryItem, NewPurchase};
    use bakeledger_payables::UNKNOWN_ITEM;

    use crate::clock::FixedClock;
    use crate::services::InventoryService;
    use crate::store::InMemoryStore;

    type Shared = (
        PayablesService<Arc<InMemoryStore>, Arc<FixedClock>>,
        InventoryService<Arc<InMemoryStore>, Arc<FixedClock>>,
    );

    fn services() -> Shared {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).unwrap()));
        (
            PayablesService::new(store.clone(), clock.clone()),
            InventoryService::new(store, clock),
        )
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn bill_lifecycle_and_summary() {
        let (svc, _) = services();
        let rent = svc.add_bill(NewBill::new("Shop rent", dec!(12000), june(1), "rent")).unwrap();
        svc.add_bill(NewBill::new("Electricity", dec!(1800), june(5), "utilities")).unwrap();

        svc.update_bill(
            rent.id,
            BillUpdate {
                payment_status: Some(PaymentStatus::Paid),
                payment_method: Some(PaymentMethod::Bank),
                ..BillUpdate::default()
            },
        )
        .unwrap();

        let summary = svc.bills_summary().unwrap();
        assert_eq!(summary.total_amount, dec!(13800));
        assert_eq!(summary.paid_amount, dec!(12000));
        assert_eq!(summary.unpaid_amount, dec!(1800));
        assert_eq!(summary.count, 2);

        let range = DateRange::new(june(2), june(30)).unwrap();
        assert_eq!(svc.bills_between(range).unwrap().len(), 1);

        svc.delete_bill(rent.id).unwrap();
        let err = svc.delete_bill(rent.id).unwrap_err();
        assert_eq!(err.to_string(), format!("Bill with ID {} not found", rent.id));
    }

    #[test]
    fn salary_mark_paid_and_latest() {
        let (svc, _) = services();
        let may = svc.add_salary(NewSalary::new("Ravi", "Baker", dec!(15000), june(1))).unwrap();
        let june_pay = svc
            .add_salary(NewSalary::new("Ravi", "Baker", dec!(15500), june(30)))
            .unwrap();
        svc.mark_salary_paid(may.id, PaymentMethod::Cash).unwrap();

        let summary = svc.salaries_summary().unwrap();
        assert_eq!(summary.paid_amount, dec!(15000));
        assert_eq!(summary.unpaid_amount, dec!(15500));
        assert_eq!(svc.latest_salaries().unwrap()["Ravi"].id, june_pay.id);
        let missing = svc.mark_salary_paid(SalaryId::new(), PaymentMethod::Cash);
        assert!(missing.unwrap_err().is_not_found());
    }

    #[test]
    fn purchase_history_labels_and_settlement() {
        let (svc, inventory) = services();
        let item = inventory
            .add_item(NewInventoryItem::new("Cake Box", "Cartons Co", ItemCategory::Packaging))
            .unwrap();
        let purchase = inventory
            .add_purchase(NewPurchase::new(item.id, dec!(100)).costing(dec!(450)))
            .unwrap();

        assert_eq!(svc.purchases_summary().unwrap().unpaid_amount, dec!(450));
        svc.update_purchase_payment(purchase.id, PaymentMethod::Online).unwrap();
        let summary = svc.purchases_summary().unwrap();
        assert_eq!(summary.paid_amount, dec!(450));
        assert_eq!(summary.unpaid_amount, dec!(0));

        let history = svc.purchase_history().unwrap();
        assert_eq!(history[0].item_name, "Cake Box");
        assert!(history[0].purchase.updated_at.is_some());

        // Delete the item's row directly so the purchase is orphaned.
        super::ITEMS.save(&*svc.store, &[]).unwrap();
        assert_eq!(svc.purchase_history().unwrap()[0].item_name, UNKNOWN_ITEM);
    }
}
