//! Payables domain module: bills, salaries and settlement of stock purchases.
//!
//! Pure domain logic; persistence and id assignment live in `bakeledger-infra`.

pub mod bill;
pub mod purchases;
pub mod salary;
pub mod summary;

pub use bill::{Bill, BillId, BillUpdate, NewBill};
pub use purchases::{PurchaseHistoryLine, UNKNOWN_CATEGORY, UNKNOWN_ITEM, purchase_history};
pub use salary::{NewSalary, Salary, SalaryId, SalaryUpdate};
pub use summary::{
    BillsSummary, PurchasesSummary, SalariesSummary, latest_bill_per_category,
    latest_salary_per_employee, within_range,
};
