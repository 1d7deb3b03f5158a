pub mod affiliate;
pub mod organization;
pub mod report;

pub use affiliate::Affiliate;
pub use organization::Organization;
pub use report::{FinancialReport, LedgerTotals, ReportPeriod};
