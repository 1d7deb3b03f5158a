// handlers/protected/accounting - financial reporting
//
// Route rule admits SUPER_ADMIN, ADMIN and STAFF; staff must additionally
// carry the `accountant` tag, checked in the handler.

pub mod reports;

pub use reports::report_get;
