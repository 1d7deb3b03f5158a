pub mod auth;
pub mod extract;
pub mod response;
pub mod scope;

pub use auth::{require_rule, CurrentUser, Guard};
pub use extract::{ValidPath, ValidQuery};
pub use response::{ApiResponse, ApiResult, Envelope, EnvelopeError};
pub use scope::{resolve_scope, OrganizationScope, ScopePolicy};
