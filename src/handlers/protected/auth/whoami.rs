use crate::auth::UserContext;
use crate::middleware::{ApiResponse, CurrentUser};

/// GET /api/auth/whoami - the caller as resolved from their session
pub async fn whoami(CurrentUser(user): CurrentUser) -> ApiResponse<UserContext> {
    ApiResponse::success(user)
}
