use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Affiliate {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub email: String,
    /// Fraction of order total paid out, e.g. `0.05`.
    pub commission_rate: Decimal,
    pub status: String,
}
