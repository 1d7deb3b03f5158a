// handlers/elevated/root/tenant - cross-tenant organization management

pub mod list; // GET /api/root/tenant
pub mod show; // GET /api/root/tenant/:id

pub use list::tenant_list;
pub use show::tenant_show;
