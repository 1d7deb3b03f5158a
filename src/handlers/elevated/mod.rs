// handlers/elevated/mod.rs - platform administration (SUPER_ADMIN only)
//
// These routes are the only consumers of an unscoped store read. They are
// mounted behind `AuthorizationRule::role(Role::SuperAdmin)` and resolve
// their scope with `ScopePolicy::CrossTenant`.

pub mod root;
