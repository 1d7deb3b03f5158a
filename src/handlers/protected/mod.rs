// handlers/protected/mod.rs - endpoints behind the authorization guard
//
// Every handler here receives the caller through `CurrentUser`, which only
// exists once the guard has authenticated the session and checked the
// route's role rule. Data access goes through `resolve_scope`.

pub mod accounting;
pub mod affiliates;
pub mod auth;
pub mod organization;
