// handlers/mod.rs - 3-tier handler architecture
//
// Public (no session) → Protected (guarded by role rules) → Elevated (SUPER_ADMIN only)
pub mod elevated;
pub mod protected;
pub mod public;
