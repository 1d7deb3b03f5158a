pub mod current;

pub use current::organization_get;
