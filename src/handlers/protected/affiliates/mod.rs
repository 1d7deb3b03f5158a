pub mod show;

pub use show::affiliate_get;
