pub mod admin;
pub mod allowlist;
pub mod claim;
pub mod purchase;
pub mod sale;
pub mod withdraw;
