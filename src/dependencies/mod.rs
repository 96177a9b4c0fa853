pub mod rate_model;
pub mod receipt_token;
