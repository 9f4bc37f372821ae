pub mod error_codes;
pub mod extractors;
pub mod responses;
