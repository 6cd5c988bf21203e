pub mod error_response;
