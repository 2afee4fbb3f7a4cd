pub mod scheme_api;
