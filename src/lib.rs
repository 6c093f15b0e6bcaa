pub mod config;
pub mod content;
pub mod error;
pub mod index_splicer;
pub mod logger;
pub mod post_processor;
pub mod related;
pub mod repository;
mod test_data;
mod text_utils;
pub mod view;
