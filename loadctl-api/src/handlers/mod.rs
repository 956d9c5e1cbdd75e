//! Request handlers

pub mod health;

pub use health::health_check;
pub use load_tests::{
    create_load_test, delete_load_test, get_load_test, list_load_tests, stop_load_test,
};
