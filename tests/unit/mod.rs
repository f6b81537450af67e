//! Unit tests exercising the public domain and streak APIs against SQLite

mod domain_tests;
mod server_tests;
mod streak_tests;
