mod auth_tests;
mod guard_tests;
mod listings_tests;
