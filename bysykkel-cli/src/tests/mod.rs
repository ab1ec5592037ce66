//! Shared test harness modules for the Bysykkel CLI.

mod helpers;
