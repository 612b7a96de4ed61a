//! # letsquiz-web
//!
//! Yew frontend for LetsQuiz. Holds the API client, the session store
//! backed by yewdux, the route table and the navigation guard that keeps
//! anonymous users out of protected pages.

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod guard;
pub mod routes;
pub mod session;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod session_test;
