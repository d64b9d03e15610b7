pub mod auth;
pub mod chatbot;
pub mod config;
pub mod contacts;
pub mod db;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod projects;
pub mod resume;
pub mod routes;
pub mod state;
pub mod storage;
pub mod uploads;
