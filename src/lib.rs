pub mod banner;
pub mod client;
pub mod commands;
pub mod composer;
pub mod config;
pub mod consts;
pub mod render;
pub mod request;
pub mod response;
pub mod spinner;
