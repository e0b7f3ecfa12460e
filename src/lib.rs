pub mod logger;
pub mod settings;

pub mod application_impl;
pub mod application_port;
pub mod domain;
pub mod domain_model;
pub mod domain_port;
