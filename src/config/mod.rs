//! config/mod.rs
//! Configuración global de la aplicación.

pub mod campaign_config;
