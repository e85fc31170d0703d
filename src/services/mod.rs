//! services/mod.rs
//! Módulo que agrupa los "servicios" de la campaña.

pub mod campaign_service;
pub mod contact_service;
pub mod email_service;
pub mod template_service;
