//! tests/mod.rs
//! Pruebas de la campaña. Se compilan solo con `cargo test`.

mod support;
