//! Calculatrice sûre
//!
//! - `noyau`  : validation + évaluation d’expressions par grammaire explicite
//! - `app`    : état de la calculatrice (entrée, mémoire, historique, thème)
//! - `config` : configuration TOML du binaire
//! - `repl`   : session interactive ligne à ligne

pub mod app;
pub mod config;
pub mod noyau;
pub mod repl;
