// src/app.rs
//
// Calculatrice : module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (état, historique, mémoire, stockage, clavier)
// - Ré-exporter ce dont main.rs / repl.rs ont besoin
//
// Important:
// - Aucune évaluation ici : tout calcul passe par crate::noyau.
// - Aucun rendu : l’appelant (REPL) affiche `AppCalc::affichage()`.

pub mod clavier;
pub mod etat;
pub mod historique;
pub mod memoire;
pub mod stockage;

// Ré-exports pratiques : `use crate::app::AppCalc;`
pub use clavier::{action_pour_touche, Action, Modificateurs};
pub use etat::{AppCalc, Reglages, Theme};
pub use stockage::{Stockage, StockageFichier, StockageMemoire};
