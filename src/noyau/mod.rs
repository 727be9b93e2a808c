//! Noyau de calcul sûr
//!
//! Organisation interne :
//! - erreur.rs     : taxonomie des échecs (Syntaxe / Math / TropLong)
//! - jetons.rs     : tokenisation (liste blanche d’identifiants)
//! - validation.rs : filtre préalable (caractères + parenthèses + longueur)
//! - eval.rs       : descente récursive, calcul direct en f64
//! - format.rs     : affichage du résultat (entier nu, sinon 10 décimales)
//!
//! Fonction pure : aucun état, aucun effet de bord, aucune journalisation.

pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod validation;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErreurCalcul, GenreErreur};
pub use eval::{Evaluateur, Evaluation, LONGUEUR_MAX_DEFAUT};
pub use format::formater;

/// Filtre préalable avec la borne de longueur par défaut.
pub fn valider(texte: &str) -> bool {
    Evaluateur::default().valider(texte)
}

/// Évalue avec la borne de longueur par défaut.
pub fn evaluer(texte: &str) -> Evaluation {
    Evaluateur::default().evaluer(texte)
}
