// src/noyau/erreur.rs

use thiserror::Error;

/// Échec classé d’une évaluation.
///
/// Toujours rendu comme valeur (jamais de panique) : l’appelant décide
/// quoi afficher et s’il faut réinitialiser l’entrée.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    /// Jeton invalide, opérande vide, parenthèses non équilibrées, entrée vide.
    #[error("erreur de syntaxe : {0}")]
    Syntaxe(String),

    /// Division par zéro ou valeur non finie (intermédiaire ou finale).
    #[error("erreur mathématique : {0}")]
    Math(String),

    /// Entrée plus longue que la borne configurée (en caractères).
    #[error("expression trop longue : {longueur} caractères (max {max})")]
    TropLong { longueur: usize, max: usize },
}

impl ErreurCalcul {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub fn math(msg: impl Into<String>) -> Self {
        Self::Math(msg.into())
    }

    /// Genre de l’échec, sans le détail (pratique pour les tests et l’affichage).
    pub fn genre(&self) -> GenreErreur {
        match self {
            Self::Syntaxe(_) => GenreErreur::Syntaxe,
            Self::Math(_) => GenreErreur::Math,
            Self::TropLong { .. } => GenreErreur::TropLong,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreErreur {
    Syntaxe,
    Math,
    TropLong,
}
