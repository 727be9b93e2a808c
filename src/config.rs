//! src/config.rs
//!
//! Configuration du binaire : fichier TOML optionnel, puis surcharges de la
//! ligne de commande. Fichier absent => valeurs par défaut.
//!
//! ```toml
//! longueur_max_expression = 256
//! longueur_max_entree = 12
//! delai_erreur_ms = 1500
//! dossier_donnees = "/home/moi/.local/share/calculatrice"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::Reglages;
use crate::noyau::{Evaluateur, LONGUEUR_MAX_DEFAUT};

/// Sous-dossier de `dirs::data_dir()` quand rien n’est configuré.
const NOM_DOSSIER: &str = "calculatrice";

#[derive(Debug, Error)]
pub enum ErreurConfig {
    #[error("lecture de {chemin}: {source}")]
    Lecture {
        chemin: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("TOML invalide dans {chemin}: {source}")]
    Toml {
        chemin: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("aucun dossier de données disponible (précisez --data-dir)")]
    PasDeDossier,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub longueur_max_expression: usize,
    pub longueur_max_entree: Option<usize>,
    pub delai_erreur_ms: u64,
    pub dossier_donnees: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            longueur_max_expression: LONGUEUR_MAX_DEFAUT,
            longueur_max_entree: None,
            delai_erreur_ms: 1500,
            dossier_donnees: None,
        }
    }
}

impl Config {
    /// Lit `chemin` ; fichier absent => `Config::default()`.
    pub fn charger(chemin: &Path) -> Result<Self, ErreurConfig> {
        let texte = match fs::read_to_string(chemin) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ErreurConfig::Lecture {
                    chemin: chemin.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&texte).map_err(|source| ErreurConfig::Toml {
            chemin: chemin.to_path_buf(),
            source,
        })
    }

    /// Emplacement par défaut du fichier : `<config_dir>/calculatrice/config.toml`.
    pub fn chemin_par_defaut() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(NOM_DOSSIER).join("config.toml"))
    }

    pub fn reglages(&self) -> Reglages {
        Reglages {
            evaluateur: Evaluateur::new(self.longueur_max_expression),
            longueur_max_entree: self.longueur_max_entree,
            delai_erreur: Duration::from_millis(self.delai_erreur_ms),
        }
    }

    pub fn dossier_donnees(&self) -> Result<PathBuf, ErreurConfig> {
        match &self.dossier_donnees {
            Some(d) => Ok(d.clone()),
            None => dirs::data_dir()
                .map(|d| d.join(NOM_DOSSIER))
                .ok_or(ErreurConfig::PasDeDossier),
        }
    }
}
