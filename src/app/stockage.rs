//! src/app/stockage.rs
//!
//! Port de persistance : lire/écrire un blob texte sous une clé.
//!
//! L’état (etat.rs) ne connaît que ce trait ; le binaire branche un dossier
//! sur disque, les tests une table en mémoire.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErreurStockage {
    #[error("E/S sur {chemin}: {source}")]
    Io {
        chemin: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("sérialisation: {0}")]
    Serialisation(#[from] serde_json::Error),
}

/// Stockage clé → blob, synchrone, sans concurrence.
pub trait Stockage {
    /// `Ok(None)` si la clé n’a jamais été écrite.
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage>;

    /// Écrase la valeur précédente.
    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage>;
}

/// Table en mémoire (tests, ou session sans persistance).
#[derive(Debug, Default, Clone)]
pub struct StockageMemoire {
    donnees: HashMap<String, String>,
}

impl StockageMemoire {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stockage for StockageMemoire {
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
        Ok(self.donnees.get(cle).cloned())
    }

    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
        self.donnees.insert(cle.to_string(), valeur.to_string());
        Ok(())
    }
}

/// Un fichier `<clé>.json` par clé, dans un dossier créé à la première écriture.
#[derive(Debug, Clone)]
pub struct StockageFichier {
    dossier: PathBuf,
}

impl StockageFichier {
    pub fn new(dossier: impl Into<PathBuf>) -> Self {
        Self {
            dossier: dossier.into(),
        }
    }

    pub fn dossier(&self) -> &Path {
        &self.dossier
    }

    fn chemin(&self, cle: &str) -> PathBuf {
        // caractères gênants dans un nom de fichier => '_'
        let nom = cle.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|', '.'], "_");
        self.dossier.join(format!("{nom}.json"))
    }
}

impl Stockage for StockageFichier {
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
        let chemin = self.chemin(cle);
        match fs::read_to_string(&chemin) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ErreurStockage::Io { chemin, source }),
        }
    }

    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
        fs::create_dir_all(&self.dossier).map_err(|source| ErreurStockage::Io {
            chemin: self.dossier.clone(),
            source,
        })?;

        // écriture dans un fichier voisin puis renommage : pas de blob à moitié écrit
        let chemin = self.chemin(cle);
        let tmp = chemin.with_extension("json.tmp");
        fs::write(&tmp, valeur).map_err(|source| ErreurStockage::Io {
            chemin: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &chemin).map_err(|source| ErreurStockage::Io { chemin, source })
    }
}
