//! src/app/historique.rs
//!
//! Historique des calculs réussis : plus récent en tête, 20 entrées au plus.
//! Persisté comme un tableau JSON sous une seule clé.

use serde::{Deserialize, Serialize};

use super::stockage::{ErreurStockage, Stockage};

/// Nombre d’entrées conservées (la plus ancienne est évincée).
pub const CAPACITE: usize = 20;

/// Clé de stockage du blob d’historique.
pub const CLE_HISTORIQUE: &str = "calculatorHistory";

/// Entrée immuable : créée sur un calcul réussi, jamais modifiée.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub expression: String,
    #[serde(rename = "result")]
    pub resultat: String,
    #[serde(rename = "timestamp")]
    pub horodatage: String,
}

impl EntreeHistorique {
    pub fn new(
        expression: impl Into<String>,
        resultat: impl Into<String>,
        horodatage: impl Into<String>,
    ) -> Self {
        Self {
            expression: expression.into(),
            resultat: resultat.into(),
            horodatage: horodatage.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Historique {
    entrees: Vec<EntreeHistorique>,
}

impl Historique {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute en tête ; au-delà de `CAPACITE`, la plus ancienne disparaît.
    pub fn ajouter(&mut self, entree: EntreeHistorique) {
        self.entrees.insert(0, entree);
        self.entrees.truncate(CAPACITE);
    }

    pub fn vider(&mut self) {
        self.entrees.clear();
    }

    /// `0` = la plus récente.
    pub fn get(&self, i: usize) -> Option<&EntreeHistorique> {
        self.entrees.get(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntreeHistorique> {
        self.entrees.iter()
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    /// Lit le blob sous `CLE_HISTORIQUE`. Clé absente => historique vide.
    /// Un blob plus long que `CAPACITE` est tronqué à la lecture.
    pub fn charger(stockage: &dyn Stockage) -> Result<Self, ErreurStockage> {
        let Some(blob) = stockage.lire(CLE_HISTORIQUE)? else {
            return Ok(Self::new());
        };
        let mut entrees: Vec<EntreeHistorique> = serde_json::from_str(&blob)?;
        entrees.truncate(CAPACITE);
        Ok(Self { entrees })
    }

    pub fn sauvegarder(&self, stockage: &mut dyn Stockage) -> Result<(), ErreurStockage> {
        let blob = serde_json::to_string(&self.entrees)?;
        stockage.ecrire(CLE_HISTORIQUE, &blob)
    }
}
