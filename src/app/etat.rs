//! src/app/etat.rs
//!
//! État de la calculatrice (sans vue).
//!
//! Rôle : contenir l’état (entrée, erreur en cours, mémoire, historique, thème,
//! bascules d’affichage) et offrir les actions de l’utilisateur.
//!
//! Contrats :
//! - Le calcul passe par le noyau (jamais d’évaluation « libre » de texte).
//! - La persistance passe par le port `Stockage` (injecté à chaque action qui écrit).
//! - Une erreur s’affiche « Error » puis l’entrée est remise à zéro après un délai,
//!   piloté par `tick` (l’appelant fournit l’horloge).

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::clavier::Action;
use super::historique::{EntreeHistorique, Historique};
use super::memoire::{valeur_en_tete, Memoire};
use super::stockage::Stockage;
use crate::noyau::jetons::IDENTIFIANTS;
use crate::noyau::{formater, ErreurCalcul, Evaluateur, Evaluation};

/// Texte affiché tant qu’une erreur est en cours.
pub const AFFICHAGE_ERREUR: &str = "Error";

/// Clé de stockage du thème (`"light"` / `"dark"`).
pub const CLE_THEME: &str = "calculatorTheme";

/// Délai avant remise à zéro de l’entrée après une erreur.
pub const DELAI_ERREUR_DEFAUT: Duration = Duration::from_millis(1500);

/// Format de l’horodatage des entrées d’historique (heure locale).
const FORMAT_HORODATAGE: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Sombre,
    Clair,
}

impl Theme {
    pub fn comme_str(self) -> &'static str {
        match self {
            Self::Sombre => "dark",
            Self::Clair => "light",
        }
    }

    /// Toute valeur autre que `"light"` donne le thème sombre.
    pub fn depuis_str(s: &str) -> Self {
        if s.trim() == "light" {
            Self::Clair
        } else {
            Self::Sombre
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Self::Sombre => Self::Clair,
            Self::Clair => Self::Sombre,
        }
    }
}

/// Paramètres fixés au démarrage (voir config.rs).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub evaluateur: Evaluateur,
    /// Borne de saisie touche par touche (None = pas de borne).
    pub longueur_max_entree: Option<usize>,
    pub delai_erreur: Duration,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            evaluateur: Evaluateur::default(),
            longueur_max_entree: None,
            delai_erreur: DELAI_ERREUR_DEFAUT,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- entrée utilisateur (ou dernier résultat, qu’on peut prolonger) ---
    pub entree: String,

    // --- erreur en cours (affichage « Error ») ---
    pub erreur: Option<ErreurCalcul>,
    erreur_depuis: Option<Instant>,

    // --- registres ---
    pub memoire: Memoire,
    pub historique: Historique,

    // --- bascules ---
    pub theme: Theme,
    pub mode_scientifique: bool,
    pub panneau_historique: bool,

    // --- paramètres ---
    pub reglages: Reglages,
}

impl AppCalc {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            reglages,
            ..Self::default()
        }
    }

    /// Reconstruit l’état persistant (historique + thème).
    ///
    /// Un blob illisible n’empêche pas de démarrer : on journalise et on repart vide.
    pub fn charger(stockage: &dyn Stockage, reglages: Reglages) -> Self {
        let mut app = Self::new(reglages);

        app.historique = Historique::charger(stockage).unwrap_or_else(|e| {
            warn!("historique illisible, on repart vide: {e}");
            Historique::new()
        });

        app.theme = match stockage.lire(CLE_THEME) {
            Ok(Some(s)) => Theme::depuis_str(&s),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("thème illisible: {e}");
                Theme::default()
            }
        };

        debug!(
            entrees = app.historique.len(),
            theme = app.theme.comme_str(),
            "état chargé"
        );
        app
    }

    /// Ce que l’écran principal montre.
    pub fn affichage(&self) -> &str {
        if self.erreur.is_some() {
            AFFICHAGE_ERREUR
        } else {
            &self.entree
        }
    }

    /* ------------------------ Saisie ------------------------ */

    /// Ajoute une touche à l’entrée (une erreur en cours est d’abord effacée).
    pub fn ajouter(&mut self, touche: &str) {
        if self.erreur.is_some() {
            self.effacer();
        }

        if let Some(max) = self.reglages.longueur_max_entree {
            let longueur = self.entree.chars().count();
            if longueur >= max {
                self.signaler(ErreurCalcul::TropLong {
                    longueur: longueur + touche.chars().count(),
                    max,
                });
                return;
            }
        }

        self.entree.push_str(touche);
    }

    /// C : efface l’entrée et l’erreur en cours.
    pub fn effacer(&mut self) {
        self.entree.clear();
        self.erreur = None;
        self.erreur_depuis = None;
    }

    /// DEL : retire le dernier caractère (ou l’erreur en cours).
    ///
    /// Un identifiant en fin d’entrée (`PI`, `sqrt`...) part d’un bloc : on ne
    /// laisse jamais un `P` orphelin.
    pub fn retour_arriere(&mut self) {
        if self.erreur.is_some() {
            self.effacer();
            return;
        }

        let lettres = self
            .entree
            .chars()
            .rev()
            .take_while(char::is_ascii_alphabetic)
            .count();
        let fin_lettres = &self.entree[self.entree.len() - lettres..];
        let identifiant = IDENTIFIANTS
            .iter()
            .filter(|id| fin_lettres.ends_with(**id))
            .max_by_key(|id| id.len());

        match identifiant {
            Some(id) => self.entree.truncate(self.entree.len() - id.len()),
            None => {
                self.entree.pop();
            }
        }
    }

    /* ------------------------ Calcul ------------------------ */

    /// = : évalue l’entrée via le noyau.
    ///
    /// Succès : l’entrée devient le résultat formaté, une entrée d’historique est
    /// ajoutée en tête puis persistée. Échec : erreur en cours (affichage « Error »).
    pub fn calculer(&mut self, stockage: &mut dyn Stockage) -> Evaluation {
        let expression = self.entree.replace('×', "*").replace('÷', "/");
        let ev = self.reglages.evaluateur;

        // filtre rapide d’abord ; s’il refuse, le noyau donne la classification
        let r = if ev.valider(&expression) {
            ev.evaluer(&expression)
        } else {
            match ev.evaluer(&expression) {
                Err(e) => Err(e),
                Ok(_) => Err(ErreurCalcul::syntaxe("expression refusée par le filtre")),
            }
        };

        match &r {
            Ok(v) => {
                let resultat = formater(*v);
                debug!(%expression, %resultat, "calcul réussi");

                let horodatage = chrono::Local::now().format(FORMAT_HORODATAGE).to_string();
                self.historique
                    .ajouter(EntreeHistorique::new(expression, resultat.clone(), horodatage));
                self.persister_historique(stockage);

                self.entree = resultat;
                self.erreur = None;
                self.erreur_depuis = None;
            }
            Err(e) => {
                debug!(%expression, erreur = %e, "calcul refusé");
                self.signaler(e.clone());
            }
        }

        r
    }

    fn signaler(&mut self, e: ErreurCalcul) {
        self.erreur = Some(e);
        self.erreur_depuis = Some(Instant::now());
    }

    /// Remise à zéro différée : à appeler régulièrement par l’appelant.
    /// Vrai si l’entrée vient d’être remise à zéro.
    pub fn tick(&mut self, maintenant: Instant) -> bool {
        match self.erreur_depuis {
            Some(depuis) if maintenant.saturating_duration_since(depuis) >= self.reglages.delai_erreur => {
                self.effacer();
                true
            }
            _ => false,
        }
    }

    /* ------------------------ Mémoire ------------------------ */

    /// M+ : ajoute la valeur affichée (0 si l’affichage n’est pas un nombre).
    pub fn memoire_ajouter(&mut self) {
        let x = valeur_en_tete(self.affichage());
        self.memoire.ajouter(x);
    }

    /// M- : soustrait la valeur affichée.
    pub fn memoire_soustraire(&mut self) {
        let x = valeur_en_tete(self.affichage());
        self.memoire.soustraire(x);
    }

    /// MR : l’entrée devient la valeur du registre.
    pub fn memoire_rappeler(&mut self) {
        self.effacer();
        self.entree = formater(self.memoire.rappeler());
    }

    /// MC
    pub fn memoire_effacer(&mut self) {
        self.memoire.effacer();
    }

    /* ------------------------ Historique ------------------------ */

    /// Remet le résultat de l’entrée `i` (0 = plus récente) dans l’entrée.
    pub fn rappeler_historique(&mut self, i: usize) -> bool {
        let Some(resultat) = self.historique.get(i).map(|e| e.resultat.clone()) else {
            return false;
        };
        self.effacer();
        self.entree = resultat;
        true
    }

    pub fn vider_historique(&mut self, stockage: &mut dyn Stockage) {
        self.historique.vider();
        self.persister_historique(stockage);
        info!("historique vidé");
    }

    fn persister_historique(&self, stockage: &mut dyn Stockage) {
        // l’historique en mémoire reste juste même si l’écriture échoue
        if let Err(e) = self.historique.sauvegarder(stockage) {
            warn!("historique non persisté: {e}");
        }
    }

    /* ------------------------ Bascules ------------------------ */

    pub fn basculer_theme(&mut self, stockage: &mut dyn Stockage) {
        self.theme = self.theme.inverse();
        if let Err(e) = stockage.ecrire(CLE_THEME, self.theme.comme_str()) {
            warn!("thème non persisté: {e}");
        }
        info!(theme = self.theme.comme_str(), "thème changé");
    }

    pub fn basculer_scientifique(&mut self) {
        self.mode_scientifique = !self.mode_scientifique;
    }

    pub fn basculer_panneau_historique(&mut self) {
        self.panneau_historique = !self.panneau_historique;
    }

    /* ------------------------ Répartition ------------------------ */

    /// Applique une action ; rend le résultat du calcul pour `Action::Calculer`.
    pub fn appliquer(&mut self, action: Action, stockage: &mut dyn Stockage) -> Option<Evaluation> {
        match action {
            Action::Ajouter(t) => self.ajouter(&t),
            Action::Calculer => return Some(self.calculer(stockage)),
            Action::Effacer => self.effacer(),
            Action::RetourArriere => self.retour_arriere(),

            Action::MemoireAjouter => self.memoire_ajouter(),
            Action::MemoireSoustraire => self.memoire_soustraire(),
            Action::MemoireRappeler => self.memoire_rappeler(),
            Action::MemoireEffacer => self.memoire_effacer(),

            Action::BasculerScientifique => self.basculer_scientifique(),
            Action::BasculerTheme => self.basculer_theme(stockage),
            Action::BasculerPanneauHistorique => self.basculer_panneau_historique(),
            Action::ViderHistorique => self.vider_historique(stockage),
            Action::RappelerHistorique(i) => {
                self.rappeler_historique(i);
            }
        }
        None
    }
}
