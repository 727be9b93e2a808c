//! Noyau : évaluation (pipeline réel)
//!
//! borne de longueur -> jetons -> descente récursive (calcul direct, sans AST)
//!
//! Grammaire :
//!   expr   := terme (('+'|'-') terme)*
//!   terme  := unaire (('*'|'/') unaire)*
//!   unaire := '-' unaire | atome
//!   atome  := NOMBRE | CONST | FONC '(' expr ')' | '(' expr ')'
//!
//! Aucune exécution hors grammaire possible : seuls les jetons de jetons.rs existent.

use super::erreur::ErreurCalcul;
use super::format::formater;
use super::jetons::{tokenize, Tok};
use super::validation::valider_avec;

/// Borne par défaut sur la longueur d’entrée (caractères).
pub const LONGUEUR_MAX_DEFAUT: usize = 256;

/// Garde-fou : profondeur d’imbrication (parenthèses + moins unaires).
const PROFONDEUR_MAX: usize = 256;

/// Résultat d’évaluation : nombre fini, ou échec classé.
pub type Evaluation = Result<f64, ErreurCalcul>;

/// Évaluateur configuré (seule configuration : la borne de longueur).
///
/// Sans état mutable : `evaluer` deux fois sur la même entrée donne le même résultat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluateur {
    pub longueur_max: usize,
}

impl Default for Evaluateur {
    fn default() -> Self {
        Self {
            longueur_max: LONGUEUR_MAX_DEFAUT,
        }
    }
}

impl Evaluateur {
    pub fn new(longueur_max: usize) -> Self {
        Self { longueur_max }
    }

    pub fn valider(&self, texte: &str) -> bool {
        valider_avec(texte, self.longueur_max)
    }

    pub fn evaluer(&self, texte: &str) -> Evaluation {
        let longueur = texte.chars().count();
        if longueur > self.longueur_max {
            return Err(ErreurCalcul::TropLong {
                longueur,
                max: self.longueur_max,
            });
        }

        let jetons = tokenize(texte)?;
        if jetons.is_empty() {
            return Err(ErreurCalcul::syntaxe("entrée vide"));
        }

        let mut a = Analyseur::new(&jetons);
        let v = a.expr()?;
        if let Some(t) = a.courant() {
            return Err(match t {
                Tok::RPar => ErreurCalcul::syntaxe("parenthèse fermante sans ouvrante"),
                t => ErreurCalcul::syntaxe(format!("jeton inattendu: '{t}'")),
            });
        }
        fini(v)
    }

    pub fn formater(&self, v: f64) -> String {
        formater(v)
    }
}

/// Toute valeur non finie (intermédiaire ou finale) est une erreur mathématique.
fn fini(v: f64) -> Evaluation {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurCalcul::math("résultat non fini"))
    }
}

struct Analyseur<'a> {
    jetons: &'a [Tok],
    pos: usize,
    profondeur: usize,
}

impl<'a> Analyseur<'a> {
    fn new(jetons: &'a [Tok]) -> Self {
        Self {
            jetons,
            pos: 0,
            profondeur: 0,
        }
    }

    fn courant(&self) -> Option<Tok> {
        self.jetons.get(self.pos).copied()
    }

    fn suivant(&mut self) -> Option<Tok> {
        let t = self.courant();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn attendre_rpar(&mut self) -> Result<(), ErreurCalcul> {
        match self.suivant() {
            Some(Tok::RPar) => Ok(()),
            Some(t) => Err(ErreurCalcul::syntaxe(format!(
                "')' attendue, trouvé '{t}'"
            ))),
            None => Err(ErreurCalcul::syntaxe("parenthèses non fermées")),
        }
    }

    fn descendre(&mut self) -> Result<(), ErreurCalcul> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurCalcul::syntaxe("imbrication trop profonde"));
        }
        Ok(())
    }

    fn remonter(&mut self) {
        self.profondeur -= 1;
    }

    fn expr(&mut self) -> Evaluation {
        let mut acc = self.terme()?;
        loop {
            match self.courant() {
                Some(Tok::Plus) => {
                    self.pos += 1;
                    acc = fini(acc + self.terme()?)?;
                }
                Some(Tok::Minus) => {
                    self.pos += 1;
                    acc = fini(acc - self.terme()?)?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn terme(&mut self) -> Evaluation {
        let mut acc = self.unaire()?;
        loop {
            match self.courant() {
                Some(Tok::Star) => {
                    self.pos += 1;
                    acc = fini(acc * self.unaire()?)?;
                }
                Some(Tok::Slash) => {
                    self.pos += 1;
                    let d = self.unaire()?;
                    if d == 0.0 {
                        return Err(ErreurCalcul::math("division par zéro"));
                    }
                    acc = fini(acc / d)?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn unaire(&mut self) -> Evaluation {
        if self.courant() == Some(Tok::Minus) {
            self.pos += 1;
            self.descendre()?;
            let v = self.unaire();
            self.remonter();
            return Ok(-v?);
        }
        self.atome()
    }

    fn atome(&mut self) -> Evaluation {
        match self.suivant() {
            Some(Tok::Num(v)) => fini(v),
            Some(Tok::Const(c)) => Ok(c.valeur()),
            Some(Tok::Fonc(f)) => {
                if self.suivant() != Some(Tok::LPar) {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "'(' attendue après '{}'",
                        f.nom()
                    )));
                }
                let x = self.sous_expr()?;
                fini(f.appliquer(x))
            }
            Some(Tok::LPar) => self.sous_expr(),
            Some(t) => Err(ErreurCalcul::syntaxe(format!("opérande attendu, trouvé '{t}'"))),
            None => Err(ErreurCalcul::syntaxe("opérande manquant en fin d’expression")),
        }
    }

    /// Contenu d’une paire de parenthèses (la '(' est déjà consommée).
    fn sous_expr(&mut self) -> Evaluation {
        self.descendre()?;
        let v = self.expr();
        self.remonter();
        let v = v?;
        self.attendre_rpar()?;
        Ok(v)
    }
}
