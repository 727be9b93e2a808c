// src/noyau/jetons.rs

use std::fmt;

use super::erreur::ErreurCalcul;

/// Constantes nommées reconnues.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }

    fn nom(self) -> &'static str {
        match self {
            Self::Pi => "PI",
            Self::E => "E",
        }
    }
}

/// Fonctions unaires reconnues (argument toujours entre parenthèses).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Log,
    Sqrt,
}

impl Fonction {
    /// Angles en radians ; `log` = logarithme népérien.
    pub fn appliquer(self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Log => x.ln(),
            Self::Sqrt => x.sqrt(),
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
        }
    }
}

/// Liste blanche des identifiants (sensible à la casse).
pub const IDENTIFIANTS: &[&str] = &["PI", "E", "sin", "cos", "tan", "log", "sqrt"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Const(Constante),
    Fonc(Fonction),

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
    RPar,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{v}"),
            Tok::Const(c) => f.write_str(c.nom()),
            Tok::Fonc(n) => f.write_str(n.nom()),
            Tok::Plus => f.write_str("+"),
            Tok::Minus => f.write_str("-"),
            Tok::Star => f.write_str("*"),
            Tok::Slash => f.write_str("/"),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
        }
    }
}

fn identifiant(mot: &str) -> Option<Tok> {
    let tok = match mot {
        "PI" => Tok::Const(Constante::Pi),
        "E" => Tok::Const(Constante::E),
        "sin" => Tok::Fonc(Fonction::Sin),
        "cos" => Tok::Fonc(Fonction::Cos),
        "tan" => Tok::Fonc(Fonction::Tan),
        "log" => Tok::Fonc(Fonction::Log),
        "sqrt" => Tok::Fonc(Fonction::Sqrt),
        _ => return None,
    };
    Some(tok)
}

/// Suffixe d’exposant (`e21`, `E-3`, `e+5`) en tête de `reste` : sa longueur,
/// ou None si `reste` ne commence pas par un exposant complet.
///
/// Ainsi `2E` reste « 2 puis la constante E » (refusé par la grammaire).
pub(crate) fn longueur_exposant(reste: &[char]) -> Option<usize> {
    if !matches!(reste.first(), Some('e' | 'E')) {
        return None;
    }
    let mut n = 1;
    if matches!(reste.get(n), Some('+' | '-')) {
        n += 1;
    }
    let debut = n;
    while reste.get(n).is_some_and(|c| c.is_ascii_digit()) {
        n += 1;
    }
    (n > debut).then_some(n)
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5, 7.), avec exposant éventuel (1e21, 2.5E-3)
/// - opérateurs + - * /
/// - parenthèses ( )
/// - identifiants de la liste blanche uniquement (PI, E, sin, cos, tan, log, sqrt)
/// - espaces ignorés
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        let simple = match c {
            ' ' => {
                i += 1;
                continue;
            }
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII : lettres seulement, comparés tels quels
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            let t = identifiant(&mot)
                .ok_or_else(|| ErreurCalcul::syntaxe(format!("identifiant inconnu: '{mot}'")))?;
            out.push(t);
            continue;
        }

        // Nombre : (chiffres [. chiffres*] | . chiffres) [e [+-] chiffres]
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            if let Some(n) = longueur_exposant(&chars[i..]) {
                i += n;
            }
            let txt: String = chars[start..i].iter().collect();
            if txt == "." {
                return Err(ErreurCalcul::syntaxe("point décimal isolé"));
            }
            let v = txt
                .parse::<f64>()
                .map_err(|_| ErreurCalcul::syntaxe(format!("nombre invalide: '{txt}'")))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurCalcul::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}
