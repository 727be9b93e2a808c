// src/noyau/validation.rs
//
// Filtre préalable (liste blanche de caractères + parenthèses équilibrées).
// Nécessaire mais pas suffisant : la grammaire de eval.rs tranche.

use super::jetons::{longueur_exposant, IDENTIFIANTS};

fn caractere_autorise(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | '*' | '/' | '(' | ')' | ' ')
}

/// Parenthèses équilibrées : aucun `)` sans `(` ouvrante, et tout est refermé.
fn parentheses_equilibrees(s: &str) -> bool {
    let mut ouvertes: usize = 0;
    for c in s.chars() {
        match c {
            '(' => ouvertes += 1,
            ')' => match ouvertes.checked_sub(1) {
                Some(n) => ouvertes = n,
                None => return false,
            },
            _ => {}
        }
    }
    ouvertes == 0
}

/// Vrai si `s` ne contient que des caractères autorisés, si chaque suite de
/// lettres est un identifiant de la liste blanche (ou l’exposant d’un nombre),
/// si les parenthèses sont équilibrées et si la longueur (en caractères) ne
/// dépasse pas `longueur_max`.
pub fn valider_avec(s: &str, longueur_max: usize) -> bool {
    if s.chars().count() > longueur_max {
        return false;
    }

    let chars: Vec<char> = s.chars().collect();
    let mut mot = String::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;

        // exposant collé à un nombre (1e21) : pas un mot
        let apres_nombre = i >= 2 && matches!(chars[i - 2], '0'..='9' | '.');
        if mot.is_empty() && apres_nombre {
            if let Some(n) = longueur_exposant(&chars[i - 1..]) {
                i += n - 1;
                continue;
            }
        }

        if c.is_ascii_alphabetic() {
            mot.push(c);
            continue;
        }
        if !mot.is_empty() {
            if !IDENTIFIANTS.contains(&mot.as_str()) {
                return false;
            }
            mot.clear();
        }
        if !caractere_autorise(c) {
            return false;
        }
    }
    if !mot.is_empty() && !IDENTIFIANTS.contains(&mot.as_str()) {
        return false;
    }

    parentheses_equilibrees(s)
}
