// src/app/memoire.rs

/// Registre mémoire (M+, M-, MR, MC). Durée de vie = session, jamais persisté.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Memoire {
    valeur: f64,
}

impl Memoire {
    pub fn ajouter(&mut self, x: f64) {
        self.valeur += x;
    }

    pub fn soustraire(&mut self, x: f64) {
        self.valeur -= x;
    }

    pub fn rappeler(&self) -> f64 {
        self.valeur
    }

    pub fn effacer(&mut self) {
        self.valeur = 0.0;
    }

    /// Sert à l’indicateur « M » de l’affichage.
    pub fn est_vide(&self) -> bool {
        self.valeur == 0.0
    }
}

/// Valeur numérique en tête d’un texte d’affichage, 0 si aucune.
///
/// `"12.5+3"` -> 12.5 ; `"-4"` -> -4 ; `"1e21"` -> 1e21 ; `"Error"` ou `""` -> 0.
pub fn valeur_en_tete(texte: &str) -> f64 {
    let s = texte.trim_start();
    let octets = s.as_bytes();
    let mut fin = 0;

    if fin < octets.len() && (octets[fin] == b'-' || octets[fin] == b'+') {
        fin += 1;
    }
    while fin < octets.len() && octets[fin].is_ascii_digit() {
        fin += 1;
    }
    if fin < octets.len() && octets[fin] == b'.' {
        fin += 1;
        while fin < octets.len() && octets[fin].is_ascii_digit() {
            fin += 1;
        }
    }

    // exposant (1e21, 2.5E-3) seulement derrière une mantisse avec chiffres
    let mantisse_ok = s[..fin].bytes().any(|b| b.is_ascii_digit());
    if mantisse_ok && fin < octets.len() && matches!(octets[fin], b'e' | b'E') {
        let mut j = fin + 1;
        if j < octets.len() && matches!(octets[j], b'+' | b'-') {
            j += 1;
        }
        let debut = j;
        while j < octets.len() && octets[j].is_ascii_digit() {
            j += 1;
        }
        if j > debut {
            fin = j;
        }
    }

    // "-" / "." seuls ne sont pas des nombres : parse échoue => 0
    s[..fin].parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_registre() {
        let mut m = Memoire::default();
        assert!(m.est_vide());
        m.ajouter(5.0);
        m.ajouter(2.5);
        m.soustraire(1.0);
        assert_eq!(m.rappeler(), 6.5);
        assert!(!m.est_vide());
        m.effacer();
        assert_eq!(m.rappeler(), 0.0);
    }

    #[test]
    fn valeur_en_tete_du_texte() {
        assert_eq!(valeur_en_tete("12.5+3"), 12.5);
        assert_eq!(valeur_en_tete("-4"), -4.0);
        assert_eq!(valeur_en_tete("  7"), 7.0);
        assert_eq!(valeur_en_tete(".5"), 0.5);
        assert_eq!(valeur_en_tete("Error"), 0.0);
        assert_eq!(valeur_en_tete(""), 0.0);
        assert_eq!(valeur_en_tete("-"), 0.0);
        assert_eq!(valeur_en_tete("(1+2)"), 0.0);
    }

    #[test]
    fn valeur_en_tete_avec_exposant() {
        assert_eq!(valeur_en_tete("1e21"), 1e21);
        assert_eq!(valeur_en_tete("-2.5E-3*4"), -2.5e-3);
        assert_eq!(valeur_en_tete("1e+2"), 100.0);
        // exposant incomplet : on garde la mantisse
        assert_eq!(valeur_en_tete("3e"), 3.0);
        assert_eq!(valeur_en_tete("3e+"), 3.0);
        assert_eq!(valeur_en_tete("3E"), 3.0);
    }
}
