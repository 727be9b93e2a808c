// src/noyau/format.rs

/// Chiffres après la virgule conservés à l’affichage.
const DECIMALES: usize = 10;

/// Au-delà, un entier s’affiche en notation exponentielle (`1e21`).
const SEUIL_EXPONENTIEL: f64 = 1e21;

/// Retire les zéros finaux (et le point s’il ne reste rien derrière).
fn sans_zeros_finaux(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Affichage d’un résultat :
/// - entier : sans point décimal (`3`, `-12`)
/// - sinon : arrondi à 10 décimales, zéros finaux retirés (`0.3333333333`)
/// - `-0` (ou un petit négatif arrondi à zéro) s’affiche `0`
///
/// Les valeurs non finies ne sortent jamais du noyau ; si on en passe une,
/// on obtient le rendu brut de `f64` (`inf`, `NaN`).
pub fn formater(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }

    if v.fract() == 0.0 {
        if v == 0.0 {
            return "0".to_string();
        }
        if v.abs() >= SEUIL_EXPONENTIEL {
            return format!("{v:e}");
        }
        return format!("{v}");
    }

    let arrondi = format!("{:.*}", DECIMALES, v);
    match sans_zeros_finaux(&arrondi) {
        "-0" => "0".to_string(),
        s => s.to_string(),
    }
}
