//! Tests de propriétés (campagne) : arithmétique IEEE + invariants du noyau.
//!
//! - binaire `a op b` : même résultat que l’opération f64 directe
//! - division par zéro => Math, jamais infini
//! - valider refuse tout ce qui sort de la liste blanche
//! - evaluer est pur (deux appels, même sortie)
//! - un grand résultat affiché (1e21...) se relit à l’identique

use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::{evaluer, formater, valider, ErreurCalcul, Evaluateur, GenreErreur};

fn eval_ok(expr: &str) -> f64 {
    evaluer(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_genre(expr: &str, attendu: GenreErreur) {
    match evaluer(expr) {
        Ok(v) => panic!("expr={expr:?} : échec attendu, obtenu {v}"),
        Err(e) => assert_eq!(e.genre(), attendu, "expr={expr:?} err={e}"),
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/// Rendu d’un opérande : `formater` ne garde que 10 décimales, on passe par
/// `Display` de f64 (aller-retour exact, jamais d’exposant) et on met les
/// négatifs entre parenthèses.
fn operande(v: f64) -> String {
    if v < 0.0 {
        format!("(-{})", -v)
    } else {
        format!("{v}")
    }
}

/* ------------------------ Cas de référence ------------------------ */

#[test]
fn prop_cas_de_reference() {
    assert_eq!(eval_ok("2+3*4"), 14.0);
    assert_eq!(eval_ok("(2+3)*4"), 20.0);

    assert_genre("1/0", GenreErreur::Math);
    assert_genre("5/(2-2)", GenreErreur::Math);

    assert_genre("2+", GenreErreur::Syntaxe);
    assert_genre("(1+2", GenreErreur::Syntaxe);
    assert_genre("", GenreErreur::Syntaxe);

    assert_eq!(formater(3.0), "3");
    assert_eq!(formater(eval_ok("1/3")), "0.3333333333");

    assert!(!valider("alert(1)"));
}

#[test]
fn prop_valider_est_plus_large_que_la_grammaire() {
    // passe le filtre, mais la grammaire refuse
    for s in ["2+", "PI PI", "sin", "()", "1..2"] {
        assert!(valider(s), "{s:?} devrait passer le filtre");
        assert_genre(s, GenreErreur::Syntaxe);
    }
}

#[test]
fn prop_chaine_longue_sans_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // somme plate : la boucle de `expr` ne récurse pas
    let expr = vec!["1"; 120].join("+");
    assert_eq!(eval_ok(&expr), 120.0);
    budget(t0, max);
}

#[test]
fn prop_debordement_devient_erreur() {
    let grand = format!("9{}", "9".repeat(200));
    let expr = format!("{grand}*{grand}");
    match Evaluateur::new(10_000).evaluer(&expr) {
        Err(ErreurCalcul::Math(_)) => {}
        autre => panic!("attendu Math, obtenu {autre:?}"),
    }
}

/* ------------------------ Propriétés générées ------------------------ */

proptest! {
    #[test]
    fn prop_addition_ieee(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        let expr = format!("{}+{}", operande(a), operande(b));
        prop_assert_eq!(evaluer(&expr), Ok(a + b));
    }

    #[test]
    fn prop_soustraction_ieee(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        let expr = format!("{}-{}", operande(a), operande(b));
        prop_assert_eq!(evaluer(&expr), Ok(a - b));
    }

    #[test]
    fn prop_multiplication_ieee(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        let expr = format!("{}*{}", operande(a), operande(b));
        prop_assert_eq!(evaluer(&expr), Ok(a * b));
    }

    #[test]
    fn prop_division_ieee(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        prop_assume!(b != 0.0);
        let expr = format!("{}/{}", operande(a), operande(b));
        prop_assert_eq!(evaluer(&expr), Ok(a / b));
    }

    #[test]
    fn prop_division_par_zero(a in -1e6f64..1e6) {
        let expr = format!("{}/0", operande(a));
        prop_assert!(matches!(evaluer(&expr), Err(ErreurCalcul::Math(_))));
    }

    #[test]
    fn prop_evaluer_pur(s in "[0-9+*/(). -]{0,24}") {
        prop_assert_eq!(evaluer(&s), evaluer(&s));
    }

    #[test]
    fn prop_resultat_toujours_fini(s in "[0-9+*/(). -]{0,24}") {
        if let Ok(v) = evaluer(&s) {
            prop_assert!(v.is_finite());
        }
    }

    #[test]
    fn prop_grand_resultat_relisible(a in 1e21f64..1e300, negatif in any::<bool>()) {
        let v = if negatif { -a } else { a };
        let affiche = formater(v);
        prop_assert!(affiche.contains('e'), "{}", affiche);
        prop_assert!(valider(&affiche), "{}", affiche);
        prop_assert_eq!(evaluer(&affiche), Ok(v));
    }

    #[test]
    fn prop_lettres_hors_liste_refusees(mot in "[a-zA-Z]{1,6}") {
        prop_assume!(!super::jetons::IDENTIFIANTS.contains(&mot.as_str()));
        let expr = format!("{mot}(1)");
        prop_assert!(!valider(&expr));
        prop_assert!(matches!(evaluer(&expr), Err(ErreurCalcul::Syntaxe(_))));
    }
}
