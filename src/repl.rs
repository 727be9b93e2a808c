// src/repl.rs
//
// Session interactive ligne à ligne (l’« appelant » du noyau).
// -----------------------------------------------------------
// - une ligne = une expression à calculer
// - une ligne commençant par + * / prolonge le dernier résultat
// - commandes :  :c  :mc :mr :m+ :m-  :hist [N]  :clear-hist  :theme  :sci  :q
// - :key <combo> rejoue un raccourci clavier (ex: :key ctrl+shift+m, :key Backspace)
//
// Le rendu se limite à du texte : « = résultat » ou « Error (détail) ».

use std::io::{self, BufRead, Write};
use std::time::Instant;

use tracing::debug;

use crate::app::{action_pour_touche, AppCalc, Modificateurs, Stockage};

const AIDE: &str = "\
expressions : 2+3*4, (1+2)/3, sqrt(2), sin(PI/2), log(E)
+x *x /x    : prolonge le dernier résultat
:c          : efface l’entrée
:m+ :m- :mr :mc : mémoire
:hist [N]   : historique (ou rappel de l’entrée N)
:clear-hist : vide l’historique
:theme :sci : bascules
:key <combo> : raccourci clavier, ex: ctrl+t, ctrl+alt+m, Enter
:q          : quitter";

pub fn run<R: BufRead, W: Write>(
    app: &mut AppCalc,
    stockage: &mut dyn Stockage,
    entree: R,
    mut sortie: W,
) -> io::Result<()> {
    invite(app, &mut sortie)?;

    for ligne in entree.lines() {
        let ligne = ligne?;
        let ligne = ligne.trim();
        app.tick(Instant::now());

        if ligne.is_empty() {
            invite(app, &mut sortie)?;
            continue;
        }

        if let Some(cmd) = ligne.strip_prefix(':') {
            if !commande(app, stockage, cmd, &mut sortie)? {
                break;
            }
        } else {
            calcul(app, stockage, ligne, &mut sortie)?;
        }

        invite(app, &mut sortie)?;
    }

    Ok(())
}

fn invite<W: Write>(app: &AppCalc, sortie: &mut W) -> io::Result<()> {
    let m = if app.memoire.est_vide() { "" } else { "[M] " };
    write!(sortie, "{m}> ")?;
    sortie.flush()
}

fn calcul<W: Write>(
    app: &mut AppCalc,
    stockage: &mut dyn Stockage,
    ligne: &str,
    sortie: &mut W,
) -> io::Result<()> {
    let prolonge = ligne.starts_with(['+', '*', '/']) && app.erreur.is_none();
    if !prolonge {
        app.effacer();
    }
    app.ajouter(ligne);

    match app.calculer(stockage) {
        Ok(_) => writeln!(sortie, "= {}", app.affichage()),
        Err(e) => {
            debug!(erreur = %e, "échec affiché");
            writeln!(sortie, "{} ({e})", app.affichage())
        }
    }
}

/// Rend `false` pour quitter.
fn commande<W: Write>(
    app: &mut AppCalc,
    stockage: &mut dyn Stockage,
    cmd: &str,
    sortie: &mut W,
) -> io::Result<bool> {
    let mut mots = cmd.split_whitespace();
    let nom = mots.next().unwrap_or("");

    match nom {
        "q" | "quit" => return Ok(false),
        "h" | "help" | "aide" => writeln!(sortie, "{AIDE}")?,
        "c" => app.effacer(),

        "m+" => app.memoire_ajouter(),
        "m-" => app.memoire_soustraire(),
        "mc" => app.memoire_effacer(),
        "mr" => {
            app.memoire_rappeler();
            writeln!(sortie, "{}", app.affichage())?;
        }

        "hist" => match mots.next().map(str::parse::<usize>) {
            None => {
                if app.historique.is_empty() {
                    writeln!(sortie, "(historique vide)")?;
                }
                for (i, e) in app.historique.iter().enumerate() {
                    writeln!(
                        sortie,
                        "{i:>2}  {} = {}   [{}]",
                        e.expression, e.resultat, e.horodatage
                    )?;
                }
            }
            Some(Ok(i)) if app.rappeler_historique(i) => {
                writeln!(sortie, "{}", app.affichage())?;
            }
            Some(_) => writeln!(sortie, "entrée d’historique inconnue")?,
        },
        "clear-hist" => app.vider_historique(stockage),

        "theme" => {
            app.basculer_theme(stockage);
            writeln!(sortie, "thème : {}", app.theme.comme_str())?;
        }
        "sci" => {
            app.basculer_scientifique();
            let etat = if app.mode_scientifique { "on" } else { "off" };
            writeln!(sortie, "mode scientifique : {etat}")?;
        }

        "key" => match mots.next().map(combinaison) {
            Some((touche, m)) => match action_pour_touche(touche, m) {
                Some(action) => {
                    if let Some(r) = app.appliquer(action, stockage) {
                        match r {
                            Ok(_) => writeln!(sortie, "= {}", app.affichage())?,
                            Err(e) => writeln!(sortie, "{} ({e})", app.affichage())?,
                        }
                    }
                }
                None => writeln!(sortie, "touche sans effet : {touche}")?,
            },
            None => writeln!(sortie, "usage : :key <combo>")?,
        },

        autre => writeln!(sortie, "commande inconnue : :{autre} (:help)")?,
    }

    Ok(true)
}

/// "ctrl+shift+m" -> ("m", ctrl+shift). La touche est le dernier segment.
fn combinaison(combo: &str) -> (&str, Modificateurs) {
    let mut m = Modificateurs::AUCUN;
    let mut segments: Vec<&str> = combo.split('+').collect();

    // "+" seul ou "ctrl++" : la touche est le signe plus
    let touche = if combo.ends_with('+') {
        segments.retain(|s| !s.is_empty());
        "+"
    } else {
        segments.pop().unwrap_or("")
    };

    for s in segments {
        match s.to_ascii_lowercase().as_str() {
            "ctrl" => m.ctrl = true,
            "shift" => m.shift = true,
            "alt" => m.alt = true,
            _ => {}
        }
    }
    (touche, m)
}
