// src/app/clavier.rs
//
// Raccourcis clavier -> Action
// ----------------------------
// Table unique (natif/terminal) : la vue ou le REPL fournit le nom de la touche
// (ex: "7", "Enter", "Backspace", "m") + modificateurs, on rend une Action.
//
// Ctrl+M       : rappel mémoire
// Ctrl+Shift+M : M+
// Ctrl+Alt+M   : M-
// Ctrl+S / T / H : mode scientifique / thème / panneau historique

/// Ce que l’utilisateur demande ; appliqué par `AppCalc::appliquer`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Ajouter(String),
    Calculer,
    Effacer,
    RetourArriere,

    MemoireAjouter,
    MemoireSoustraire,
    MemoireRappeler,
    MemoireEffacer,

    BasculerScientifique,
    BasculerTheme,
    BasculerPanneauHistorique,
    ViderHistorique,
    RappelerHistorique(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modificateurs {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modificateurs {
    pub const AUCUN: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::AUCUN
        }
    }
}

/// Touche -> Action (None = touche ignorée).
pub fn action_pour_touche(touche: &str, m: Modificateurs) -> Option<Action> {
    let mut chars = touche.chars();
    let seul = match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    };

    if let Some(c) = seul {
        if c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '.' | '(' | ')') {
            return Some(Action::Ajouter(c.to_string()));
        }
    }

    match touche {
        "Enter" | "=" => Some(Action::Calculer),
        "Escape" => Some(Action::Effacer),
        "Backspace" => Some(Action::RetourArriere),
        _ => match seul.map(|c| c.to_ascii_lowercase()) {
            Some('c') => Some(Action::Effacer),
            Some('m') if m.ctrl => Some(if m.shift {
                Action::MemoireAjouter
            } else if m.alt {
                Action::MemoireSoustraire
            } else {
                Action::MemoireRappeler
            }),
            Some('s') if m.ctrl => Some(Action::BasculerScientifique),
            Some('t') if m.ctrl => Some(Action::BasculerTheme),
            Some('h') if m.ctrl => Some(Action::BasculerPanneauHistorique),
            _ => None,
        },
    }
}
