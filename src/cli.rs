//! Définitions de la ligne de commande (clap seulement, aucune logique).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Calculatrice sûre : grammaire explicite, historique persistant, mémoire.
#[derive(Parser, Debug)]
#[command(name = "calculatrice", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub commande: Option<Commande>,

    /// Fichier de configuration TOML
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dossier où persister l’historique et le thème
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Longueur maximale d’une expression (caractères)
    #[arg(long, global = true)]
    pub max_len: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commande {
    /// Évalue une expression et affiche le résultat (sans historique)
    Eval(EvalArgs),

    /// Session interactive (par défaut)
    Repl,
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Expression à évaluer, ex: "(2+3)*4"
    pub expression: String,
}
