// src/main.rs
//
// Calculatrice sûre : point d’entrée terminal
// -------------------------------------------
// But:
// - `calculatrice eval "<expr>"` : un calcul, sortie sur stdout, code 1 si échec
// - `calculatrice [repl]`         : session interactive avec historique persistant
//
// IMPORTANT (structure projet):
// - lib.rs : noyau/ (grammaire + évaluation pure) et app/ (état + port de stockage)
// - Ici: journalisation, configuration, branchement du stockage sur disque.

mod cli;

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use calculatrice_sure::app::{AppCalc, StockageFichier};
use calculatrice_sure::config::Config;
use calculatrice_sure::repl;
use cli::{Cli, Commande};

fn installer_journal() {
    use tracing_subscriber::{fmt, EnvFilter};

    // RUST_LOG pilote le niveau ; WARN par défaut
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .compact()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn charger_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match cli.config.clone().or_else(Config::chemin_par_defaut) {
        Some(chemin) => Config::charger(&chemin)?,
        None => Config::default(),
    };

    // la ligne de commande l’emporte sur le fichier
    if let Some(n) = cli.max_len {
        config.longueur_max_expression = n;
    }
    if let Some(d) = &cli.data_dir {
        config.dossier_donnees = Some(d.clone());
    }
    Ok(config)
}

fn eval(config: &Config, expression: &str) -> ExitCode {
    let ev = config.reglages().evaluateur;
    match ev.evaluer(expression) {
        Ok(v) => {
            println!("{}", ev.formater(v));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn session(config: &Config) -> anyhow::Result<()> {
    let dossier = config.dossier_donnees()?;
    let mut stockage = StockageFichier::new(dossier);
    info!(dossier = %stockage.dossier().display(), "stockage prêt");

    let mut app = AppCalc::charger(&stockage, config.reglages());

    let stdin = io::stdin();
    repl::run(&mut app, &mut stockage, stdin.lock(), io::stdout().lock())
        .context("session interrompue")
}

fn main() -> anyhow::Result<ExitCode> {
    installer_journal();

    let cli = Cli::parse();
    let config = charger_config(&cli).context("configuration")?;

    match &cli.commande {
        Some(Commande::Eval(args)) => Ok(eval(&config, &args.expression)),
        Some(Commande::Repl) | None => {
            session(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
