#![forbid(unsafe_code)]
use anyhow::Result;
use roulement::{
    check_schedule, io,
    scheduler::Rules,
    service::Timetable,
    storage::{JsonStorage, Storage},
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Code de sortie quand aucun planning n'a encore été généré.
const EXIT_NOT_FOUND: i32 = 3;

/// CLI de planning hebdomadaire infirmiers/accueil (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Répertoire des données (staff.json, timetables.json)
    #[arg(long, global = true, env = "ROULEMENT_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Infirmiers requis par créneau
    #[arg(long, global = true, default_value_t = 3)]
    min_nurses: usize,

    /// Créneaux maximum par personne et par semaine
    #[arg(long, global = true, default_value_t = 5)]
    max_shifts: u32,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer et enregistrer le planning de la semaine
    Generate,

    /// Afficher le planning enregistré
    Get,

    /// Importer du personnel depuis un CSV (`workid,work,off`)
    ImportStaff {
        #[arg(long)]
        csv: PathBuf,
        /// Remplace tout le personnel au lieu de fusionner
        #[arg(long)]
        replace: bool,
    },

    /// Exporter le planning enregistré
    Export {
        #[arg(long)]
        out_json: Option<PathBuf>,
        #[arg(long)]
        out_csv: Option<PathBuf>,
    },

    /// Vérifier le planning enregistré contre le personnel et les règles
    Check {
        /// Export CSV des violations (optionnel)
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let rules = Rules {
        min_nurses_per_shift: cli.min_nurses,
        max_shifts_per_week: cli.max_shifts,
    };
    let storage = JsonStorage::open(&cli.data_dir)?;
    let timetable = Timetable::new(storage, rules);

    let code = match cli.cmd {
        Commands::Generate => {
            let generation = timetable.generate()?;
            for shortfall in &generation.shortfalls {
                eprintln!("Warning: {shortfall}");
            }
            let body = serde_json::json!({
                "message": "Timetable generated and saved successfully!",
                "schedule": generation.schedule,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
            0
        }
        Commands::Get => match timetable.current()? {
            Some(schedule) => {
                println!("{}", serde_json::to_string_pretty(&schedule)?);
                0
            }
            None => {
                eprintln!("No timetable found.");
                EXIT_NOT_FOUND
            }
        },
        Commands::ImportStaff { csv, replace } => {
            let incoming = io::import_staff_csv(&csv)?;
            let imported = incoming.len();
            let mut roster = if replace {
                Vec::new()
            } else {
                timetable.storage().fetch_roster()?
            };
            io::merge_staff(&mut roster, incoming);
            timetable.storage().save_roster(&roster)?;
            println!("Imported {imported} staff member(s), roster now has {}", roster.len());
            0
        }
        Commands::Export { out_json, out_csv } => match timetable.current()? {
            Some(schedule) => {
                if let Some(path) = out_json {
                    io::export_schedule_json(path, &schedule)?;
                }
                if let Some(path) = out_csv {
                    io::export_schedule_csv(path, &schedule)?;
                }
                // impression compacte
                for (day, shift, a) in schedule.iter() {
                    let nurses: Vec<&str> = a.nurses.iter().map(|n| n.as_str()).collect();
                    println!("{day} | {shift} | {} | {}", nurses.join(","), a.receptionist);
                }
                0
            }
            None => {
                eprintln!("No timetable found.");
                EXIT_NOT_FOUND
            }
        },
        Commands::Check { report } => match timetable.current()? {
            Some(schedule) => {
                let roster = timetable.storage().fetch_roster()?;
                let violations = check_schedule(&schedule, &roster, rules);
                if violations.is_empty() {
                    println!("OK: no violations");
                    0
                } else {
                    eprintln!("Found {} violation(s)", violations.len());
                    if let Some(path) = report {
                        let mut w = csv::Writer::from_path(path)?;
                        w.write_record(["staff", "day", "shift", "kind"])?;
                        for v in &violations {
                            w.write_record([
                                v.staff.as_ref().map(|s| s.as_str()).unwrap_or(""),
                                v.day.name(),
                                v.shift.name(),
                                v.kind.as_str(),
                            ])?;
                        }
                        w.flush()?;
                    }
                    // Code 2 = WARNING/INCOMPLETE
                    2
                }
            }
            None => {
                eprintln!("No timetable found.");
                EXIT_NOT_FOUND
            }
        },
    };

    std::process::exit(code);
}
