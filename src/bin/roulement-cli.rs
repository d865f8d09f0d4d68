#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use roulement::{
    display::{render_warnings, ScheduleRenderer, TextRenderer},
    io,
    preferences::sample_roster,
    scheduler::{AssignOptions, CounterPolicy, Scheduler},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI d'allocation hebdomadaire des postes
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Plafond de jours travaillés par employé
    #[arg(long, default_value_t = 5)]
    max_workdays: u32,
    /// Effectif cible (et plafond) par poste
    #[arg(long, default_value_t = 2)]
    staff_per_shift: usize,
    /// Décompte les employés retirés lors de la résolution des conflits
    #[arg(long)]
    reconcile_counters: bool,
    /// Export JSON du planning (optionnel)
    #[arg(long)]
    out_json: Option<String>,
    /// Export CSV du planning (optionnel)
    #[arg(long)]
    out_csv: Option<String>,
}

impl EngineArgs {
    fn options(&self) -> AssignOptions {
        AssignOptions {
            max_workdays: self.max_workdays,
            staff_per_shift: self.staff_per_shift,
            counter_policy: if self.reconcile_counters {
                CounterPolicy::Reconciled
            } else {
                CounterPolicy::Frozen
            },
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Allouer la semaine à partir d'un fichier de préférences
    Assign {
        /// Fichier de préférences (JSON par défaut)
        #[arg(long)]
        prefs: String,
        /// Le fichier est un CSV `employee,day,first,second,third`
        #[arg(long)]
        csv: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Allouer la semaine de l'équipe d'exemple (Employee A à J)
    Demo {
        #[command(flatten)]
        engine: EngineArgs,
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
    #[cfg(not(feature = "logging"))]
    let _ = cli.log;

    let (mut scheduler, engine) = match cli.cmd {
        Commands::Assign { prefs, csv, engine } => {
            let mut scheduler = Scheduler::with_options(engine.options());
            let count = if csv {
                io::import_preferences_csv(&prefs, &mut scheduler)?
            } else {
                io::import_preferences_json(&prefs, &mut scheduler)?
            };
            if count == 0 {
                bail!("aucun employé dans {prefs}");
            }
            (scheduler, engine)
        }
        Commands::Demo { engine } => {
            let mut scheduler = Scheduler::with_options(engine.options());
            for (employee, prefs) in sample_roster() {
                scheduler.record_preferences(employee, prefs);
            }
            (scheduler, engine)
        }
    };

    scheduler.assign_shifts();
    scheduler.resolve_conflicts();

    if let Some(path) = engine.out_json {
        io::export_schedule_json(path, scheduler.schedule())?;
    }
    if let Some(path) = engine.out_csv {
        io::export_schedule_csv(path, scheduler.schedule())?;
    }

    print!("{}", TextRenderer.render(scheduler.schedule()));

    // Code 2 = WARNING/INCOMPLETE
    let code = if scheduler.warnings().is_empty() {
        0
    } else {
        eprint!("{}", render_warnings(scheduler.warnings()));
        2
    };
    std::process::exit(code);
}
