use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use vlsm_calculator::config;
use vlsm_calculator::input::parse_requirements;
use vlsm_calculator::models::{
    AllocatedSubnet, Calculation, CalculationInput, CalculationRecord, Cidr, Mode,
};
use vlsm_calculator::output::{print_facts, print_history, print_record, subnet_print};
use vlsm_calculator::processing::{generate_scenario, parse_subnet_count, search_range};
use vlsm_calculator::store::HistoryLog;
use vlsm_calculator::{calculate, VlsmError};

#[derive(Parser, Debug)]
#[command(version, about = "IPv4 VLSM and equal-split subnet calculator")]
struct Cli {
    /// Print results as JSON instead of a fact sheet and CSV table.
    #[arg(long, global = true)]
    json: bool,
    /// Do not record this calculation in the history file.
    #[arg(long, global = true)]
    no_history: bool,
    /// History file, defaults to $VLSM_HISTORY_FILE or vlsm_history.json.
    #[arg(long, global = true)]
    history_file: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Allocate right-sized subnets, e.g. `vlsm 192.168.1.0/24 office:100 lab:50 20`.
    Vlsm {
        cidr: Cidr,
        /// `hosts` or `name:hosts`
        #[arg(required = true, allow_hyphen_values = true)]
        requirements: Vec<String>,
    },
    /// Split a network into at least COUNT equal subnets.
    Split {
        cidr: Cidr,
        count: String,
        /// Only show subnets from this 1-based position.
        #[arg(long, allow_hyphen_values = true)]
        from: Option<i64>,
        /// Last position to show, defaults to --from.
        #[arg(long, allow_hyphen_values = true, requires = "from")]
        to: Option<i64>,
    },
    /// Generate and solve a random practice scenario.
    Random {
        #[arg(long, value_enum, default_value_t = ModeArg::Vlsm)]
        mode: ModeArg,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show or edit the calculation history.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    List,
    Show { id: String },
    Delete { id: String },
    Clear,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Vlsm,
    Split,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Mode {
        match arg {
            ModeArg::Vlsm => Mode::Vlsm,
            ModeArg::Split => Mode::Subnetting,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    if let Err(e) = log4rs::init_file("log4rs.yml", Default::default()) {
        eprintln!("log4rs.yml not loaded, logging disabled: {e}");
    }
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let cli = Cli::parse();
    let history_file = cli.history_file.clone().unwrap_or_else(config::history_file);
    let mut history = HistoryLog::load(&history_file);

    match cli.command {
        Command::Vlsm { cidr, requirements } => {
            let requirements = parse_requirements(&requirements)?;
            let input = CalculationInput::vlsm(cidr.addr, cidr.mask, requirements);
            let calc = calculate(&input)?;
            show(&calc, None, cli.json)?;
            record(&mut history, input, calc, cli.no_history)?;
        }
        Command::Split { cidr, count, from, to } => {
            let count = parse_subnet_count(&count)?;
            let input = CalculationInput::subnetting(cidr.addr, cidr.mask, count);
            let calc = calculate(&input)?;
            let filtered = match from {
                Some(start) => Some(search_range(&calc.subnets, start, to)?),
                None => None,
            };
            show(&calc, filtered.as_deref(), cli.json)?;
            record(&mut history, input, calc, cli.no_history)?;
        }
        Command::Random { mode, seed } => {
            let input = match seed {
                Some(seed) => {
                    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(seed);
                    generate_scenario(&mut rng, mode.into())?
                }
                None => generate_scenario(&mut rand::thread_rng(), mode.into())?,
            };
            if !cli.json {
                println!("{}", serde_json::to_string(&input)?);
            }
            let calc = calculate(&input)?;
            show(&calc, None, cli.json)?;
            record(&mut history, input, calc, cli.no_history)?;
        }
        Command::History { action } => match action {
            HistoryAction::List => print_history(&history),
            HistoryAction::Show { id } => {
                let rec = history
                    .get(&id)
                    .ok_or_else(|| VlsmError::History(format!("no record with id {id}")))?;
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(rec)?);
                } else {
                    print_record(rec);
                    print_facts(&rec.facts);
                    subnet_print(&rec.subnets);
                }
            }
            HistoryAction::Delete { id } => {
                if !history.delete(&id) {
                    return Err(VlsmError::History(format!("no record with id {id}")).into());
                }
                history.save()?;
            }
            HistoryAction::Clear => {
                history.clear();
                history.save()?;
            }
        },
    }

    log::info!("#End main()");
    Ok(())
}

fn show(
    calc: &Calculation,
    filtered: Option<&[AllocatedSubnet]>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    if json {
        match filtered {
            Some(subnets) => println!("{}", serde_json::to_string_pretty(subnets)?),
            None => println!("{}", serde_json::to_string_pretty(calc)?),
        }
    } else {
        print_facts(&calc.facts);
        subnet_print(filtered.unwrap_or(&calc.subnets));
    }
    Ok(())
}

fn record(
    history: &mut HistoryLog,
    input: CalculationInput,
    calc: Calculation,
    skip: bool,
) -> Result<(), Box<dyn Error>> {
    if skip {
        return Ok(());
    }
    let rec = CalculationRecord::new(input, calc);
    log::info!("recording {} in history", rec.id);
    history.append(rec);
    history.save()?;
    Ok(())
}
