//! nodal-tf - symbolic transfer functions of RLC networks
//!
//! Reads a netlist table, solves it by Modified Nodal Analysis and prints the
//! transfer function from a voltage source to the voltage or current of any
//! element.
//!
//! # Usage
//!
//! ```bash
//! nodal-tf rlc.csv --input V1 --output I:L1
//! nodal-tf rlc.csv --input V1 --output V:C1 --bode 10 1e6 21
//! nodal-tf rlc.csv --interactive -v
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nodal_tf::{
    analysis::log_space,
    error::{Result, TfError},
    input,
    pipeline::OutputSelection,
    AnalysisConfig, CoefficientRounding, Frontend, Netlist, Pipeline, PipelineOutcome, RawNetlist,
    Selection, TransferFunction, DEFAULT_COEFFICIENT_DIGITS, DEFAULT_MAX_ATTEMPTS,
};

/// Symbolic transfer functions of passive RLC networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist table (from,to,type,value per line)
    #[arg(value_name = "NETLIST")]
    netlist: PathBuf,

    /// Input voltage source
    #[arg(short, long, default_value = "V1")]
    input: String,

    /// Output quantity, V:<element> for voltage or I:<element> for current
    #[arg(short, long, required_unless_present = "interactive")]
    output: Option<String>,

    /// Significant digits kept in coefficients (0 keeps full precision)
    #[arg(short, long, default_value_t = DEFAULT_COEFFICIENT_DIGITS)]
    digits: u32,

    /// Print a Bode table: start and stop angular frequency (rad/s) and point count
    #[arg(long, num_args = 3, value_names = ["START", "STOP", "POINTS"])]
    bode: Option<Vec<f64>>,

    /// Prompt for corrections instead of exiting on errors
    #[arg(long)]
    interactive: bool,

    /// Failed attempts before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Terminal front-end: reads files, prompts on stdin when interactive.
struct Terminal {
    args: Args,
    netlist_path: PathBuf,
    acquired: bool,
    selected: bool,
}

impl Terminal {
    fn new(args: Args) -> Self {
        let netlist_path = args.netlist.clone();
        Self {
            args,
            netlist_path,
            acquired: false,
            selected: false,
        }
    }

    fn prompt(&self, message: &str) -> Result<String> {
        eprint!("{}", message);
        io::stderr()
            .flush()
            .map_err(|e| TfError::frontend(e.to_string()))?;
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| TfError::frontend(e.to_string()))?;
        Ok(line.trim().to_string())
    }

    fn print_bode(&self, tf: &TransferFunction) {
        let Some(bode) = self.args.bode.as_deref() else {
            return;
        };
        let omegas = log_space(bode[0], bode[1], bode[2].max(0.0) as usize);
        if omegas.is_empty() {
            eprintln!("Bode range must be positive with at least one point");
            return;
        }

        println!();
        println!("{:>14} {:>12} {:>12}", "omega (rad/s)", "|H| (dB)", "phase (deg)");
        for p in tf.frequency_response(&omegas) {
            println!("{:>14.6e} {:>12.4} {:>12.4}", p.omega, p.magnitude_db, p.phase_deg);
        }
    }
}

impl Frontend for Terminal {
    fn acquire(&mut self) -> Result<RawNetlist> {
        if self.acquired && self.args.interactive {
            let answer = self.prompt(&format!(
                "Netlist file [{}]: ",
                self.netlist_path.display()
            ))?;
            if !answer.is_empty() {
                self.netlist_path = PathBuf::from(answer);
            }
        }
        self.acquired = true;
        input::parse_file(&self.netlist_path)
    }

    fn select(&mut self, netlist: &Netlist) -> Result<Selection> {
        let first = !self.selected;
        self.selected = true;

        if let (true, Some(output)) = (first, self.args.output.as_deref()) {
            return Selection::parse(&self.args.input, output);
        }

        eprint!("{}", netlist);
        let input = self.prompt(&format!("Input source [{}]: ", self.args.input))?;
        let input = if input.is_empty() { self.args.input.clone() } else { input };
        let output: OutputSelection = self
            .prompt("Output (V:<element> or I:<element>): ")?
            .parse()?;
        Ok(Selection::new(input, output))
    }

    fn retry(&mut self, error: &TfError) -> bool {
        eprintln!("error[{}]: {}", error.code(), error);
        if !self.args.interactive {
            return false;
        }
        matches!(
            self.prompt("Try again? [y/N] ").as_deref(),
            Ok("y") | Ok("Y") | Ok("yes")
        )
    }

    fn present(&mut self, selection: &Selection, tf: &TransferFunction) -> Result<()> {
        println!("H(s) = {}  [{}]", tf, selection);
        match tf.gain() {
            Some(gain) => println!("Constant transfer function, gain = {}", gain),
            None => {
                println!("numerator:   {:?}", tf.numerator);
                println!("denominator: {:?}", tf.denominator);
                self.print_bode(tf);
            }
        }
        Ok(())
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let rounding = match args.digits {
        0 => CoefficientRounding::Exact,
        n => CoefficientRounding::SignificantDigits(n),
    };
    let config = AnalysisConfig::new()
        .with_rounding(rounding)
        .with_max_attempts(args.max_attempts);

    let mut terminal = Terminal::new(args);
    match Pipeline::new(config).run(&mut terminal)? {
        PipelineOutcome::Presented { .. } => Ok(()),
        PipelineOutcome::Aborted { error, .. } => Err(error),
    }
}
