//! Orchestration: acquire, validate, solve, select, present.
//!
//! The pipeline is an explicit state machine driven by a [`Frontend`].
//! Recoverable errors go back to the front-end, which decides whether to
//! try again; the number of failed attempts is bounded by
//! [`AnalysisConfig::max_attempts`].
//!
//! ```text
//! Acquire -> Validate -> Build -> Solve -> SelectIO -> Extract -> Compose -> Present
//!    ^          |                   |          ^           |
//!    +----------+-------------------+          +-----------+
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::analysis::{compose, extract, CoefficientRounding, TransferFunction};
use crate::circuit::{validate_raw, ElementId, Netlist, Quantity, RawNetlist};
use crate::error::{Result, TfError};
use crate::solver::{solve, MnaSystem, Solution};
use crate::symbolic::RationalFunction;
use crate::DEFAULT_MAX_ATTEMPTS;

/// Configuration for an analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Rounding applied to the extracted coefficients.
    pub rounding: CoefficientRounding,
    /// Failed attempts allowed before the run is aborted.
    pub max_attempts: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rounding: CoefficientRounding::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the coefficient rounding.
    pub fn with_rounding(mut self, rounding: CoefficientRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Set the number of failed attempts tolerated.
    ///
    /// Zero is treated as one: the first failure always ends the run unless
    /// the front-end asks to retry and attempts remain.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

/// Output to observe: a quantity of one element, written `V:R1` or `I:L1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSelection {
    pub identifier: String,
    pub quantity: Quantity,
}

impl FromStr for OutputSelection {
    type Err = TfError;

    fn from_str(s: &str) -> Result<Self> {
        let (quantity, identifier) = s.split_once(':').ok_or_else(|| {
            TfError::parse(0, format!("expected V:<element> or I:<element>, got '{}'", s))
        })?;
        let quantity: Quantity = quantity.parse()?;
        let id: ElementId = identifier
            .parse()
            .map_err(|_| not_an_identifier(identifier))?;
        Ok(Self {
            identifier: id.to_string(),
            quantity,
        })
    }
}

impl fmt::Display for OutputSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.quantity.prefix(), self.identifier)
    }
}

/// Input source and output quantity for one transfer function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub input: String,
    pub output: OutputSelection,
}

impl Selection {
    pub fn new(input: impl Into<String>, output: OutputSelection) -> Self {
        Self {
            input: input.into(),
            output,
        }
    }

    /// Parse both halves, e.g. `Selection::parse("V1", "I:L1")`.
    pub fn parse(input: &str, output: &str) -> Result<Self> {
        let id: ElementId = input.parse().map_err(|_| not_an_identifier(input))?;
        Ok(Self::new(id.to_string(), output.parse()?))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input, self.output)
    }
}

fn not_an_identifier(text: &str) -> TfError {
    TfError::parse(0, format!("'{}' is not an element identifier", text.trim()))
}

/// Collaborator that supplies netlists and selections and shows results.
pub trait Frontend {
    /// Supply the next raw netlist.
    fn acquire(&mut self) -> Result<RawNetlist>;

    /// Choose input and output for a solved netlist.
    fn select(&mut self, netlist: &Netlist) -> Result<Selection>;

    /// Report a recoverable error. Returning `true` tries again.
    fn retry(&mut self, error: &TfError) -> bool;

    /// Show the final transfer function.
    fn present(&mut self, selection: &Selection, tf: &TransferFunction) -> Result<()>;
}

/// How a run ended.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// A transfer function was computed and presented
    Presented {
        selection: Selection,
        transfer_function: TransferFunction,
    },
    /// The front-end declined to retry or attempts ran out
    Aborted { error: TfError, attempts: usize },
}

impl PipelineOutcome {
    pub fn transfer_function(&self) -> Option<&TransferFunction> {
        match self {
            Self::Presented {
                transfer_function, ..
            } => Some(transfer_function),
            Self::Aborted { .. } => None,
        }
    }
}

enum Stage {
    Acquire,
    Validate(RawNetlist),
    Build(Netlist),
    Solve(Netlist, MnaSystem),
    SelectIO(Netlist, Solution),
    Extract(Netlist, Solution, Selection),
    Compose(Netlist, Selection, RationalFunction),
    Present(Selection, TransferFunction),
    Abort(TfError),
}

/// Runs the analysis state machine.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: AnalysisConfig,
}

impl Pipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Drive `frontend` until a transfer function is presented or the run
    /// is aborted. Fatal errors are returned as `Err`.
    pub fn run<F: Frontend>(&self, frontend: &mut F) -> Result<PipelineOutcome> {
        let mut failures = 0;
        let mut stage = Stage::Acquire;

        loop {
            stage = match stage {
                Stage::Acquire => match frontend.acquire() {
                    Ok(raw) => Stage::Validate(raw),
                    Err(err) => self.recover(err, &mut failures, frontend, Stage::Acquire)?,
                },
                Stage::Validate(raw) => match validate_raw(&raw) {
                    Ok(netlist) => Stage::Build(netlist),
                    Err(err) => self.recover(err, &mut failures, frontend, Stage::Acquire)?,
                },
                Stage::Build(netlist) => match MnaSystem::build(&netlist) {
                    Ok(system) => Stage::Solve(netlist, system),
                    Err(err) => self.recover(err, &mut failures, frontend, Stage::Acquire)?,
                },
                Stage::Solve(netlist, system) => match solve(&system) {
                    Ok(solution) => Stage::SelectIO(netlist, solution),
                    Err(err) => self.recover(err, &mut failures, frontend, Stage::Acquire)?,
                },
                Stage::SelectIO(netlist, solution) => match frontend.select(&netlist) {
                    Ok(selection) => Stage::Extract(netlist, solution, selection),
                    Err(err) => {
                        let resume = Stage::SelectIO(netlist, solution);
                        self.recover(err, &mut failures, frontend, resume)?
                    }
                },
                Stage::Extract(netlist, solution, selection) => {
                    let extracted = netlist.input_source(&selection.input).and_then(|_| {
                        extract(
                            &solution,
                            &netlist,
                            &selection.output.identifier,
                            selection.output.quantity,
                        )
                    });
                    match extracted {
                        Ok(expression) => Stage::Compose(netlist, selection, expression),
                        Err(err) => {
                            let resume = Stage::SelectIO(netlist, solution);
                            self.recover(err, &mut failures, frontend, resume)?
                        }
                    }
                }
                Stage::Compose(netlist, selection, expression) => {
                    let source = netlist.input_source(&selection.input)?;
                    let tf = compose(&expression, source.exact_value(), self.config.rounding)?;
                    Stage::Present(selection, tf)
                }
                Stage::Present(selection, tf) => {
                    frontend.present(&selection, &tf)?;
                    info!(%selection, order = tf.order(), "transfer function presented");
                    return Ok(PipelineOutcome::Presented {
                        selection,
                        transfer_function: tf,
                    });
                }
                Stage::Abort(error) => {
                    info!(code = %error.code(), attempts = failures, "analysis aborted");
                    return Ok(PipelineOutcome::Aborted {
                        error,
                        attempts: failures,
                    });
                }
            };
        }
    }

    /// Decide where to go after `err`: back to `resume`, or abort.
    fn recover<F: Frontend>(
        &self,
        err: TfError,
        failures: &mut usize,
        frontend: &mut F,
        resume: Stage,
    ) -> Result<Stage> {
        if !err.is_recoverable() {
            return Err(err);
        }

        *failures += 1;
        warn!(code = %err.code(), attempt = *failures, "{}", err);

        if *failures >= self.config.max_attempts {
            debug!(max_attempts = self.config.max_attempts, "attempts exhausted");
            return Ok(Stage::Abort(err));
        }
        if frontend.retry(&err) {
            Ok(resume)
        } else {
            Ok(Stage::Abort(err))
        }
    }
}
