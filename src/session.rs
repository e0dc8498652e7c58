//! Interactive prompt loop collecting contract inputs and printing prices.
//!
//! A thin adapter over [`OptionContract`]: it parses text answers, substitutes
//! the configured default for an empty dividend yield, and forwards to
//! construction and evaluation. Domain errors are reported and the loop moves
//! on to the next contract; an unrecognized payoff type ends the session.

use crate::config::PricerConfig;
use crate::error::PricingError;
use crate::models::bs::{OptionContract, PayoffType};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Why a session stopped
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// The reader ran out of input
    EndOfInput,
    /// The payoff answer was neither `Call`/`call` nor `Put`/`put`
    UnrecognizedPayoffType(String),
}

/// Counts reported when a session ends
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Contracts priced successfully
    pub priced: usize,
    /// Contracts rejected at construction or evaluation
    pub rejected: usize,
    pub termination: Termination,
}

/// Parse a numeric answer, naming the field in the error.
pub fn parse_number(field: &str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .with_context(|| format!("{} must be a number, got {:?}", field, text.trim()))
}

/// Parse a dividend yield answer; blank input selects `default`.
pub fn parse_dividend_yield(text: &str, default: f64) -> Result<f64> {
    if text.trim().is_empty() {
        Ok(default)
    } else {
        parse_number("Dividend yield", text)
    }
}

/// Prompt loop over any line reader and writer.
pub struct PromptSession<R, W> {
    reader: R,
    writer: W,
    config: PricerConfig,
}

impl<R: BufRead, W: Write> PromptSession<R, W> {
    pub fn new(reader: R, writer: W, config: PricerConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    /// Run rounds until input ends or a payoff type is rejected.
    ///
    /// Only I/O failures are returned as errors; every domain error is
    /// reported to the writer and counted in the summary.
    pub fn run(mut self) -> Result<SessionSummary> {
        let mut priced = 0;
        let mut rejected = 0;

        let termination = loop {
            match self.round()? {
                Round::Priced => priced += 1,
                Round::Rejected => rejected += 1,
                Round::Stop(termination) => break termination,
            }
        };

        info!(priced, rejected, ?termination, "pricing session finished");
        Ok(SessionSummary {
            priced,
            rejected,
            termination,
        })
    }

    fn round(&mut self) -> Result<Round> {
        macro_rules! answer {
            ($e:expr) => {
                match $e {
                    Some(value) => value,
                    None => return Ok(Round::Stop(Termination::EndOfInput)),
                }
            };
        }

        let strike = answer!(self.prompt_number("Strike")?);
        let spot = answer!(self.prompt_number("Spot")?);
        let time_to_expiration = answer!(self.prompt_number("Time to expiration (years)")?);

        let payoff_text = answer!(self.prompt("Payoff type (Call/Put)")?);
        let payoff_type = match payoff_text.parse::<PayoffType>() {
            Ok(payoff_type) => payoff_type,
            Err(err) => {
                warn!(input = %payoff_text, "unrecognized payoff type, ending session");
                writeln!(self.writer, "Error: {}", err)?;
                return Ok(Round::Stop(Termination::UnrecognizedPayoffType(
                    payoff_text,
                )));
            }
        };

        let rate = answer!(self.prompt_number("Risk-free rate")?);
        let default_yield = self.config.defaults.dividend_yield;
        let dividend_yield = answer!(self.prompt_parsed(
            &format!("Dividend yield (blank for {})", default_yield),
            |text| parse_dividend_yield(text, default_yield),
        )?);
        let volatility = answer!(self.prompt_number("Volatility")?);

        let contract = match OptionContract::with_dividend_yield(
            strike,
            spot,
            time_to_expiration,
            payoff_type,
            rate,
            dividend_yield,
        ) {
            Ok(contract) => contract,
            Err(err) => return self.reject(err),
        };

        if self.config.session.echo_contract {
            writeln!(
                self.writer,
                "Contract: {} K={} S={} T={} r={} q={}",
                contract.payoff_type(),
                contract.strike(),
                contract.spot(),
                contract.time_to_expiration(),
                contract.rate(),
                contract.dividend_yield()
            )?;
        }

        match contract.price(volatility) {
            Ok(price) => {
                writeln!(
                    self.writer,
                    "Price: {:.*}",
                    self.config.session.decimals,
                    price
                )?;
                Ok(Round::Priced)
            }
            Err(err) => self.reject(err),
        }
    }

    fn reject(&mut self, err: PricingError) -> Result<Round> {
        warn!(%err, "contract rejected");
        writeln!(self.writer, "Error: {}", err)?;
        Ok(Round::Rejected)
    }

    /// Write a prompt and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.writer, "{}: ", label)?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_number(&mut self, label: &str) -> Result<Option<f64>> {
        self.prompt_parsed(label, |text| parse_number(label, text))
    }

    /// Ask until `parse` accepts the answer or input ends.
    fn prompt_parsed<F>(&mut self, label: &str, parse: F) -> Result<Option<f64>>
    where
        F: Fn(&str) -> Result<f64>,
    {
        loop {
            let Some(text) = self.prompt(label)? else {
                return Ok(None);
            };
            match parse(&text) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => {
                    warn!(field = label, input = %text, "unparseable answer");
                    writeln!(self.writer, "Error: {:#}", err)?;
                }
            }
        }
    }
}

enum Round {
    Priced,
    Rejected,
    Stop(Termination),
}
