//! Line commands accepted by the terminal wizard.
//!
//! Each input line is parsed with clap as if it were a command line without a
//! binary name, e.g. `price 1 49.99` or `device 2 phone on`. Amounts and flags
//! stay raw strings here so they are coerced at the model boundary instead of
//! being rejected by the parser.

use clap::{Parser, Subcommand, ValueEnum};
use quote_core::DeviceType;

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true, name = "quote")]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeviceArg {
    Phone,
    Tablet,
}

impl From<DeviceArg> for DeviceType {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::Phone => DeviceType::Phone,
            DeviceArg::Tablet => DeviceType::Tablet,
        }
    }
}

/// `<service>` arguments are 1-based positions within the services the
/// current step edits.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Confirm how many existing services the customer has
    Count {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Go to the next step
    Next,

    /// Go back to the previous step
    #[command(alias = "previous")]
    Back,

    /// Add a new service
    Add,

    /// Remove a new service
    Remove { service: usize },

    /// Set a service's monthly price
    Price {
        service: usize,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Set a service's flat discount in dollars
    Discount {
        service: usize,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Attach or detach a device
    Device {
        service: usize,
        #[arg(value_enum, ignore_case = true)]
        device: DeviceArg,
        state: String,
    },

    /// Set an attached device's monthly cost
    DeviceCost {
        service: usize,
        #[arg(value_enum, ignore_case = true)]
        device: DeviceArg,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Turn apps on or off for a service
    Apps { service: usize, state: String },

    /// Set a service's total apps cost
    AppsCost {
        service: usize,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Whether the customer has home internet
    Internet { state: String },

    /// Monthly home internet charges
    InternetCharges {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Whether home internet gets an additional discount
    InternetDiscount { state: String },

    /// Home internet discount amount
    InternetDiscountAmount {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Redraw the current step
    Show,

    /// Change the log filter, e.g. `debug` or `quote_core=trace`
    LogLevel { filter: String },

    /// Leave the calculator
    #[command(alias = "exit")]
    Quit,
}

/// Parses one input line into a [`Command`].
///
/// Returns clap's error for unknown commands, missing arguments, and `help`,
/// whose rendered text is meant to be shown to the user as-is.
pub fn parse_command(line: &str) -> Result<Command, clap::Error> {
    CommandLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
}
