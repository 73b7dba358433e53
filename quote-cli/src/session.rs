//! Terminal session that feeds line commands into the wizard.

use std::io::{self, BufRead, Write};

use quote_core::input::{parse_amount, parse_count, parse_toggle};
use quote_core::{
    DeviceType, HomeInternetEdit, PricingEngine, ServiceEdit, Stage, Wizard, WizardEvent,
};
use tracing::{debug, info, warn};

use crate::commands::{Command, parse_command};
use crate::config::AppConfig;
use crate::logging;
use crate::render::render_stage;

/// What the session produced for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }

    fn quit() -> Self {
        Self {
            text: "Goodbye.".to_string(),
            quit: true,
        }
    }
}

/// Owns the wizard for one interactive run.
#[derive(Debug)]
pub struct Session {
    wizard: Wizard,
    max_existing_services: usize,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            wizard: Wizard::new(PricingEngine::new(config.discounts.clone())),
            max_existing_services: config.max_existing_services,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// The current step's view.
    pub fn view(&self) -> String {
        render_stage(&self.wizard)
    }

    /// Parses and executes one input line.
    pub fn handle_line(
        &mut self,
        line: &str,
    ) -> Reply {
        if line.trim().is_empty() {
            return Reply::text(self.view());
        }
        match parse_command(line) {
            Ok(command) => self.execute(command),
            Err(error) => Reply::text(error.to_string().trim_end().to_string()),
        }
    }

    /// Executes a command and returns feedback followed by the refreshed view.
    pub fn execute(
        &mut self,
        command: Command,
    ) -> Reply {
        debug!(?command, "executing command");
        let feedback = match command {
            Command::Quit => return Reply::quit(),
            Command::LogLevel { filter } => {
                return Reply::text(match logging::set_log_level(&filter) {
                    Ok(()) => format!("Log level set to '{filter}'."),
                    Err(error) => format!("Could not change log level: {error}"),
                });
            }
            Command::Show => None,
            Command::Count { value } => self.confirm_count(&value),
            Command::Next => {
                (!self.wizard.dispatch(WizardEvent::Next)).then(|| self.navigation_hint())
            }
            Command::Back => (!self.wizard.dispatch(WizardEvent::Back))
                .then(|| "Already at the first step.".to_string()),
            Command::Add => match self.wizard.add_new_service() {
                Some(_) => None,
                None => Some(self.not_editable("New services")),
            },
            Command::Remove { service } => self.remove(service),
            Command::Price { service, amount } => {
                self.edit_service(service, ServiceEdit::SetPrice(parse_amount(&amount)))
            }
            Command::Discount { service, amount } => {
                self.edit_service(service, ServiceEdit::SetDiscount(parse_amount(&amount)))
            }
            Command::Device {
                service,
                device,
                state,
            } => self.edit_service(
                service,
                ServiceEdit::SetDevice {
                    device_type: DeviceType::from(device),
                    enabled: parse_toggle(&state),
                },
            ),
            Command::DeviceCost {
                service,
                device,
                amount,
            } => self.edit_service(
                service,
                ServiceEdit::SetDeviceCost {
                    device_type: DeviceType::from(device),
                    cost: parse_amount(&amount),
                },
            ),
            Command::Apps { service, state } => {
                self.edit_service(service, ServiceEdit::SetApps(parse_toggle(&state)))
            }
            Command::AppsCost { service, amount } => {
                self.edit_service(service, ServiceEdit::SetAppsCost(parse_amount(&amount)))
            }
            Command::Internet { state } => {
                self.edit_home(HomeInternetEdit::SetService(parse_toggle(&state)))
            }
            Command::InternetCharges { amount } => {
                self.edit_home(HomeInternetEdit::SetCharges(parse_amount(&amount)))
            }
            Command::InternetDiscount { state } => {
                self.edit_home(HomeInternetEdit::SetAdditionalDiscount(parse_toggle(&state)))
            }
            Command::InternetDiscountAmount { amount } => {
                self.edit_home(HomeInternetEdit::SetDiscountAmount(parse_amount(&amount)))
            }
        };

        let view = self.view();
        Reply::text(match feedback {
            Some(message) => format!("{message}\n\n{view}"),
            None => view,
        })
    }

    fn confirm_count(
        &mut self,
        raw: &str,
    ) -> Option<String> {
        if self.wizard.stage() != Stage::CollectCount {
            return Some("The service count is set on step 1; go back to change it.".to_string());
        }
        let requested = parse_count(raw);
        let count = requested.min(self.max_existing_services);
        if count < requested {
            warn!(requested, count, "existing service count clamped");
        }
        self.wizard.dispatch(WizardEvent::ConfirmCount(count));
        (count < requested).then(|| format!("Count limited to {count}."))
    }

    fn edit_service(
        &mut self,
        position: usize,
        edit: ServiceEdit,
    ) -> Option<String> {
        let Some(group) = self.wizard.editable_group() else {
            return Some(self.not_editable("Services"));
        };
        let Some(index) = position.checked_sub(1) else {
            return Some("Services are numbered from 1.".to_string());
        };
        if self.wizard.editable_service_id(index).is_none() {
            return Some(format!("There is no {} {position}.", group.label()));
        }
        if self.wizard.update_service_at(index, edit) {
            None
        } else {
            Some(match edit {
                ServiceEdit::SetDeviceCost { device_type, .. } => format!(
                    "Attach a {} first with `device {position} {} on`.",
                    device_type.as_str(),
                    device_type.as_str().to_lowercase()
                ),
                ServiceEdit::SetAppsCost(_) => {
                    format!("Turn apps on first with `apps {position} on`.")
                }
                _ => "Nothing changed.".to_string(),
            })
        }
    }

    fn remove(
        &mut self,
        position: usize,
    ) -> Option<String> {
        if !self.wizard.stage().edits_new_and_internet() {
            return Some(self.not_editable("New services"));
        }
        let id = position
            .checked_sub(1)
            .and_then(|index| self.wizard.editable_service_id(index));
        match id {
            Some(id) if self.wizard.remove_new_service(id) => None,
            _ => Some(format!("There is no New Service {position}.")),
        }
    }

    fn edit_home(
        &mut self,
        edit: HomeInternetEdit,
    ) -> Option<String> {
        (!self.wizard.update_home_internet(edit)).then(|| self.not_editable("Home internet"))
    }

    fn not_editable(
        &self,
        what: &str,
    ) -> String {
        format!(
            "{what} cannot be changed on step {}.",
            self.wizard.stage().position() + 1
        )
    }

    fn navigation_hint(&self) -> String {
        match self.wizard.stage() {
            Stage::CollectCount => "Enter `count <n>` to continue.".to_string(),
            _ => "This is the last step.".to_string(),
        }
    }
}

/// Drives `session` from `input` until it ends or the user quits.
///
/// With `echo` set, every line read is written back before its reply, which
/// keeps scripted runs readable. Otherwise a `> ` prompt is shown.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
    echo: bool,
) -> io::Result<()> {
    info!("quote session started");
    writeln!(output, "{}", session.view())?;
    if !echo {
        write!(output, "> ")?;
        output.flush()?;
    }
    for line in input.lines() {
        let line = line?;
        if echo {
            writeln!(output, "> {line}")?;
        }
        let reply = session.handle_line(&line);
        writeln!(output, "{}", reply.text)?;
        if reply.quit {
            break;
        }
        if !echo {
            write!(output, "> ")?;
            output.flush()?;
        }
    }
    info!(stage = ?session.wizard().stage(), "quote session ended");
    Ok(())
}
