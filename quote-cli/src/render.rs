//! Plain-text rendering of each wizard step.
//!
//! Every amount is rounded to two decimals here and nowhere earlier.

use quote_core::calculations::common::{format_money, format_percentage};
use quote_core::{BillBreakdown, DeviceType, HomeInternet, Service, ServiceGroup, Stage, Wizard};
use rust_decimal::Decimal;

const TITLE: &str = "Service Pricing Calculator";
const LABEL_WIDTH: usize = 34;

/// Renders the view for the wizard's current step.
pub fn render_stage(wizard: &Wizard) -> String {
    let stage = wizard.stage();
    let mut lines = vec![
        TITLE.to_string(),
        format!(
            "Step {} of {}: {}",
            stage.position() + 1,
            Stage::ALL.len(),
            stage.title()
        ),
        String::new(),
    ];

    let quote = wizard.quote();
    match stage {
        Stage::CollectCount => {
            lines.push("Enter `count <n>` to continue.".to_string());
        }
        Stage::EditExisting => {
            lines.extend(render_group(
                quote.services(ServiceGroup::Existing),
                ServiceGroup::Existing,
            ));
            lines.push(
                "Commands: price, device, device-cost, discount, apps, apps-cost, back, next"
                    .to_string(),
            );
        }
        Stage::EditNewAndInternet => {
            lines.extend(render_group(quote.services(ServiceGroup::New), ServiceGroup::New));
            lines.extend(render_home_internet(quote.home_internet()));
            lines.push(
                "Commands: add, remove, price, device, device-cost, discount, apps, apps-cost, \
                 internet, internet-charges, internet-discount, internet-discount-amount, \
                 back, next"
                    .to_string(),
            );
        }
        Stage::Review => {
            if let Some(bill) = wizard.bill() {
                lines.extend(render_bill(&bill, quote.home_internet()));
            }
            lines.push("Commands: back, quit".to_string());
        }
    }

    lines.join("\n")
}

fn render_group(
    services: &[Service],
    group: ServiceGroup,
) -> Vec<String> {
    if services.is_empty() {
        return vec![format!("No {}s.", group.label().to_lowercase()), String::new()];
    }
    services
        .iter()
        .enumerate()
        .flat_map(|(index, service)| render_service(service, group, index))
        .collect()
}

/// Renders one service card, numbered from 1.
pub fn render_service(
    service: &Service,
    group: ServiceGroup,
    index: usize,
) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", group.label(), index + 1),
        field("Price:", &format_money(service.price)),
        "  Devices:".to_string(),
    ];
    for device_type in DeviceType::ALL {
        let line = match service.device(device_type) {
            Some(device) => field(
                &format!("  [x] {}", device_type.as_str()),
                &format_money(device.cost),
            ),
            None => format!("    [ ] {}", device_type.as_str()),
        };
        lines.push(line);
    }
    lines.push(field(
        "Additional Discount ($):",
        &format_money(service.discount),
    ));
    lines.push(if service.has_apps {
        field("[x] Apps", &format_money(service.apps_cost))
    } else {
        "  [ ] Apps".to_string()
    });
    lines.push(String::new());
    lines
}

fn render_home_internet(home: &HomeInternet) -> Vec<String> {
    let mut lines = vec!["Home Internet".to_string()];
    lines.push(format!(
        "  [{}] Do CX have Home Internet?",
        check(home.has_service)
    ));
    if home.has_service {
        lines.push(field("Monthly Charges:", &format_money(home.charges)));
        lines.push(format!(
            "  [{}] Additional Discount?",
            check(home.additional_discount)
        ));
        if home.additional_discount {
            lines.push(field(
                "Discount Amount:",
                &format_money(home.discount_amount),
            ));
        }
    }
    lines.push(String::new());
    lines
}

/// Renders the itemized bill summary.
///
/// Home internet lines only appear when the customer has home internet, and
/// its discount line only when that discount is switched on.
pub fn render_bill(
    bill: &BillBreakdown,
    home: &HomeInternet,
) -> Vec<String> {
    let mut lines = vec![
        "Bill Summary".to_string(),
        field("Base cost of services:", &money(bill.services_cost)),
        field("Total for devices:", &money(bill.devices_cost)),
        field("Total for apps:", &money(bill.apps_cost)),
        field(
            &format!(
                "Discount applied ({}%):",
                format_percentage(bill.tier_discount_percentage)
            ),
            &credit(bill.tier_discount_amount),
        ),
        field("Subtotal:", &money(bill.subtotal)),
        field("Additional discount:", &credit(bill.flat_discount_total)),
    ];
    if home.has_service {
        lines.push(field("Home Internet Charges:", &money(bill.home_charges)));
        if home.additional_discount {
            lines.push(field("Home Internet Discount:", &credit(bill.home_discount)));
        }
    }
    lines.push(field("Final Total:", &money(bill.total)));
    lines.push(String::new());
    lines
}

fn field(
    label: &str,
    value: &str,
) -> String {
    format!("  {label:<LABEL_WIDTH$}{value:>12}")
}

fn money(value: Decimal) -> String {
    if value.is_sign_negative() && !value.is_zero() {
        format!("-${}", format_money(value.abs()))
    } else {
        format!("${}", format_money(value))
    }
}

fn credit(value: Decimal) -> String {
    format!("-${}", format_money(value))
}

fn check(enabled: bool) -> &'static str {
    if enabled { "x" } else { " " }
}
