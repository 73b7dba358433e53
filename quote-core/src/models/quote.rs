//! The quote being assembled by the wizard.
//!
//! [`Quote`] owns every service line and the home-internet line. Callers never
//! reach into its collections directly: service edits swap in a freshly built
//! [`Service`] value, and every applied change bumps [`Quote::revision`] so a
//! view can tell when it needs to re-read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::home_internet::{HomeInternet, HomeInternetEdit};
use super::service::{Service, ServiceEdit, ServiceId};

/// Which sequence of a quote a service belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceGroup {
    Existing,
    New,
}

impl ServiceGroup {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Existing => "Existing Service",
            Self::New => "New Service",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Quote {
    existing_services: Vec<Service>,
    new_services: Vec<Service>,
    home_internet: HomeInternet,
    next_id: u64,
    revision: u64,
}

impl Quote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn existing_services(&self) -> &[Service] {
        &self.existing_services
    }

    pub fn new_services(&self) -> &[Service] {
        &self.new_services
    }

    pub fn services(
        &self,
        group: ServiceGroup,
    ) -> &[Service] {
        match group {
            ServiceGroup::Existing => &self.existing_services,
            ServiceGroup::New => &self.new_services,
        }
    }

    /// Existing services followed by new services.
    pub fn all_services(&self) -> impl Iterator<Item = &Service> {
        self.existing_services.iter().chain(self.new_services.iter())
    }

    /// Total number of service lines; this is what selects the discount tier.
    pub fn service_count(&self) -> usize {
        self.existing_services.len() + self.new_services.len()
    }

    pub fn home_internet(&self) -> &HomeInternet {
        &self.home_internet
    }

    /// Monotonic counter bumped by every applied mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn service(
        &self,
        id: ServiceId,
    ) -> Option<&Service> {
        self.all_services().find(|s| s.id == id)
    }

    pub fn group_of(
        &self,
        id: ServiceId,
    ) -> Option<ServiceGroup> {
        if self.existing_services.iter().any(|s| s.id == id) {
            Some(ServiceGroup::Existing)
        } else if self.new_services.iter().any(|s| s.id == id) {
            Some(ServiceGroup::New)
        } else {
            None
        }
    }

    /// Looks up the id of the service at a zero-based position within `group`.
    pub fn service_id_at(
        &self,
        group: ServiceGroup,
        index: usize,
    ) -> Option<ServiceId> {
        self.services(group).get(index).map(|s| s.id)
    }

    /// Replaces the existing services with `count` fresh, zeroed services.
    ///
    /// Any previously initialized existing services are discarded; calling
    /// this twice with the same count yields the same shape, not twice as many.
    pub fn initialize_existing(
        &mut self,
        count: usize,
    ) {
        let services = (0..count).map(|_| Service::new(self.allocate_id())).collect();
        self.existing_services = services;
        self.touch();
        debug!(count, "initialized existing services");
    }

    /// Appends a zeroed service to the new services and returns its id.
    pub fn add_new_service(&mut self) -> ServiceId {
        let id = self.allocate_id();
        self.new_services.push(Service::new(id));
        self.touch();
        debug!(%id, total = self.service_count(), "added new service");
        id
    }

    /// Removes a new service. Existing services cannot be removed.
    pub fn remove_new_service(
        &mut self,
        id: ServiceId,
    ) -> bool {
        let Some(position) = self.new_services.iter().position(|s| s.id == id) else {
            debug!(%id, "remove ignored: not a new service");
            return false;
        };
        self.new_services.remove(position);
        self.touch();
        debug!(%id, total = self.service_count(), "removed new service");
        true
    }

    /// Applies a field-level edit to the service with `id`.
    ///
    /// Returns `false` when the id is unknown or the edit has nothing to act on
    /// (see [`Service::edited`]).
    pub fn update_service(
        &mut self,
        id: ServiceId,
        edit: ServiceEdit,
    ) -> bool {
        let Some(group) = self.group_of(id) else {
            debug!(%id, "edit ignored: unknown service");
            return false;
        };
        let services = match group {
            ServiceGroup::Existing => &mut self.existing_services,
            ServiceGroup::New => &mut self.new_services,
        };
        let Some(slot) = services.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        let Some(updated) = slot.edited(edit) else {
            debug!(%id, ?edit, "edit ignored: nothing to apply");
            return false;
        };
        *slot = updated;
        self.touch();
        trace!(%id, ?edit, "service updated");
        true
    }

    pub fn update_home_internet(
        &mut self,
        edit: HomeInternetEdit,
    ) -> bool {
        self.home_internet = self.home_internet.edited(edit);
        self.touch();
        trace!(?edit, "home internet updated");
        true
    }

    /// Sum of every service's flat discount.
    pub fn flat_discount_total(&self) -> Decimal {
        self.all_services().map(|s| s.discount).sum()
    }

    fn allocate_id(&mut self) -> ServiceId {
        self.next_id += 1;
        ServiceId(self.next_id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::DeviceType;

    // =========================================================================
    // initialize_existing
    // =========================================================================

    #[test]
    fn initialize_existing_creates_zeroed_services() {
        let mut quote = Quote::new();

        quote.initialize_existing(3);

        assert_eq!(quote.existing_services().len(), 3);
        assert!(quote.existing_services().iter().all(|s| s.price == dec!(0)
            && s.devices.is_empty()
            && !s.has_apps));
    }

    #[test]
    fn initialize_existing_replaces_previous_sequence() {
        let mut quote = Quote::new();
        quote.initialize_existing(4);
        let first_id = quote.service_id_at(ServiceGroup::Existing, 0).unwrap();

        quote.initialize_existing(2);

        assert_eq!(quote.existing_services().len(), 2);
        assert_eq!(quote.service(first_id), None);
    }

    #[test]
    fn initialize_existing_with_zero_clears() {
        let mut quote = Quote::new();
        quote.initialize_existing(2);

        quote.initialize_existing(0);

        assert!(quote.existing_services().is_empty());
    }

    #[test]
    fn ids_are_unique_across_groups() {
        let mut quote = Quote::new();
        quote.initialize_existing(2);
        let new_id = quote.add_new_service();

        let mut ids: Vec<_> = quote.all_services().map(|s| s.id).collect();
        ids.dedup();

        assert_eq!(ids.len(), 3);
        assert_eq!(quote.group_of(new_id), Some(ServiceGroup::New));
    }

    // =========================================================================
    // new services
    // =========================================================================

    #[test]
    fn add_new_service_appends_in_order() {
        let mut quote = Quote::new();

        let a = quote.add_new_service();
        let b = quote.add_new_service();

        let ids: Vec<_> = quote.new_services().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(quote.service_count(), 2);
    }

    #[test]
    fn remove_new_service_drops_only_that_service() {
        let mut quote = Quote::new();
        let a = quote.add_new_service();
        let b = quote.add_new_service();

        assert!(quote.remove_new_service(a));

        assert_eq!(quote.service_id_at(ServiceGroup::New, 0), Some(b));
        assert_eq!(quote.service_count(), 1);
    }

    #[test]
    fn remove_rejects_existing_service() {
        let mut quote = Quote::new();
        quote.initialize_existing(1);
        let id = quote.service_id_at(ServiceGroup::Existing, 0).unwrap();

        assert!(!quote.remove_new_service(id));
        assert_eq!(quote.service_count(), 1);
    }

    // =========================================================================
    // update_service
    // =========================================================================

    #[test]
    fn update_service_applies_edit_and_bumps_revision() {
        let mut quote = Quote::new();
        let id = quote.add_new_service();
        let before = quote.revision();

        assert!(quote.update_service(id, ServiceEdit::SetPrice(dec!(30))));

        assert_eq!(quote.service(id).map(|s| s.price), Some(dec!(30)));
        assert!(quote.revision() > before);
    }

    #[test]
    fn update_service_unknown_id_is_noop() {
        let mut quote = Quote::new();
        let before = quote.revision();

        assert!(!quote.update_service(ServiceId(99), ServiceEdit::SetPrice(dec!(1))));
        assert_eq!(quote.revision(), before);
    }

    #[test]
    fn update_service_enforces_device_uniqueness() {
        let mut quote = Quote::new();
        let id = quote.add_new_service();
        let phone = ServiceEdit::SetDevice {
            device_type: DeviceType::Phone,
            enabled: true,
        };

        quote.update_service(id, phone);
        quote.update_service(id, phone);

        assert_eq!(quote.service(id).map(|s| s.devices.len()), Some(1));
    }

    #[test]
    fn flat_discount_total_sums_all_groups() {
        let mut quote = Quote::new();
        quote.initialize_existing(1);
        let existing = quote.service_id_at(ServiceGroup::Existing, 0).unwrap();
        let new = quote.add_new_service();

        quote.update_service(existing, ServiceEdit::SetDiscount(dec!(2.50)));
        quote.update_service(new, ServiceEdit::SetDiscount(dec!(7)));

        assert_eq!(quote.flat_discount_total(), dec!(9.50));
    }

    #[test]
    fn update_home_internet_replaces_value() {
        let mut quote = Quote::new();

        quote.update_home_internet(HomeInternetEdit::SetService(true));
        quote.update_home_internet(HomeInternetEdit::SetCharges(dec!(55)));

        assert!(quote.home_internet().has_service);
        assert_eq!(quote.home_internet().charges, dec!(55));
    }
}
