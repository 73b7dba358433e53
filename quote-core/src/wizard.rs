//! Linear four-stage wizard that owns the quote being built.
//!
//! ```text
//! CollectCount --confirm count--> EditExisting --next--> EditNewAndInternet --next--> Review
//!              <------back-------              <--back--                    <--back--
//! ```
//!
//! Each stage decides which part of the [`Quote`] may be edited. Requests the
//! current stage does not allow are ignored and reported as `false`/`None`,
//! never as errors. The bill is only available in [`Stage::Review`] and is
//! recomputed on every call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::{BillBreakdown, PricingEngine};
use crate::models::{HomeInternetEdit, Quote, ServiceEdit, ServiceGroup, ServiceId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    CollectCount,
    EditExisting,
    EditNewAndInternet,
    Review,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::CollectCount,
        Stage::EditExisting,
        Stage::EditNewAndInternet,
        Stage::Review,
    ];

    /// Zero-based position of the stage.
    pub fn position(&self) -> usize {
        match self {
            Self::CollectCount => 0,
            Self::EditExisting => 1,
            Self::EditNewAndInternet => 2,
            Self::Review => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::CollectCount => "How many existing services?",
            Self::EditExisting => "Existing Services",
            Self::EditNewAndInternet => "New Services",
            Self::Review => "Review and Calculate",
        }
    }

    /// Stage reached by moving forward, if forward movement is a plain step.
    ///
    /// Leaving [`Stage::CollectCount`] requires confirming a count, so it has
    /// no plain successor.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Self::EditExisting => Some(Self::EditNewAndInternet),
            Self::EditNewAndInternet => Some(Self::Review),
            Self::CollectCount | Self::Review => None,
        }
    }

    pub fn previous(&self) -> Option<Stage> {
        match self {
            Self::CollectCount => None,
            Self::EditExisting => Some(Self::CollectCount),
            Self::EditNewAndInternet => Some(Self::EditExisting),
            Self::Review => Some(Self::EditNewAndInternet),
        }
    }

    /// Whether services in `group` are editable at this stage.
    pub fn can_edit(
        &self,
        group: ServiceGroup,
    ) -> bool {
        matches!(
            (self, group),
            (Self::EditExisting, ServiceGroup::Existing)
                | (Self::EditNewAndInternet, ServiceGroup::New)
        )
    }

    /// Whether new services can be added or removed and home internet edited.
    pub fn edits_new_and_internet(&self) -> bool {
        *self == Self::EditNewAndInternet
    }
}

/// Navigation requests from the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    ConfirmCount(usize),
    Next,
    Back,
}

/// The wizard controller. Owns the quote and the pricing engine.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    stage: Stage,
    quote: Quote,
    engine: PricingEngine,
}

impl Wizard {
    pub fn new(engine: PricingEngine) -> Self {
        Self {
            stage: Stage::default(),
            quote: Quote::new(),
            engine,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    /// Applies a navigation event. Returns `false` if the current stage does
    /// not define it.
    pub fn dispatch(
        &mut self,
        event: WizardEvent,
    ) -> bool {
        match event {
            WizardEvent::ConfirmCount(count) => self.confirm_count(count),
            WizardEvent::Next => self.next(),
            WizardEvent::Back => self.back(),
        }
    }

    /// Confirms the existing-service count and moves to [`Stage::EditExisting`].
    ///
    /// Replaces any previously entered existing services with `count` fresh ones.
    pub fn confirm_count(
        &mut self,
        count: usize,
    ) -> bool {
        if self.stage != Stage::CollectCount {
            debug!(stage = ?self.stage, "confirm count ignored");
            return false;
        }
        self.quote.initialize_existing(count);
        self.move_to(Stage::EditExisting);
        true
    }

    pub fn next(&mut self) -> bool {
        match self.stage.next() {
            Some(stage) => {
                self.move_to(stage);
                true
            }
            None => {
                debug!(stage = ?self.stage, "next ignored");
                false
            }
        }
    }

    pub fn back(&mut self) -> bool {
        match self.stage.previous() {
            Some(stage) => {
                self.move_to(stage);
                true
            }
            None => {
                debug!(stage = ?self.stage, "back ignored");
                false
            }
        }
    }

    /// Edits a service if its group is editable at the current stage.
    pub fn update_service(
        &mut self,
        id: ServiceId,
        edit: ServiceEdit,
    ) -> bool {
        match self.quote.group_of(id) {
            Some(group) if self.stage.can_edit(group) => self.quote.update_service(id, edit),
            _ => {
                debug!(stage = ?self.stage, %id, "service edit not allowed");
                false
            }
        }
    }

    /// Edits the service at a zero-based position in the group the current
    /// stage edits.
    pub fn update_service_at(
        &mut self,
        index: usize,
        edit: ServiceEdit,
    ) -> bool {
        match self.editable_service_id(index) {
            Some(id) => self.update_service(id, edit),
            None => false,
        }
    }

    /// Id of the service at `index` within the group editable now, if any.
    pub fn editable_service_id(
        &self,
        index: usize,
    ) -> Option<ServiceId> {
        let group = self.editable_group()?;
        self.quote.service_id_at(group, index)
    }

    /// The service group editable at the current stage.
    pub fn editable_group(&self) -> Option<ServiceGroup> {
        match self.stage {
            Stage::EditExisting => Some(ServiceGroup::Existing),
            Stage::EditNewAndInternet => Some(ServiceGroup::New),
            Stage::CollectCount | Stage::Review => None,
        }
    }

    pub fn add_new_service(&mut self) -> Option<ServiceId> {
        if !self.stage.edits_new_and_internet() {
            debug!(stage = ?self.stage, "add service not allowed");
            return None;
        }
        Some(self.quote.add_new_service())
    }

    pub fn remove_new_service(
        &mut self,
        id: ServiceId,
    ) -> bool {
        if !self.stage.edits_new_and_internet() {
            debug!(stage = ?self.stage, %id, "remove service not allowed");
            return false;
        }
        self.quote.remove_new_service(id)
    }

    pub fn update_home_internet(
        &mut self,
        edit: HomeInternetEdit,
    ) -> bool {
        if !self.stage.edits_new_and_internet() {
            debug!(stage = ?self.stage, "home internet edit not allowed");
            return false;
        }
        self.quote.update_home_internet(edit)
    }

    /// The live bill, available only during [`Stage::Review`].
    pub fn bill(&self) -> Option<BillBreakdown> {
        (self.stage == Stage::Review).then(|| self.engine.calculate(&self.quote))
    }

    /// Live total without the breakdown, for status displays.
    pub fn total(&self) -> Option<Decimal> {
        self.bill().map(|bill| bill.total)
    }

    fn move_to(
        &mut self,
        stage: Stage,
    ) {
        info!(from = ?self.stage, to = ?stage, "wizard stage changed");
        self.stage = stage;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn at_stage(stage: Stage) -> Wizard {
        let mut wizard = Wizard::default();
        wizard.confirm_count(1);
        while wizard.stage() != stage {
            assert!(wizard.next(), "cannot reach {stage:?}");
        }
        wizard
    }

    // =========================================================================
    // Stage
    // =========================================================================

    #[test]
    fn stage_positions_are_sequential() {
        let positions: Vec<_> = Stage::ALL.iter().map(Stage::position).collect();

        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn stage_next_and_previous_are_linear() {
        assert_eq!(Stage::CollectCount.next(), None);
        assert_eq!(Stage::EditExisting.next(), Some(Stage::EditNewAndInternet));
        assert_eq!(Stage::EditNewAndInternet.next(), Some(Stage::Review));
        assert_eq!(Stage::Review.next(), None);
        assert_eq!(Stage::CollectCount.previous(), None);
        assert_eq!(Stage::Review.previous(), Some(Stage::EditNewAndInternet));
    }

    // =========================================================================
    // navigation
    // =========================================================================

    #[test]
    fn starts_collecting_count() {
        let wizard = Wizard::default();

        assert_eq!(wizard.stage(), Stage::CollectCount);
        assert_eq!(wizard.bill(), None);
    }

    #[test]
    fn next_from_collect_count_is_ignored() {
        let mut wizard = Wizard::default();

        assert!(!wizard.dispatch(WizardEvent::Next));
        assert!(!wizard.dispatch(WizardEvent::Back));
        assert_eq!(wizard.stage(), Stage::CollectCount);
    }

    #[test]
    fn confirm_count_initializes_existing_services() {
        let mut wizard = Wizard::default();

        assert!(wizard.dispatch(WizardEvent::ConfirmCount(3)));

        assert_eq!(wizard.stage(), Stage::EditExisting);
        assert_eq!(wizard.quote().existing_services().len(), 3);
    }

    #[test]
    fn confirm_count_outside_first_stage_is_ignored() {
        let mut wizard = at_stage(Stage::EditExisting);

        assert!(!wizard.confirm_count(5));

        assert_eq!(wizard.quote().existing_services().len(), 1);
    }

    #[test]
    fn returning_to_first_stage_and_confirming_replaces_existing() {
        let mut wizard = at_stage(Stage::EditExisting);
        wizard.update_service_at(0, ServiceEdit::SetPrice(dec!(50)));

        wizard.back();
        wizard.confirm_count(2);

        assert_eq!(wizard.quote().existing_services().len(), 2);
        assert!(wizard.quote().existing_services().iter().all(|s| s.price == dec!(0)));
    }

    #[test]
    fn review_has_no_forward_transition() {
        let mut wizard = at_stage(Stage::Review);

        assert!(!wizard.next());
        assert_eq!(wizard.stage(), Stage::Review);
        assert!(wizard.back());
        assert_eq!(wizard.stage(), Stage::EditNewAndInternet);
    }

    #[test]
    fn non_forward_transitions_leave_quote_untouched() {
        let mut wizard = at_stage(Stage::Review);
        let revision = wizard.quote().revision();

        wizard.back();
        wizard.back();
        wizard.next();

        assert_eq!(wizard.quote().revision(), revision);
    }

    // =========================================================================
    // editability
    // =========================================================================

    #[test]
    fn existing_services_only_editable_in_edit_existing() {
        let mut wizard = at_stage(Stage::EditExisting);
        let id = wizard.editable_service_id(0).unwrap();

        assert!(wizard.update_service(id, ServiceEdit::SetPrice(dec!(10))));
        wizard.next();
        assert!(!wizard.update_service(id, ServiceEdit::SetPrice(dec!(99))));

        assert_eq!(wizard.quote().service(id).map(|s| s.price), Some(dec!(10)));
    }

    #[test]
    fn new_services_only_added_in_edit_new_and_internet() {
        let mut wizard = at_stage(Stage::EditExisting);
        assert_eq!(wizard.add_new_service(), None);

        wizard.next();
        let id = wizard.add_new_service();

        assert!(id.is_some());
        assert_eq!(wizard.editable_service_id(0), id);
    }

    #[test]
    fn review_is_read_only() {
        let mut wizard = at_stage(Stage::EditNewAndInternet);
        let id = wizard.add_new_service().unwrap();
        wizard.next();

        assert!(!wizard.update_service(id, ServiceEdit::SetPrice(dec!(1))));
        assert!(!wizard.update_home_internet(HomeInternetEdit::SetService(true)));
        assert!(!wizard.remove_new_service(id));
        assert_eq!(wizard.add_new_service(), None);
    }

    #[test]
    fn remove_new_service_in_edit_new_and_internet() {
        let mut wizard = at_stage(Stage::EditNewAndInternet);
        let id = wizard.add_new_service().unwrap();

        assert!(wizard.remove_new_service(id));

        assert!(wizard.quote().new_services().is_empty());
    }

    // =========================================================================
    // bill
    // =========================================================================

    #[test]
    fn bill_reflects_edits_made_after_leaving_review() {
        let mut wizard = at_stage(Stage::Review);
        assert_eq!(wizard.total(), Some(dec!(0)));

        wizard.back();
        wizard.back();
        wizard.update_service_at(0, ServiceEdit::SetPrice(dec!(42)));
        wizard.next();
        wizard.next();

        assert_eq!(wizard.total(), Some(dec!(42)));
    }

    #[test]
    fn bill_unavailable_before_review() {
        let wizard = at_stage(Stage::EditNewAndInternet);

        assert_eq!(wizard.bill(), None);
    }
}
