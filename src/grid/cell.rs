//! Cell - per-coordinate state machine
//!
//! A cell validates progress requests against its kind and owner and
//! accumulates progress until a process completes. Cells never read or write
//! race state; they answer through events on the bus.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bus::{CellInfo, EventBus, GameEvent, Subscriber, SubscriberId, Topic};
use crate::core::random::GameRng;
use crate::core::types::{CellKind, Color, Coords, Process, RaceId, RaceType};
use crate::grid::resource::{ResourceKind, ResourcePack};

/// Progress at which a process is complete
pub const PROGRESS_COMPLETE: u32 = 100;

/// Marker left on a race's home cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub race: RaceId,
    pub race_type: RaceType,
    pub color: Color,
}

impl Occupant {
    pub fn style(&self) -> String {
        format!("{} {}", self.race_type.as_str(), self.color)
    }
}

/// Kind of a cell together with the data only that kind carries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Shadow,
    Resource(ResourceKind),
    RaceOccupied(Occupant),
}

/// Result of applying one progress increment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressOutcome {
    /// Progress reached the threshold; the caller applies the effect and resets
    Complete,
    /// The process does not apply to this cell; nothing changed
    Rejected,
    /// Progress was added but the threshold is not reached yet
    Pending,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    coords: Coords,
    state: CellState,
    owner: Option<RaceId>,
    progress: u32,
}

impl Cell {
    /// A fresh shadow cell
    pub fn new(coords: Coords) -> Self {
        Self {
            coords,
            state: CellState::Shadow,
            owner: None,
            progress: 0,
        }
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn state(&self) -> &CellState {
        &self.state
    }

    pub fn kind(&self) -> CellKind {
        match self.state {
            CellState::Shadow => CellKind::Shadow,
            CellState::Resource(_) => CellKind::Resource,
            CellState::RaceOccupied(_) => CellKind::RaceOccupied,
        }
    }

    pub fn resource(&self) -> Option<ResourceKind> {
        match self.state {
            CellState::Resource(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn occupant(&self) -> Option<&Occupant> {
        match &self.state {
            CellState::RaceOccupied(occupant) => Some(occupant),
            _ => None,
        }
    }

    pub fn owner(&self) -> Option<RaceId> {
        self.owner
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Claim this cell as the home of a race, replacing any resource
    pub fn convert_to_race_home(&mut self, race: RaceId, race_type: RaceType, color: Color) {
        self.state = CellState::RaceOccupied(Occupant { race, race_type, color });
        self.set_owner(race);
    }

    /// Turn the cell into a resource deposit; the owner is left as it was
    pub fn convert_to_resource(&mut self, kind: ResourceKind) {
        self.state = CellState::Resource(kind);
    }

    /// Seed the cell with a resource drawn from the catalog
    pub fn convert_to_random_resource<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let kind = ResourceKind::random(rng);
        debug!(coords = %self.coords, resource = kind.as_str(), "cell seeded with resource");
        self.convert_to_resource(kind);
    }

    pub fn set_owner(&mut self, race: RaceId) {
        self.owner = Some(race);
    }

    pub fn matches_coords(&self, coords: &Coords) -> bool {
        self.coords.x == coords.x && self.coords.y == coords.y
    }

    /// Whether `race` may contend for this cell.
    ///
    /// Shadow cells are open to everyone; resource cells to every race except
    /// their owner; home cells to nobody.
    pub fn is_eligible_for(&self, race: RaceId) -> bool {
        match self.state {
            CellState::Shadow => true,
            CellState::Resource(_) => self.owner != Some(race),
            CellState::RaceOccupied(_) => false,
        }
    }

    /// Payload of the eligibility broadcast
    pub fn self_info(&self) -> CellInfo {
        CellInfo {
            coords: self.coords,
            kind: self.kind(),
            owner: self.owner,
        }
    }

    /// Apply one increment of `process` on behalf of `race`.
    ///
    /// Valid combinations: BuildFabric on an unowned resource, ResearchCell on
    /// shadow, ConnectCell on a resource `race` owns. Progress is not clamped
    /// to the threshold; it saturates at `u32::MAX`.
    pub fn attempt_progress(&mut self, race: RaceId, process: Process, increment: u32) -> ProgressOutcome {
        let valid = match (self.state, process) {
            (CellState::Resource(_), Process::BuildFabric) => self.owner.is_none(),
            (CellState::Shadow, Process::ResearchCell) => true,
            (CellState::Resource(_), Process::ConnectCell) => self.owner == Some(race),
            _ => false,
        };

        if !valid {
            debug!(coords = %self.coords, %race, %process, "progress rejected");
            return ProgressOutcome::Rejected;
        }

        self.progress = self.progress.saturating_add(increment);
        if self.progress >= PROGRESS_COMPLETE {
            ProgressOutcome::Complete
        } else {
            ProgressOutcome::Pending
        }
    }

    pub fn reset_progress(&mut self) {
        self.progress = 0;
    }

    /// Apply the effect of a completed process and reset progress.
    ///
    /// Building claims the resource, research reveals the shadow as an
    /// unowned resource, connecting leaves the cell as it is.
    pub fn apply_completion<R: Rng + ?Sized>(&mut self, race: RaceId, process: Process, rng: &mut R) {
        match process {
            Process::BuildFabric => self.set_owner(race),
            Process::ResearchCell => self.convert_to_random_resource(rng),
            Process::ConnectCell | Process::AttackEnemy => {}
        }
        self.reset_progress();
    }

    /// Resources this cell hands its owner for one tick
    pub fn resource_for_tick(&self, amount: u32) -> Option<(RaceId, ResourcePack)> {
        match (self.state, self.owner) {
            (CellState::Resource(kind), Some(owner)) if amount > 0 => {
                Some((owner, ResourcePack::new(kind, amount)))
            }
            _ => None,
        }
    }

    /// Render descriptors: the kind tag, then a kind-specific tag if any
    pub fn describe_style(&self) -> Vec<String> {
        let mut styles = vec![self.kind().as_str().to_string()];
        match &self.state {
            CellState::Resource(kind) => styles.push(kind.as_str().to_string()),
            CellState::RaceOccupied(occupant) => styles.push(occupant.style()),
            CellState::Shadow => {}
        }
        styles
    }
}

impl Subscriber for Cell {
    fn subscriber_id(&self) -> SubscriberId {
        SubscriberId::Cell(self.coords)
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::ProgressRequested]
    }

    fn on_event(&mut self, event: &GameEvent, bus: &mut EventBus, rng: &mut GameRng) {
        let GameEvent::ProgressRequested { race, target, process, increment } = *event else {
            return;
        };
        if !self.matches_coords(&target) {
            return;
        }

        match self.attempt_progress(race, process, increment) {
            ProgressOutcome::Complete => {
                self.apply_completion(race, process, rng);
                debug!(coords = %self.coords, %race, %process, "process complete");
                bus.publish(GameEvent::ProcessCompleted { to: race, target, process });
            }
            ProgressOutcome::Rejected => {
                bus.publish(GameEvent::ProcessDeclined { to: race, target, process });
            }
            ProgressOutcome::Pending => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn resource_cell(owner: Option<RaceId>, progress: u32) -> Cell {
        let mut cell = Cell::new(Coords::new(1, 1));
        cell.convert_to_resource(ResourceKind::Iron);
        cell.owner = owner;
        cell.progress = progress;
        cell
    }

    #[test]
    fn test_new_cell_is_shadow() {
        let cell = Cell::new(Coords::new(3, 4));
        assert_eq!(cell.kind(), CellKind::Shadow);
        assert_eq!(cell.owner(), None);
        assert_eq!(cell.progress(), 0);
        assert!(cell.resource().is_none());
        assert!(cell.occupant().is_none());
    }

    #[test]
    fn test_build_fabric_accumulates_then_completes() {
        let mut cell = resource_cell(None, 90);
        assert_eq!(cell.attempt_progress(RaceId(0), Process::BuildFabric, 5), ProgressOutcome::Pending);
        assert_eq!(cell.progress(), 95);
        assert_eq!(cell.attempt_progress(RaceId(0), Process::BuildFabric, 10), ProgressOutcome::Complete);
        assert_eq!(cell.progress(), 105);
    }

    #[test]
    fn test_huge_increment_saturates_and_completes() {
        let mut cell = resource_cell(None, 50);
        assert_eq!(cell.attempt_progress(RaceId(1), Process::BuildFabric, u32::MAX), ProgressOutcome::Complete);
        assert_eq!(cell.progress(), u32::MAX);
        assert_eq!(cell.attempt_progress(RaceId(2), Process::BuildFabric, 7), ProgressOutcome::Complete);
        assert_eq!(cell.progress(), u32::MAX);
    }

    #[test]
    fn test_connect_on_foreign_home_is_rejected() {
        let mut cell = Cell::new(Coords::new(0, 0));
        cell.convert_to_race_home(RaceId(2), RaceType::Bee, Color::new(1, 2, 3));
        assert_eq!(cell.attempt_progress(RaceId(1), Process::ConnectCell, 10), ProgressOutcome::Rejected);
        assert_eq!(cell.progress(), 0);
    }

    #[test]
    fn test_connect_requires_ownership() {
        let mut owned = resource_cell(Some(RaceId(1)), 0);
        assert_eq!(owned.attempt_progress(RaceId(1), Process::ConnectCell, 4), ProgressOutcome::Pending);
        assert_eq!(owned.attempt_progress(RaceId(2), Process::ConnectCell, 4), ProgressOutcome::Rejected);
        assert_eq!(owned.progress(), 4);
    }

    #[test]
    fn test_build_on_owned_resource_is_rejected() {
        let mut cell = resource_cell(Some(RaceId(3)), 10);
        assert_eq!(cell.attempt_progress(RaceId(1), Process::BuildFabric, 9), ProgressOutcome::Rejected);
        assert_eq!(cell.progress(), 10);
    }

    #[test]
    fn test_attack_is_never_accepted() {
        let mut shadow = Cell::new(Coords::new(0, 0));
        let mut foreign = resource_cell(Some(RaceId(4)), 0);
        assert_eq!(shadow.attempt_progress(RaceId(1), Process::AttackEnemy, 9), ProgressOutcome::Rejected);
        assert_eq!(foreign.attempt_progress(RaceId(1), Process::AttackEnemy, 9), ProgressOutcome::Rejected);
    }

    #[test]
    fn test_eligibility_uses_kind_and_owner() {
        let shadow = Cell::new(Coords::new(0, 0));
        assert!(shadow.is_eligible_for(RaceId(0)));

        let owned = resource_cell(Some(RaceId(1)), 0);
        assert!(!owned.is_eligible_for(RaceId(1)));
        assert!(owned.is_eligible_for(RaceId(2)));

        let mut home = Cell::new(Coords::new(2, 2));
        home.convert_to_race_home(RaceId(1), RaceType::Cat, Color::new(0, 0, 0));
        assert!(!home.is_eligible_for(RaceId(1)));
        assert!(!home.is_eligible_for(RaceId(2)));
        // checking must not mutate the cell
        assert_eq!(home.kind(), CellKind::RaceOccupied);
    }

    #[test]
    fn test_home_then_resource_drops_occupant() {
        let mut cell = Cell::new(Coords::new(0, 0));
        cell.convert_to_race_home(RaceId(1), RaceType::Rat, Color::new(9, 9, 9));
        cell.convert_to_resource(ResourceKind::Gold);
        assert_eq!(cell.kind(), CellKind::Resource);
        assert!(cell.occupant().is_none());
        assert_eq!(cell.resource(), Some(ResourceKind::Gold));
        assert_eq!(cell.owner(), Some(RaceId(1)));
    }

    #[test]
    fn test_completion_effects() {
        let mut rng = GameRng::seed_from_u64(1);

        let mut deposit = resource_cell(None, 120);
        deposit.apply_completion(RaceId(2), Process::BuildFabric, &mut rng);
        assert_eq!(deposit.owner(), Some(RaceId(2)));
        assert_eq!(deposit.progress(), 0);

        let mut shadow = Cell::new(Coords::new(0, 0));
        shadow.progress = 100;
        shadow.apply_completion(RaceId(2), Process::ResearchCell, &mut rng);
        assert_eq!(shadow.kind(), CellKind::Resource);
        assert_eq!(shadow.owner(), None);
        assert_eq!(shadow.progress(), 0);
    }

    #[test]
    fn test_resource_yield_only_for_owned_deposits() {
        assert!(Cell::new(Coords::new(0, 0)).resource_for_tick(1).is_none());
        assert!(resource_cell(None, 0).resource_for_tick(1).is_none());
        assert!(resource_cell(Some(RaceId(1)), 0).resource_for_tick(0).is_none());

        let (owner, pack) = resource_cell(Some(RaceId(1)), 0)
            .resource_for_tick(2)
            .expect("owned deposit yields");
        assert_eq!(owner, RaceId(1));
        assert_eq!(pack, ResourcePack::new(ResourceKind::Iron, 2));
    }

    #[test]
    fn test_describe_style() {
        let shadow = Cell::new(Coords::new(0, 0));
        assert_eq!(shadow.describe_style(), vec!["shadow"]);

        assert_eq!(resource_cell(None, 0).describe_style(), vec!["resource", "iron"]);

        let mut home = Cell::new(Coords::new(0, 0));
        home.convert_to_race_home(RaceId(0), RaceType::Bear, Color::new(255, 0, 0));
        assert_eq!(home.describe_style(), vec!["race", "bear #ff0000"]);
    }

    #[test]
    fn test_progress_request_for_other_cell_is_ignored() {
        let mut rng = GameRng::seed_from_u64(5);
        let mut bus = EventBus::new();
        let mut cell = Cell::new(Coords::new(0, 0));

        cell.on_event(
            &GameEvent::ProgressRequested {
                race: RaceId(0),
                target: Coords::new(1, 0),
                process: Process::ResearchCell,
                increment: 50,
            },
            &mut bus,
            &mut rng,
        );

        assert_eq!(cell.progress(), 0);
        assert!(bus.is_idle());
    }

    #[test]
    fn test_progress_request_replies_on_bus() {
        let mut rng = GameRng::seed_from_u64(5);
        let mut bus = EventBus::new();
        let mut cell = resource_cell(Some(RaceId(3)), 0);
        let target = cell.coords();

        cell.on_event(
            &GameEvent::ProgressRequested { race: RaceId(0), target, process: Process::BuildFabric, increment: 5 },
            &mut bus,
            &mut rng,
        );
        assert_eq!(
            bus.next_pending(),
            Some(GameEvent::ProcessDeclined { to: RaceId(0), target, process: Process::BuildFabric })
        );

        let mut open = resource_cell(None, 95);
        open.on_event(
            &GameEvent::ProgressRequested { race: RaceId(0), target, process: Process::BuildFabric, increment: 5 },
            &mut bus,
            &mut rng,
        );
        assert_eq!(
            bus.next_pending(),
            Some(GameEvent::ProcessCompleted { to: RaceId(0), target, process: Process::BuildFabric })
        );
        assert_eq!(open.owner(), Some(RaceId(0)));
        assert_eq!(cell.owner(), Some(RaceId(3)));
    }
}
